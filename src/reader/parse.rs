use super::errors::{ReadError, SourceLocation};
use super::lexer::{Lexer, Token};
use crate::term::{Atom, Fun, Pid, Port, Reference, RemoteValue};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A `Name = Term.` binding
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: RemoteValue,
    pub location: SourceLocation,
}

/// Name given to a bare term read by [`read_bindings`]
pub const BARE_TERM_NAME: &str = "value";

/// Read a single term, optionally followed by `.`
pub fn read_term(source: &str) -> Result<RemoteValue, ReadError> {
    Reader::new(source)?.read_term()
}

/// Read `Name = Term.` bindings, or one bare term named [`BARE_TERM_NAME`]
pub fn read_bindings(source: &str) -> Result<Vec<Binding>, ReadError> {
    Reader::new(source)?.read_bindings()
}

/// Recursive descent reader for term literals
pub struct Reader {
    tokens: Vec<Token>,
    position: usize,
}

impl Reader {
    pub fn new(source: &str) -> Result<Self, ReadError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    pub fn read_term(&mut self) -> Result<RemoteValue, ReadError> {
        let value = self.term()?;
        self.finish_statement()?;
        self.expect_end()?;
        Ok(value)
    }

    pub fn read_bindings(&mut self) -> Result<Vec<Binding>, ReadError> {
        if self.is_at_end() {
            return Ok(Vec::new());
        }

        let starts_binding = matches!(self.peek_token(), Token::Var(..))
            && matches!(self.peek_ahead(1), Some(Token::Match(_)));
        if !starts_binding {
            let location = self.current_location();
            let value = self.read_term()?;
            return Ok(vec![Binding {
                name: BARE_TERM_NAME.to_string(),
                value,
                location,
            }]);
        }

        let mut bindings = Vec::new();
        let mut seen: FxHashMap<String, SourceLocation> = FxHashMap::default();

        while !self.is_at_end() {
            let location = self.current_location();
            let name = match self.advance() {
                Token::Var(name, _) => name,
                other => {
                    return Err(ReadError::new(
                        format!("Expected a variable name, found {}", other),
                        other.location(),
                    ))
                }
            };
            if let Some(first) = seen.get(&name) {
                return Err(ReadError::new(
                    format!("Variable '{}' is already bound at line {}", name, first.line),
                    location,
                ));
            }
            seen.insert(name.clone(), location);

            self.expect(|t| matches!(t, Token::Match(_)), "Expected '=' after variable name")?;
            let value = self.term()?;
            self.finish_statement()?;

            bindings.push(Binding {
                name,
                value,
                location,
            });
        }

        Ok(bindings)
    }

    fn term(&mut self) -> Result<RemoteValue, ReadError> {
        let token = self.advance();
        match token {
            Token::Atom(name, _) => Ok(RemoteValue::atom(&name)),
            Token::Integer(n, loc) => i64::try_from(n)
                .map(RemoteValue::Integer)
                .map_err(|_| integer_range_error(n.to_string(), loc)),
            Token::Float(x, _) => Ok(RemoteValue::Float(x)),
            Token::Minus(loc) => match self.advance() {
                Token::Integer(n, _) => 0i64
                    .checked_sub_unsigned(n)
                    .map(RemoteValue::Integer)
                    .ok_or_else(|| integer_range_error(format!("-{}", n), loc)),
                Token::Float(x, _) => Ok(RemoteValue::Float(-x)),
                other => Err(ReadError::new(
                    format!("Expected a number after '-', found {}", other),
                    loc,
                )),
            },
            // A bare string is a character list
            Token::Str(text, _) => Ok(RemoteValue::list(
                text.chars().map(|c| RemoteValue::Integer(c as i64)).collect(),
            )),
            Token::LBracket(_) => {
                let elements = self.elements(|t| matches!(t, Token::RBracket(_)), "']'")?;
                Ok(RemoteValue::list(elements))
            }
            Token::LBrace(_) => {
                let elements = self.elements(|t| matches!(t, Token::RBrace(_)), "'}'")?;
                Ok(RemoteValue::tuple(elements))
            }
            Token::MapOpen(_) => self.map_entries(),
            Token::BinOpen(_) => self.binary_segments(),
            Token::Handle {
                kind,
                body,
                location,
            } => parse_handle(&kind, &body, location),
            Token::Var(name, loc) => Err(ReadError::new(
                format!("Unbound variable '{}' in term", name),
                loc,
            )),
            other => Err(ReadError::new(
                format!("Expected a term, found {}", other),
                other.location(),
            )),
        }
    }

    /// Comma-separated terms up to and including the closing token
    fn elements(
        &mut self,
        is_close: fn(&Token) -> bool,
        close: &str,
    ) -> Result<Vec<RemoteValue>, ReadError> {
        let mut elements = Vec::new();
        if is_close(self.peek_token()) {
            self.advance();
            return Ok(elements);
        }

        loop {
            elements.push(self.term()?);
            match self.advance() {
                Token::Comma(_) => continue,
                t if is_close(&t) => return Ok(elements),
                other => {
                    return Err(ReadError::new(
                        format!("Expected ',' or {}, found {}", close, other),
                        other.location(),
                    ))
                }
            }
        }
    }

    fn map_entries(&mut self) -> Result<RemoteValue, ReadError> {
        let mut entries = Vec::new();
        if matches!(self.peek_token(), Token::RBrace(_)) {
            self.advance();
            return Ok(RemoteValue::map(entries));
        }

        loop {
            let key = self.term()?;
            self.expect(|t| matches!(t, Token::Arrow(_)), "Expected '=>' after map key")?;
            let value = self.term()?;
            entries.push((key, value));
            match self.advance() {
                Token::Comma(_) => continue,
                Token::RBrace(_) => return Ok(RemoteValue::map(entries)),
                other => {
                    return Err(ReadError::new(
                        format!("Expected ',' or '}}', found {}", other),
                        other.location(),
                    ))
                }
            }
        }
    }

    /// `<<1,2,"text">>`: byte values and UTF-8 string segments
    fn binary_segments(&mut self) -> Result<RemoteValue, ReadError> {
        let mut bytes = Vec::new();
        if matches!(self.peek_token(), Token::BinClose(_)) {
            self.advance();
            return Ok(RemoteValue::binary(&bytes));
        }

        loop {
            match self.advance() {
                Token::Integer(n, loc) => {
                    let byte = u8::try_from(n).map_err(|_| {
                        ReadError::new(format!("Byte value {} out of range 0..=255", n), loc)
                    })?;
                    bytes.push(byte);
                }
                Token::Str(text, _) => bytes.extend_from_slice(text.as_bytes()),
                other => {
                    return Err(ReadError::new(
                        format!("Expected a byte or string segment, found {}", other),
                        other.location(),
                    ))
                }
            }
            match self.advance() {
                Token::Comma(_) => continue,
                Token::BinClose(_) => return Ok(RemoteValue::binary(&bytes)),
                other => {
                    return Err(ReadError::new(
                        format!("Expected ',' or '>>', found {}", other),
                        other.location(),
                    ))
                }
            }
        }
    }

    /// A statement ends with `.`, which may be left off at the end of input
    fn finish_statement(&mut self) -> Result<(), ReadError> {
        match self.peek_token() {
            Token::Dot(_) => {
                self.advance();
                Ok(())
            }
            Token::Eof(_) => Ok(()),
            other => Err(ReadError::new(
                format!("Expected '.' after term, found {}", other),
                other.location(),
            )),
        }
    }

    fn expect_end(&mut self) -> Result<(), ReadError> {
        match self.peek_token() {
            Token::Eof(_) => Ok(()),
            other => Err(ReadError::new(
                format!("Unexpected {} after term", other),
                other.location(),
            )),
        }
    }

    fn expect(&mut self, accept: fn(&Token) -> bool, message: &str) -> Result<(), ReadError> {
        let token = self.advance();
        if accept(&token) {
            Ok(())
        } else {
            Err(ReadError::new(
                format!("{}, found {}", message, token),
                token.location(),
            ))
        }
    }

    fn peek_token(&self) -> &Token {
        // The lexer always terminates the stream with Eof
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek_token().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek_token(), Token::Eof(_))
    }

    fn current_location(&self) -> SourceLocation {
        self.peek_token().location()
    }
}

/// Split a handle body such as `nonode@nohost.85.0` into node and numbers
fn parse_handle(kind: &str, body: &str, loc: SourceLocation) -> Result<RemoteValue, ReadError> {
    let (node, rest) = split_node(body, loc)?;
    let numbers = rest
        .split('.')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| ReadError::new(format!("Invalid number '{}' in #{}", part, kind), loc))
        })
        .collect::<Result<Vec<u64>, ReadError>>()?;

    let small = |n: u64| {
        u32::try_from(n)
            .map_err(|_| ReadError::new(format!("Number {} too large in #{}", n, kind), loc))
    };
    let arity_error = || {
        ReadError::new(
            format!("Wrong number of fields in #{}<{}>", kind, body),
            loc,
        )
    };

    match (kind, numbers.as_slice()) {
        ("Pid", [id, serial]) => Ok(RemoteValue::Pid(Pid {
            node,
            id: small(*id)?,
            serial: small(*serial)?,
            creation: 0,
        })),
        ("Pid", [id, serial, creation]) => Ok(RemoteValue::Pid(Pid {
            node,
            id: small(*id)?,
            serial: small(*serial)?,
            creation: small(*creation)?,
        })),
        ("Port", [id]) => Ok(RemoteValue::Port(Port { node, id: *id })),
        ("Ref", ids) if !ids.is_empty() => {
            let ids = ids.iter().map(|n| small(*n)).collect::<Result<Vec<u32>, _>>()?;
            Ok(RemoteValue::Reference(Reference {
                node,
                ids: Arc::from(ids),
            }))
        }
        ("Fun", [index, uniq]) => Ok(RemoteValue::Fun(Fun {
            module: node,
            index: small(*index)?,
            uniq: small(*uniq)?,
        })),
        ("Pid" | "Port" | "Ref" | "Fun", _) => Err(arity_error()),
        _ => Err(ReadError::new(format!("Unknown handle kind #{}", kind), loc)),
    }
}

fn integer_range_error(literal: String, loc: SourceLocation) -> ReadError {
    ReadError::new(format!("Integer {} does not fit in 64 bits", literal), loc)
}

/// Leading node (or module) atom, bare or quoted, and the remaining `.n.n` text
fn split_node(body: &str, loc: SourceLocation) -> Result<(Atom, &str), ReadError> {
    if let Some(quoted) = body.strip_prefix('\'') {
        let mut name = String::new();
        let mut chars = quoted.char_indices();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '\'' => return Ok((Atom::new(&name), &quoted[idx + 1..])),
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        name.push(escaped);
                    }
                }
                _ => name.push(ch),
            }
        }
        return Err(ReadError::new("Unterminated quoted node name", loc));
    }

    let (name, rest) = body.split_once('.').unwrap_or((body, ""));
    if name.is_empty() {
        return Err(ReadError::new("Missing node name in handle", loc));
    }
    Ok((Atom::new(name), rest))
}
