//! Lexer (tokenizer) for term literals
//!
//! Converts literal text into a flat [`Token`] stream consumed by the reader.
//! `%` starts a comment that runs to the end of the line. Handles such as
//! `#Pid<nonode@nohost.85.0>` are lexed as one [`Token::Handle`] whose body
//! the reader splits up, because their dotted bodies would otherwise lex as
//! floats.

use super::errors::{ReadError, SourceLocation};
use std::fmt;

/// All token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Atom(String, SourceLocation),
    Var(String, SourceLocation),
    /// Magnitude only; a leading minus is a separate token
    Integer(u64, SourceLocation),
    Float(f64, SourceLocation),
    Str(String, SourceLocation),
    Handle {
        kind: String,
        body: String,
        location: SourceLocation,
    },

    // Punctuation
    LBracket(SourceLocation), // [
    RBracket(SourceLocation), // ]
    LBrace(SourceLocation),   // {
    RBrace(SourceLocation),   // }
    MapOpen(SourceLocation),  // #{
    BinOpen(SourceLocation),  // <<
    BinClose(SourceLocation), // >>
    Comma(SourceLocation),    // ,
    Arrow(SourceLocation),    // =>
    Match(SourceLocation),    // =
    Minus(SourceLocation),    // -
    Dot(SourceLocation),      // .

    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Atom(_, loc)
            | Token::Var(_, loc)
            | Token::Integer(_, loc)
            | Token::Float(_, loc)
            | Token::Str(_, loc)
            | Token::Handle { location: loc, .. }
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::MapOpen(loc)
            | Token::BinOpen(loc)
            | Token::BinClose(loc)
            | Token::Comma(loc)
            | Token::Arrow(loc)
            | Token::Match(loc)
            | Token::Minus(loc)
            | Token::Dot(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Atom(name, _) => write!(f, "atom '{}'", name),
            Token::Var(name, _) => write!(f, "variable '{}'", name),
            Token::Integer(n, _) => write!(f, "integer {}", n),
            Token::Float(x, _) => write!(f, "float {:?}", x),
            Token::Str(s, _) => write!(f, "string \"{}\"", s),
            Token::Handle { kind, body, .. } => write!(f, "#{}<{}>", kind, body),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::MapOpen(_) => write!(f, "'#{{'"),
            Token::BinOpen(_) => write!(f, "'<<'"),
            Token::BinClose(_) => write!(f, "'>>'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Arrow(_) => write!(f, "'=>'"),
            Token::Match(_) => write!(f, "'='"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Dot(_) => write!(f, "'.'"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer for term literals
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ReadError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, ReadError> {
        let loc = self.current_location();
        let ch = self
            .advance()
            .ok_or_else(|| ReadError::new("Unexpected end of input", loc))?;

        match ch {
            '"' => Ok(Token::Str(self.quoted('"', loc)?, loc)),
            '\'' => Ok(Token::Atom(self.quoted('\'', loc)?, loc)),
            '$' => self.char_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' => Ok(Token::Atom(self.word(ch), loc)),
            'A'..='Z' | '_' => Ok(Token::Var(self.word(ch), loc)),
            '#' => self.hash(loc),
            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            ',' => Ok(Token::Comma(loc)),
            '.' => Ok(Token::Dot(loc)),
            '-' => Ok(Token::Minus(loc)),
            '=' => {
                if self.peek() == Some('>') {
                    self.advance();
                    Ok(Token::Arrow(loc))
                } else {
                    Ok(Token::Match(loc))
                }
            }
            '<' if self.peek() == Some('<') => {
                self.advance();
                Ok(Token::BinOpen(loc))
            }
            '>' if self.peek() == Some('>') => {
                self.advance();
                Ok(Token::BinClose(loc))
            }
            _ => Err(ReadError::new(format!("Unexpected character '{}'", ch), loc)),
        }
    }

    /// Body of a quoted string or atom; the opening quote is already consumed
    fn quoted(&mut self, quote: char, loc: SourceLocation) -> Result<String, ReadError> {
        let mut text = String::new();

        while let Some(ch) = self.advance() {
            if ch == quote {
                return Ok(text);
            }
            if ch != '\\' {
                text.push(ch);
                continue;
            }
            let escaped = self.advance().ok_or_else(|| {
                ReadError::new("Unexpected end of input in escape sequence", loc)
            })?;
            text.push(match escaped {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                's' => ' ',
                '\\' | '"' | '\'' => escaped,
                _ => {
                    return Err(ReadError::new(
                        format!("Unknown escape sequence: \\{}", escaped),
                        self.current_location(),
                    ))
                }
            });
        }

        Err(ReadError::new("Unterminated quoted literal", loc))
    }

    /// `$a` is the character code of `a`
    fn char_literal(&mut self, loc: SourceLocation) -> Result<Token, ReadError> {
        let ch = self
            .advance()
            .ok_or_else(|| ReadError::new("Expected a character after '$'", loc))?;
        Ok(Token::Integer(u64::from(ch), loc))
    }

    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, ReadError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        let is_float = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit());
        if !is_float {
            let value = num_str
                .parse::<u64>()
                .map_err(|_| ReadError::new(format!("Invalid integer literal: {}", num_str), loc))?;
            return Ok(Token::Integer(value, loc));
        }

        num_str.push('.');
        self.advance();
        self.take_digits(&mut num_str);

        if matches!(self.peek(), Some('e') | Some('E')) {
            num_str.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                num_str.push(sign);
                self.advance();
            }
            self.take_digits(&mut num_str);
        }

        let value = num_str
            .parse::<f64>()
            .map_err(|_| ReadError::new(format!("Invalid float literal: {}", num_str), loc))?;
        Ok(Token::Float(value, loc))
    }

    fn take_digits(&mut self, out: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            out.push(ch);
            self.advance();
        }
    }

    fn word(&mut self, first_char: char) -> String {
        let mut word = String::new();
        word.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '@' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        word
    }

    /// `#{` or a `#Kind<body>` handle
    fn hash(&mut self, loc: SourceLocation) -> Result<Token, ReadError> {
        if self.peek() == Some('{') {
            self.advance();
            return Ok(Token::MapOpen(loc));
        }

        let kind = match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.advance();
                self.word(ch)
            }
            _ => return Err(ReadError::new("Expected '{' or a handle name after '#'", loc)),
        };

        if self.advance() != Some('<') {
            return Err(ReadError::new(format!("Expected '<' after #{}", kind), loc));
        }

        let mut body = String::new();
        let mut in_quote = false;
        loop {
            let ch = self
                .advance()
                .ok_or_else(|| ReadError::new(format!("Unterminated #{} handle", kind), loc))?;
            match ch {
                '>' if !in_quote => break,
                '\'' => in_quote = !in_quote,
                '\\' if in_quote => {
                    body.push(ch);
                    if let Some(escaped) = self.advance() {
                        body.push(escaped);
                    }
                    continue;
                }
                _ => {}
            }
            body.push(ch);
        }

        Ok(Token::Handle {
            kind,
            body,
            location: loc,
        })
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '%' {
                while let Some(ch) = self.advance() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("X = {ok, [1, -2.5]}.");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Var(ref s, _) if s == "X"));
        assert!(matches!(tokens[1], Token::Match(_)));
        assert!(matches!(tokens[2], Token::LBrace(_)));
        assert!(matches!(tokens[3], Token::Atom(ref s, _) if s == "ok"));
        assert!(matches!(tokens[4], Token::Comma(_)));
        assert!(matches!(tokens[5], Token::LBracket(_)));
        assert!(matches!(tokens[6], Token::Integer(1, _)));
        assert!(matches!(tokens[7], Token::Comma(_)));
        assert!(matches!(tokens[8], Token::Minus(_)));
        assert!(matches!(tokens[9], Token::Float(x, _) if x == 2.5));
        assert!(matches!(tokens[10], Token::RBracket(_)));
        assert!(matches!(tokens[11], Token::RBrace(_)));
        assert!(matches!(tokens[12], Token::Dot(_)));
        assert!(matches!(tokens[13], Token::Eof(_)));
    }

    #[test]
    fn test_integer_before_terminating_dot() {
        let tokens = Lexer::new("42.").tokenize().unwrap();
        assert!(matches!(tokens[0], Token::Integer(42, _)));
        assert!(matches!(tokens[1], Token::Dot(_)));
    }

    #[test]
    fn test_handle_body_keeps_quoted_dots() {
        let tokens = Lexer::new("#Ref<'a@b.c'.1.2>").tokenize().unwrap();
        match &tokens[0] {
            Token::Handle { kind, body, .. } => {
                assert_eq!(kind, "Ref");
                assert_eq!(body, "'a@b.c'.1.2");
            }
            other => panic!("Expected handle, got {}", other),
        }
    }

    #[test]
    fn test_comments_and_binaries() {
        let tokens = Lexer::new("% note\n<<\"hi\">> #{}").tokenize().unwrap();
        assert!(matches!(tokens[0], Token::BinOpen(ref loc) if loc.line == 2));
        assert!(matches!(tokens[1], Token::Str(ref s, _) if s == "hi"));
        assert!(matches!(tokens[2], Token::BinClose(_)));
        assert!(matches!(tokens[3], Token::MapOpen(_)));
        assert!(matches!(tokens[4], Token::RBrace(_)));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }
}
