//! Canonical textual rendering
//!
//! `Display` for [`RemoteValue`] produces the Erlang-shell style text the
//! inspector shows inline, e.g. `{ok,[1,2,3]}`, `#{name => <<"joe">>}` or
//! `#Pid<nonode@nohost.85.0>`. Handles render as `#Tag<...>` because the
//! runtime has no literal syntax for them. The term-literal reader accepts
//! everything this module writes.

use super::value::RemoteValue;
use std::fmt;

const RESERVED_WORDS: &[&str] = &[
    "after", "and", "andalso", "band", "begin", "bnot", "bor", "bsl", "bsr", "bxor", "case",
    "catch", "cond", "div", "end", "fun", "if", "let", "not", "of", "or", "orelse", "receive",
    "rem", "try", "when", "xor",
];

/// Whether an atom can be written without quotes
pub fn is_bare_atom(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
        && !RESERVED_WORDS.contains(&name)
}

pub(crate) fn write_atom(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_bare_atom(name) {
        return f.write_str(name);
    }
    f.write_str("'")?;
    write_escaped(f, name, '\'')?;
    f.write_str("'")
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

/// `{:?}` with a fraction always present: `1.0e20`, never `1e20`
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let text = format!("{:?}", x);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            write!(f, "{}.0e{}", mantissa, exponent)
        }
        _ => f.write_str(&text),
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, elements: &[RemoteValue]) -> fmt::Result {
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", element)?;
    }
    Ok(())
}

/// Text shown for a binary: quoted when it is printable UTF-8, bytes otherwise
fn printable_text(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    let printable = text
        .chars()
        .all(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'));
    printable.then_some(text)
}

impl fmt::Display for RemoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteValue::Atom(atom) => write_atom(f, atom.as_str()),
            RemoteValue::Integer(n) => write!(f, "{}", n),
            RemoteValue::Float(x) => write_float(f, *x),
            RemoteValue::List(elements) => {
                f.write_str("[")?;
                write_seq(f, elements)?;
                f.write_str("]")
            }
            RemoteValue::Tuple(elements) => {
                f.write_str("{")?;
                write_seq(f, elements)?;
                f.write_str("}")
            }
            RemoteValue::Map(map) => {
                f.write_str("#{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{} => {}", key, value)?;
                }
                f.write_str("}")
            }
            RemoteValue::Binary(bytes) => {
                f.write_str("<<")?;
                if let Some(text) = printable_text(bytes).filter(|text| !text.is_empty()) {
                    f.write_str("\"")?;
                    write_escaped(f, text, '"')?;
                    f.write_str("\"")?;
                } else {
                    for (i, byte) in bytes.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{}", byte)?;
                    }
                }
                f.write_str(">>")
            }
            RemoteValue::Pid(pid) => {
                write!(f, "#Pid<{}.{}.{}", pid.node, pid.id, pid.serial)?;
                // Creation only distinguishes pids of restarted nodes
                if pid.creation != 0 {
                    write!(f, ".{}", pid.creation)?;
                }
                f.write_str(">")
            }
            RemoteValue::Port(port) => write!(f, "#Port<{}.{}>", port.node, port.id),
            RemoteValue::Reference(reference) => {
                write!(f, "#Ref<{}", reference.node)?;
                for id in reference.ids.iter() {
                    write!(f, ".{}", id)?;
                }
                f.write_str(">")
            }
            RemoteValue::Fun(fun) => {
                write!(f, "#Fun<{}.{}.{}>", fun.module, fun.index, fun.uniq)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::value::{Atom, Pid, Reference};
    use std::sync::Arc;

    #[test]
    fn test_atoms_quote_when_needed() {
        assert_eq!(RemoteValue::atom("ok").to_string(), "ok");
        assert_eq!(RemoteValue::atom("node@host").to_string(), "node@host");
        assert_eq!(RemoteValue::atom("Elixir.URI").to_string(), "'Elixir.URI'");
        assert_eq!(RemoteValue::atom("it's").to_string(), "'it\\'s'");
        assert_eq!(RemoteValue::atom("case").to_string(), "'case'");
        assert_eq!(RemoteValue::atom("").to_string(), "''");
    }

    #[test]
    fn test_containers() {
        let value = RemoteValue::tuple(vec![
            RemoteValue::atom("ok"),
            RemoteValue::list(vec![RemoteValue::Integer(1), RemoteValue::Float(2.0)]),
            RemoteValue::map(vec![(RemoteValue::atom("a"), RemoteValue::Integer(-3))]),
        ]);
        assert_eq!(value.to_string(), "{ok,[1,2.0],#{a => -3}}");
        assert_eq!(RemoteValue::Float(1e20).to_string(), "1.0e20");
    }

    #[test]
    fn test_binaries() {
        assert_eq!(RemoteValue::string("joe").to_string(), "<<\"joe\">>");
        assert_eq!(RemoteValue::string("a\"b").to_string(), "<<\"a\\\"b\">>");
        assert_eq!(RemoteValue::binary(&[0, 255]).to_string(), "<<0,255>>");
        assert_eq!(RemoteValue::binary(b"").to_string(), "<<>>");
    }

    #[test]
    fn test_handles() {
        let pid = RemoteValue::Pid(Pid {
            node: Atom::new("nonode@nohost"),
            id: 85,
            serial: 0,
            creation: 0,
        });
        assert_eq!(pid.to_string(), "#Pid<nonode@nohost.85.0>");

        let restarted = RemoteValue::Pid(Pid {
            node: Atom::new("nonode@nohost"),
            id: 85,
            serial: 0,
            creation: 3,
        });
        assert_eq!(restarted.to_string(), "#Pid<nonode@nohost.85.0.3>");

        let reference = RemoteValue::Reference(Reference {
            node: Atom::new("a@b.local"),
            ids: Arc::from(vec![1, 2, 3]),
        });
        assert_eq!(reference.to_string(), "#Ref<'a@b.local'.1.2.3>");
    }
}
