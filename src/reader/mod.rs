//! Term-literal reader
//!
//! Turns Erlang-shell style literal text into [`RemoteValue`]s, standing in
//! for the debugger's term decoder so the variables view can be fed from a
//! file:
//! - [`lexer`]: tokenization (text → tokens)
//! - [`parse`]: recursive descent over tokens (tokens → values)
//! - [`errors`]: [`ReadError`] and [`SourceLocation`]
//!
//! # Accepted input
//!
//! ```text
//! % comments run to the end of the line
//! Reply = {ok, [1, 2.5, -3], #{name => <<"joe">>}}.
//! Owner = #Pid<nonode@nohost.85.0>.
//! ```
//!
//! The syntax is the one [`RemoteValue`]'s `Display` writes, handles included.
//! Bare `"text"` is a character list; `<<"text">>` is a binary.
//!
//! [`RemoteValue`]: crate::term::RemoteValue

pub mod errors;
pub mod lexer;
pub mod parse;

pub use errors::{ReadError, SourceLocation};
pub use parse::{read_bindings, read_term, Binding, Reader, BARE_TERM_NAME};
