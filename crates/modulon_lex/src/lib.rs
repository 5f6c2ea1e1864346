//! Character stream to token stream, and a cursor over the result.
//!
//! `modulon_lex` owns the first stage of the pipeline: [`tokenize`] turns
//! source bytes into a [`Token`] vector, and [`TokenCursor`] gives a parser
//! (external to this crate) random-access lookahead over that vector.

pub mod cursor;
pub mod scanner;
pub mod token;

pub use cursor::TokenCursor;
pub use scanner::tokenize;
pub use token::{Literal, Token, TokenKind};
