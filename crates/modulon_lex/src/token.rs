//! Token and literal value types.

use modulon_base::Location;
use std::fmt;

/// Tagged union over the four literal value shapes a token may carry.
///
/// `None` is the sentinel for tokens with no literal payload (operators,
/// punctuation, keywords other than the string-carrying ones).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(u8),
    String(String),
    None,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}"),
            Literal::Char(v) => write!(f, "{v}"),
            Literal::String(v) => write!(f, "{v}"),
            Literal::None => write!(f, ""),
        }
    }
}

/// The closed set of token kinds the scanner ever emits.
///
/// `Precompile` is not produced by the scanner; it is a sentinel used only
/// by [`crate::TokenCursor::matches`] to mean "any kind, don't care".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LitIntDec,
    LitIntHex,
    LitFloat,
    LitChar,
    LitString,
    Identifier,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    Less,
    LessEq,
    Greater,
    GreaterEq,
    EqEq,
    NotEq,

    AndAnd,
    OrOr,
    Not,
    Amp,
    Pipe,
    Tilde,
    Caret,
    Shl,
    Shr,

    Assign,
    Dot,
    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    KeyI8,
    KeyI16,
    KeyI32,
    KeyI64,
    KeyU8,
    KeyU16,
    KeyU32,
    KeyU64,
    KeyF32,
    KeyF64,
    KeyVoid,
    KeyNull,
    KeyTrue,
    KeyFalse,
    KeyIf,
    KeyElse,
    KeyWhile,
    KeyFor,
    KeySwitch,
    KeyCase,
    KeyDefault,
    KeyBreak,
    KeyContinue,
    KeyReturn,
    KeyStruct,
    KeyEnum,

    IntrinsicSizeof,
    IntrinsicCast,
    IntrinsicMake,
    IntrinsicLen,

    DirectiveInclude,
    DirectiveTemplate,
    DirectiveDefer,
    DirectiveDefine,
    DirectiveConst,
    DirectiveVolatile,
    DirectiveVaArg,
    DirectiveRawC,
    DirectiveFuncC,
    DirectiveRawIr,
    DirectiveFuncIr,

    /// Matches any kind in [`crate::TokenCursor::matches`]; never produced by the scanner.
    Precompile,
}

/// One scanned token: its kind, where it was found, its raw text, and
/// (for literal-bearing kinds) its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
    pub lexeme: String,
    pub literal: Literal,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location, lexeme: impl Into<String>, literal: Literal) -> Self {
        Self {
            kind,
            location,
            lexeme: lexeme.into(),
            literal,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tkn kind: {:?}, location: {}.{}, lexeme: {}, value: {}",
            self.kind, self.location.source_id, self.location.line, self.lexeme, self.literal
        )
    }
}
