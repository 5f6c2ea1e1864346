//! Character stream to token stream.
//!
//! [`tokenize`] is a single-pass state machine over the modes described in
//! the module's design notes: `default`, `short_comment`, `long_comment`,
//! `identifier`, `directive`, `double_op`, `number`, `char`, `char_escape`,
//! `string`, `string_escape`. Every transition depends only on the current
//! byte and the current mode; the only lookback is a one-byte rewind when a
//! multi-char token's terminator turns out to belong to the next token.

use crate::token::{Literal, Token, TokenKind};
use modulon_base::{Diagnostic, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default,
    ShortComment,
    LongComment,
    Identifier,
    Directive,
    DoubleOp,
    Number,
    Char,
    CharEscape,
    String,
    StringEscape,
}

fn is_id_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c >= 128
}

fn is_id_continue(c: u8) -> bool {
    is_id_start(c) || c.is_ascii_digit()
}

fn is_double_op_start(c: u8) -> bool {
    matches!(c, b'<' | b'>' | b'=' | b'!' | b'&' | b'|')
}

fn double_op_kind(c1: u8, c2: u8) -> Option<TokenKind> {
    match (c1, c2) {
        (b'<', b'=') => Some(TokenKind::LessEq),
        (b'>', b'=') => Some(TokenKind::GreaterEq),
        (b'=', b'=') => Some(TokenKind::EqEq),
        (b'!', b'=') => Some(TokenKind::NotEq),
        (b'&', b'&') => Some(TokenKind::AndAnd),
        (b'|', b'|') => Some(TokenKind::OrOr),
        (b'<', b'<') => Some(TokenKind::Shl),
        (b'>', b'>') => Some(TokenKind::Shr),
        _ => None,
    }
}

fn single_op_kind(c: u8) -> Option<TokenKind> {
    match c {
        b'+' => Some(TokenKind::Plus),
        b'-' => Some(TokenKind::Minus),
        b'*' => Some(TokenKind::Star),
        b'/' => Some(TokenKind::Slash),
        b'%' => Some(TokenKind::Percent),
        b'<' => Some(TokenKind::Less),
        b'>' => Some(TokenKind::Greater),
        b'!' => Some(TokenKind::Not),
        b'&' => Some(TokenKind::Amp),
        b'|' => Some(TokenKind::Pipe),
        b'~' => Some(TokenKind::Tilde),
        b'^' => Some(TokenKind::Caret),
        b'=' => Some(TokenKind::Assign),
        b'.' => Some(TokenKind::Dot),
        b',' => Some(TokenKind::Comma),
        b':' => Some(TokenKind::Colon),
        b';' => Some(TokenKind::Semicolon),
        b'(' => Some(TokenKind::LParen),
        b')' => Some(TokenKind::RParen),
        b'{' => Some(TokenKind::LBrace),
        b'}' => Some(TokenKind::RBrace),
        b'[' => Some(TokenKind::LBracket),
        b']' => Some(TokenKind::RBracket),
        _ => None,
    }
}

fn keyword_kind(word: &str) -> Option<TokenKind> {
    Some(match word {
        "i8" => TokenKind::KeyI8,
        "i16" => TokenKind::KeyI16,
        "i32" => TokenKind::KeyI32,
        "i64" => TokenKind::KeyI64,
        "u8" => TokenKind::KeyU8,
        "u16" => TokenKind::KeyU16,
        "u32" => TokenKind::KeyU32,
        "u64" => TokenKind::KeyU64,
        "f32" => TokenKind::KeyF32,
        "f64" => TokenKind::KeyF64,
        "void" => TokenKind::KeyVoid,
        "null" => TokenKind::KeyNull,
        "true" => TokenKind::KeyTrue,
        "false" => TokenKind::KeyFalse,
        "if" => TokenKind::KeyIf,
        "else" => TokenKind::KeyElse,
        "while" => TokenKind::KeyWhile,
        "for" => TokenKind::KeyFor,
        "switch" => TokenKind::KeySwitch,
        "case" => TokenKind::KeyCase,
        "default" => TokenKind::KeyDefault,
        "break" => TokenKind::KeyBreak,
        "continue" => TokenKind::KeyContinue,
        "return" => TokenKind::KeyReturn,
        "struct" => TokenKind::KeyStruct,
        "enum" => TokenKind::KeyEnum,
        "sizeof" => TokenKind::IntrinsicSizeof,
        "cast" => TokenKind::IntrinsicCast,
        "make" => TokenKind::IntrinsicMake,
        "len" => TokenKind::IntrinsicLen,
        _ => return None,
    })
}

fn directive_kind(word: &str) -> Option<TokenKind> {
    Some(match word {
        "#include" => TokenKind::DirectiveInclude,
        "#template" => TokenKind::DirectiveTemplate,
        "#defer" => TokenKind::DirectiveDefer,
        "#define" => TokenKind::DirectiveDefine,
        "#const" => TokenKind::DirectiveConst,
        "#volatile" => TokenKind::DirectiveVolatile,
        "#va_arg" => TokenKind::DirectiveVaArg,
        "#raw_c" => TokenKind::DirectiveRawC,
        "#func_c" => TokenKind::DirectiveFuncC,
        "#raw_ir" => TokenKind::DirectiveRawIr,
        "#func_ir" => TokenKind::DirectiveFuncIr,
        _ => return None,
    })
}

/// Classifies an accumulated number lexeme as decimal, hex, or float.
///
/// Mirrors the original's single forward scan: `x`/`X` only counts as a hex
/// marker in position 1 right after a leading `0`; at most one `.` is
/// allowed and only outside a hex literal; any other non-hex-digit fails.
fn classify_number(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();
    let mut is_hex = false;
    let mut is_float = false;
    for (i, &c) in bytes.iter().enumerate() {
        if (c == b'x' || c == b'X') && i == 1 && bytes[0] == b'0' {
            is_hex = true;
        } else if c == b'.' && !is_hex && !is_float {
            is_float = true;
        } else if !(c.is_ascii_digit() || (is_hex && c.is_ascii_hexdigit())) {
            return None;
        }
    }
    if is_float {
        Some(TokenKind::LitFloat)
    } else if is_hex {
        Some(TokenKind::LitIntHex)
    } else {
        Some(TokenKind::LitIntDec)
    }
}

fn escape_byte(c: u8) -> Option<u8> {
    match c {
        b'0' => Some(0),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'\\' => Some(b'\\'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        _ => None,
    }
}

/// Turns source bytes into a token vector.
///
/// `filename` is used only to render diagnostics; `source_id` is stamped
/// into every [`Location`]. A single synthetic `\n` is appended at end of
/// input to flush any open identifier, number, or directive.
pub fn tokenize(source: &[u8], filename: &str, source_id: u32) -> Result<Vec<Token>, Diagnostic> {
    let mut result = Vec::new();
    let mut buffer: Vec<u8> = Vec::new();
    let mut mode = Mode::Default;
    let mut line: u32 = 1;
    let mut read_pos: usize = 0;
    let mut running = true;

    while running {
        let c: u8;
        if read_pos >= source.len() {
            c = b'\n';
            running = false;
        } else {
            c = source[read_pos];
            read_pos += 1;
        }
        let loc = Location::new(source_id, line);

        match mode {
            Mode::Default => {
                if is_id_start(c) {
                    buffer.clear();
                    buffer.push(c);
                    mode = Mode::Identifier;
                } else if c.is_ascii_digit() {
                    buffer.clear();
                    buffer.push(c);
                    mode = Mode::Number;
                } else if is_double_op_start(c) {
                    buffer.clear();
                    buffer.push(c);
                    mode = Mode::DoubleOp;
                } else {
                    match c {
                        b' ' | b'\t' | 0 => {}
                        b'\r' => {
                            line += 1;
                            if read_pos < source.len() && source[read_pos] == b'\n' {
                                read_pos += 1;
                            }
                        }
                        b'\n' => {
                            line += 1;
                        }
                        b'/' => {
                            if read_pos < source.len() && source[read_pos] == b'/' {
                                read_pos += 1;
                                mode = Mode::ShortComment;
                            } else if read_pos < source.len() && source[read_pos] == b'*' {
                                read_pos += 1;
                                mode = Mode::LongComment;
                            } else {
                                result.push(Token::new(TokenKind::Slash, loc, "/", Literal::None));
                            }
                        }
                        b'\'' => {
                            buffer.clear();
                            mode = Mode::Char;
                        }
                        b'"' => {
                            buffer.clear();
                            mode = Mode::String;
                        }
                        b'#' => {
                            buffer.clear();
                            buffer.push(c);
                            mode = Mode::Directive;
                        }
                        _ => {
                            if let Some(kind) = single_op_kind(c) {
                                result.push(Token::new(kind, loc, (c as char).to_string(), Literal::None));
                            } else {
                                return Err(Diagnostic::new(
                                    "E0101",
                                    format!("invalid char '{}' at {}:{}", c as char, filename, line),
                                    loc,
                                ));
                            }
                        }
                    }
                }
            }

            Mode::ShortComment => {
                if c == b'\r' {
                    line += 1;
                    if read_pos < source.len() && source[read_pos] == b'\n' {
                        read_pos += 1;
                    }
                    mode = Mode::Default;
                } else if c == b'\n' {
                    line += 1;
                    mode = Mode::Default;
                }
            }

            Mode::LongComment => {
                if c == b'\r' {
                    line += 1;
                    if read_pos < source.len() && source[read_pos] == b'\n' {
                        read_pos += 1;
                    }
                } else if c == b'\n' {
                    line += 1;
                } else if c == b'*' && read_pos < source.len() && source[read_pos] == b'/' {
                    read_pos += 1;
                    mode = Mode::Default;
                }
            }

            Mode::Identifier => {
                if is_id_continue(c) {
                    buffer.push(c);
                } else {
                    let text = String::from_utf8_lossy(&buffer).into_owned();
                    let kind = keyword_kind(&text);
                    match kind {
                        Some(kind) => result.push(Token::new(kind, loc, text, Literal::None)),
                        None => {
                            result.push(Token::new(TokenKind::Identifier, loc, text.clone(), Literal::String(text)))
                        }
                    }
                    mode = Mode::Default;
                    read_pos -= 1;
                }
            }

            Mode::Directive => {
                if is_id_continue(c) {
                    buffer.push(c);
                } else {
                    let text = String::from_utf8_lossy(&buffer).into_owned();
                    match directive_kind(&text) {
                        Some(kind) => {
                            result.push(Token::new(kind, loc, text, Literal::None));
                            mode = Mode::Default;
                            read_pos -= 1;
                        }
                        None => {
                            return Err(Diagnostic::new(
                                "E0109",
                                format!("unsupported compiler order {text} at {filename}:{line}"),
                                loc,
                            ))
                        }
                    }
                }
            }

            Mode::DoubleOp => {
                let first = buffer[0];
                match double_op_kind(first, c) {
                    Some(kind) => {
                        let text = format!("{}{}", first as char, c as char);
                        result.push(Token::new(kind, loc, text, Literal::None));
                        mode = Mode::Default;
                    }
                    None => {
                        let kind = single_op_kind(first).expect("double_op_start bytes are always single ops");
                        result.push(Token::new(kind, loc, (first as char).to_string(), Literal::None));
                        mode = Mode::Default;
                        read_pos -= 1;
                    }
                }
            }

            Mode::Number => {
                if c.is_ascii_digit() || c.is_ascii_hexdigit() || c == b'x' || c == b'X' || c == b'.' {
                    buffer.push(c);
                } else {
                    let text = String::from_utf8_lossy(&buffer).into_owned();
                    let kind = classify_number(&text).ok_or_else(|| {
                        Diagnostic::new("E0102", format!("invalid number {text} at {filename}:{line}"), loc)
                    })?;
                    let literal = match kind {
                        TokenKind::LitIntDec => Literal::Int(text.parse::<i64>().unwrap_or(0)),
                        TokenKind::LitIntHex => {
                            let digits = text.trim_start_matches("0x").trim_start_matches("0X");
                            Literal::Int(i64::from_str_radix(digits, 16).unwrap_or(0))
                        }
                        TokenKind::LitFloat => Literal::Float(text.parse::<f64>().unwrap_or(0.0)),
                        _ => unreachable!(),
                    };
                    result.push(Token::new(kind, loc, text, literal));
                    mode = Mode::Default;
                    read_pos -= 1;
                }
            }

            Mode::Char => {
                if c == b'\\' {
                    mode = Mode::CharEscape;
                } else if c == b'\r' || c == b'\n' {
                    return Err(Diagnostic::new(
                        "E0103",
                        format!("newline in char literal at {filename}:{line}"),
                        loc,
                    ));
                } else if c == b'\'' {
                    if buffer.is_empty() {
                        return Err(Diagnostic::new(
                            "E0104",
                            format!("empty char literal at {filename}:{line}"),
                            loc,
                        ));
                    }
                    if buffer.len() > 1 {
                        return Err(Diagnostic::new(
                            "E0105",
                            format!("char literal too long at {filename}:{line}"),
                            loc,
                        ));
                    }
                    let text = String::from_utf8_lossy(&buffer).into_owned();
                    result.push(Token::new(TokenKind::LitChar, loc, text, Literal::Char(buffer[0])));
                    mode = Mode::Default;
                } else {
                    buffer.push(c);
                }
            }

            Mode::CharEscape => {
                match escape_byte(c) {
                    Some(b) => buffer.push(b),
                    None => {
                        return Err(Diagnostic::new(
                            "E0106",
                            format!("invalid char escape '\\{}' at {}:{}", c as char, filename, line),
                            loc,
                        ))
                    }
                }
                mode = Mode::Char;
            }

            Mode::String => {
                if c == b'\\' {
                    mode = Mode::StringEscape;
                } else if c == b'\r' || c == b'\n' {
                    return Err(Diagnostic::new(
                        "E0107",
                        format!("newline in string literal at {filename}:{line}"),
                        loc,
                    ));
                } else if c == b'"' {
                    let text = String::from_utf8_lossy(&buffer).into_owned();
                    result.push(Token::new(TokenKind::LitString, loc, text.clone(), Literal::String(text)));
                    mode = Mode::Default;
                } else {
                    buffer.push(c);
                }
            }

            Mode::StringEscape => {
                match escape_byte(c) {
                    Some(b) => buffer.push(b),
                    None => {
                        return Err(Diagnostic::new(
                            "E0108",
                            format!("invalid string escape '\\{}' at {}:{}", c as char, filename, line),
                            loc,
                        ))
                    }
                }
                mode = Mode::String;
            }
        }
    }

    Ok(result)
}
