//! Exercises `modulon_lex::tokenize` on small, realistic source snippets.

use modulon_lex::{Literal, TokenKind};

#[test]
fn tokenizes_a_struct_and_include_declaration() {
    let src = b"#include \"box.fc\" as Box\nstruct Pair {\n  a: i32\n  b: i32\n}\n";
    let tokens = modulon_lex::tokenize(src, "pair.fc", 0).unwrap();

    assert!(tokens.iter().any(|t| t.kind == TokenKind::DirectiveInclude));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::KeyStruct));
    assert!(tokens.iter().filter(|t| t.kind == TokenKind::Identifier).count() >= 4);
}

#[test]
fn tokenizes_mixed_literals() {
    let src = b"42 0x2A 3.5 'a' \"hi\\n\"";
    let tokens = modulon_lex::tokenize(src, "lits.fc", 0).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::LitIntDec);
    assert_eq!(tokens[0].literal, Literal::Int(42));
    assert_eq!(tokens[1].kind, TokenKind::LitIntHex);
    assert_eq!(tokens[1].literal, Literal::Int(42));
    assert_eq!(tokens[2].kind, TokenKind::LitFloat);
    assert_eq!(tokens[2].literal, Literal::Float(3.5));
    assert_eq!(tokens[3].literal, Literal::Char(b'a'));
    assert_eq!(tokens[4].literal, Literal::String("hi\n".to_string()));
}

#[test]
fn reports_invalid_byte_as_e0101() {
    let err = modulon_lex::tokenize(&[0x01], "bad.fc", 0).unwrap_err();
    assert_eq!(err.code, "E0101");
}

#[test]
fn reports_unterminated_char_newline_as_e0103() {
    let err = modulon_lex::tokenize(b"'a\n", "bad.fc", 0).unwrap_err();
    assert_eq!(err.code, "E0103");
}

#[test]
fn cursor_walks_the_token_stream_with_lookahead() {
    let tokens = modulon_lex::tokenize(b"struct Pair { }", "p.fc", 0).unwrap();
    let mut cursor = modulon_lex::TokenCursor::new(tokens);

    assert!(cursor.matches(&[TokenKind::KeyStruct, TokenKind::Identifier]));
    assert_eq!(cursor.pop().unwrap().kind, TokenKind::KeyStruct);
    assert_eq!(cursor.pop().unwrap().kind, TokenKind::Identifier);
    assert_eq!(cursor.pop().unwrap().kind, TokenKind::LBrace);
}
