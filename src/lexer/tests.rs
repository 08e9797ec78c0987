//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Number, string and character-constant literals
//! - B escape sequences
//! - Operators and compound assignment
//! - Labels, comments and error cases

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "auto extrn if else while switch case goto return break";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Auto);
    assert_eq!(tokens[1].kind, TokenKind::Extrn);
    assert_eq!(tokens[2].kind, TokenKind::If);
    assert_eq!(tokens[3].kind, TokenKind::Else);
    assert_eq!(tokens[4].kind, TokenKind::While);
    assert_eq!(tokens[5].kind, TokenKind::Switch);
    assert_eq!(tokens[6].kind, TokenKind::Case);
    assert_eq!(tokens[7].kind, TokenKind::Goto);
    assert_eq!(tokens[8].kind, TokenKind::Return);
    assert_eq!(tokens[9].kind, TokenKind::Break);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 100";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "100");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "multiple words""#;
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello*nworld" "tab*there" "star**" "eot*e""#;
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "star*");
    assert_eq!(tokens[3].value, "eot\u{4}");
}

#[test]
fn test_tokenize_character_constants() {
    let source = "'a' 'ab' '*n' '*0'";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::CharacterConstant);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::CharacterConstant);
    assert_eq!(tokens[1].value, "ab");
    assert_eq!(tokens[2].value, "\n");
    assert_eq!(tokens[3].value, "\0");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % == != < > <= >= = && || & | ^ << >> ! ~";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Plus);
    assert_eq!(tokens[1].kind, TokenKind::Dash);
    assert_eq!(tokens[2].kind, TokenKind::Star);
    assert_eq!(tokens[3].kind, TokenKind::Slash);
    assert_eq!(tokens[4].kind, TokenKind::Percent);
    assert_eq!(tokens[5].kind, TokenKind::Equals);
    assert_eq!(tokens[6].kind, TokenKind::NotEquals);
    assert_eq!(tokens[7].kind, TokenKind::Less);
    assert_eq!(tokens[8].kind, TokenKind::Greater);
    assert_eq!(tokens[9].kind, TokenKind::LessEquals);
    assert_eq!(tokens[10].kind, TokenKind::GreaterEquals);
    assert_eq!(tokens[11].kind, TokenKind::Assignment);
    assert_eq!(tokens[12].kind, TokenKind::And);
    assert_eq!(tokens[13].kind, TokenKind::Or);
    assert_eq!(tokens[14].kind, TokenKind::BitAnd);
    assert_eq!(tokens[15].kind, TokenKind::BitOr);
    assert_eq!(tokens[16].kind, TokenKind::Xor);
    assert_eq!(tokens[17].kind, TokenKind::Lshift);
    assert_eq!(tokens[18].kind, TokenKind::Rshift);
    assert_eq!(tokens[19].kind, TokenKind::Not);
    assert_eq!(tokens[20].kind, TokenKind::Tilde);
    assert_eq!(tokens[21].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_compound_assignment() {
    let source = "=+ =- =* =/ =% =& =| =^ =<< =>>";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::AssignPlus);
    assert_eq!(tokens[1].kind, TokenKind::AssignMinus);
    assert_eq!(tokens[2].kind, TokenKind::AssignStar);
    assert_eq!(tokens[3].kind, TokenKind::AssignSlash);
    assert_eq!(tokens[4].kind, TokenKind::AssignPercent);
    assert_eq!(tokens[5].kind, TokenKind::AssignAnd);
    assert_eq!(tokens[6].kind, TokenKind::AssignOr);
    assert_eq!(tokens[7].kind, TokenKind::AssignXor);
    assert_eq!(tokens[8].kind, TokenKind::AssignLshift);
    assert_eq!(tokens[9].kind, TokenKind::AssignRshift);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_inc_dec() {
    let source = "++x x-- ";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::PlusPlus);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::MinusMinus);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } [ ] , ; : ?";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[6].kind, TokenKind::Comma);
    assert_eq!(tokens[7].kind, TokenKind::Semicolon);
    assert_eq!(tokens[8].kind, TokenKind::Colon);
    assert_eq!(tokens[9].kind, TokenKind::Question);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_label() {
    let source = "loop: goto loop;";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Label);
    assert_eq!(tokens[0].value, "loop:");
    assert_eq!(tokens[1].kind, TokenKind::Goto);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "loop");
    assert_eq!(tokens[3].kind, TokenKind::Semicolon);
}

#[test]
fn test_tokenize_comments() {
    let source = "x = 5; /* this is\na comment */ y = 10;";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "y");
    assert_eq!(tokens[5].kind, TokenKind::Assignment);
    assert_eq!(tokens[6].kind, TokenKind::Number);
    assert_eq!(tokens[6].value, "10");
}

#[test]
fn test_tokenize_position_tracking() {
    let source = "main()\n  x;";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].meta.line, 1);
    assert_eq!(tokens[0].meta.column, 1);
    assert_eq!(tokens[0].meta.start_pos, 0);
    assert_eq!(tokens[0].meta.end_pos, 4);
    assert_eq!(tokens[0].meta.end_column, 5);

    // `x` sits on line 2, after two spaces
    assert_eq!(tokens[3].value, "x");
    assert_eq!(tokens[3].meta.line, 2);
    assert_eq!(tokens[3].meta.column, 3);
    assert_eq!(tokens[3].meta.start_pos, 9);
}

#[test]
fn test_tokenize_unrecognised_token() {
    let source = "x = @";
    let result = tokenize(source);

    assert!(result.is_err());
}

#[test]
fn test_tokenize_whitespace_handling() {
    let source = "  auto   x  ";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Auto);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_string() {
    let source = r#""""#;
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_simple_program() {
    let source = "main() { putchar('x'); }";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "main");
    assert_eq!(tokens[1].kind, TokenKind::OpenParen);
    assert_eq!(tokens[2].kind, TokenKind::CloseParen);
    assert_eq!(tokens[3].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "putchar");
    assert_eq!(tokens[5].kind, TokenKind::OpenParen);
    assert_eq!(tokens[6].kind, TokenKind::CharacterConstant);
    assert_eq!(tokens[6].value, "x");
}
