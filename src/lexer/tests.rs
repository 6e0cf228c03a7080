//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers (including non-Latin letters)
//! - Numeric literals (integers, fractions and exponents)
//! - Operators and punctuation
//! - Comments
//! - Positions and error cases

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.bella".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("let function print while true false"),
        vec![
            TokenKind::Let,
            TokenKind::Function,
            TokenKind::Print,
            TokenKind::While,
            TokenKind::True,
            TokenKind::False,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo baz_123 _underscore π コンパイラ printer".to_string();
    let tokens = tokenize(source, Some("test.bella".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "baz_123", "_underscore", "π", "コンパイラ", "printer", "EOF"]);
    assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 5.5E2 1e-3".to_string();
    let tokens = tokenize(source, Some("test.bella".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["42", "3.14", "0", "5.5E2", "1e-3", "EOF"]);
    assert!(tokens[..5].iter().all(|token| token.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * ** / % < <= == != >= > && || ! = ? : , ;"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::StarStar,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::GreaterEquals,
            TokenKind::Greater,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::Assignment,
            TokenKind::Question,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_operators_without_spaces() {
    assert_eq!(
        kinds("x**2<=y"),
        vec![
            TokenKind::Identifier,
            TokenKind::StarStar,
            TokenKind::Number,
            TokenKind::LessEquals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("print(0); // yay\nprint(1);//"),
        vec![
            TokenKind::Print,
            TokenKind::OpenParen,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::Print,
            TokenKind::OpenParen,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_positions() {
    let source = "let x = 1;\n  print π;".to_string();
    let tokens = tokenize(source, Some("test.bella".to_string())).unwrap();

    let print = &tokens[5];
    assert_eq!(print.kind, TokenKind::Print);
    assert_eq!(print.span.start.line, 2);
    assert_eq!(print.span.start.column, 3);
    assert_eq!(print.span.start.offset, 13);

    let pi = &tokens[6];
    assert_eq!(pi.span.start.column, 9);
    assert_eq!(pi.span.end.column, 10);
    assert_eq!(pi.span.end.offset, 21);
    assert_eq!(pi.span.start.file.as_str(), "test.bella");
}

#[test]
fn test_tokenize_unrecognised_character() {
    let error = tokenize("ab😭c = 2".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 3);
    assert_eq!(error.get_position().file.as_str(), "shell");
}

#[test]
fn test_tokenize_malformed_number() {
    let error = tokenize("x= 2.".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("   \n\t "), vec![TokenKind::EOF]);
}
