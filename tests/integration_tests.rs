//! Integration tests for end-to-end compilation.
//!
//! These tests drive the public pipeline from source text through
//! tokenization, parsing, analysis, optimization and JavaScript generation,
//! and check how every kind of error is reported.

use bella::{
    display_error,
    errors::errors::SemanticError,
    pipeline::{compile, CompileOptions, OutputType},
};

fn compile_to(source: &str, output: OutputType) -> Result<String, bella::errors::errors::Error> {
    compile(source, &CompileOptions { output, file_name: String::from("main.bella") })
}

fn js(source: &str) -> String {
    compile_to(source, OutputType::Js).unwrap()
}

fn semantic_error(source: &str) -> SemanticError {
    let error = compile_to(source, OutputType::Js).unwrap_err();
    error.as_semantic().cloned().unwrap()
}

#[test]
fn test_compile_simple_program() {
    assert_eq!(js("let x = 42; print x;"), "let x_1 = 42;\nconsole.log(x_1);");
}

#[test]
fn test_compile_function() {
    let source = "function square(x) = x ** 2; print square(3);";
    assert_eq!(js(source), "function square_1(x_2) {\nreturn (x_2 ** 2);\n}\nconsole.log(square_1(3));");
}

#[test]
fn test_compile_while_loop() {
    let source = "
        let i = 0;
        while i < 3 {
            print i;
            i = i + 1;
        }
    ";
    let expected = ["let i_1 = 0;", "while ((i_1 < 3)) {", "console.log(i_1);", "i_1 = (i_1 + 1);", "}"].join("\n");

    assert_eq!(js(source), expected);
}

#[test]
fn test_compile_folds_constants() {
    let source = "let x = 2 * π * 0 + sqrt(16); print x ? 10 : 20; x = x * 1; print 1 ? x : 0;";
    let expected = ["let x_1 = 4;", "console.log(((x_1) ? (10) : (20)));", "console.log(x_1);"].join("\n");

    assert_eq!(js(source), expected);
}

#[test]
fn test_compile_comments() {
    let source = "// A comment\nprint 1; // trailing\n";
    assert_eq!(js(source), "console.log(1);");
}

#[test]
fn test_compile_empty_source() {
    assert_eq!(js(""), "");
}

#[test]
fn test_compile_unicode_identifiers() {
    assert_eq!(js("let café = π; print café;"), "let café_1 = Math.PI;\nconsole.log(café_1);");
}

#[test]
fn test_ast_output() {
    let output = compile_to("print -x;", OutputType::Ast).unwrap();
    assert_eq!(
        output,
        "   1 | Program statements=[#2]\n   2 | PrintStatement argument=#3\n   3 | UnaryExpression op=Sym(\"-\") operand=Id(\"x\")"
    );
}

#[test]
fn test_optimized_output_shares_entities() {
    let output = compile_to("let x = 1; x = x + 0; print x;", OutputType::Optimized).unwrap();
    let expected = "   1 | Program statements=[#2,#4]
   2 | VariableDeclaration variable=#3 initializer=1
   3 | Variable name='x' readOnly=false
   4 | PrintStatement argument=#3";

    assert_eq!(output, expected);
}

#[test]
fn test_lex_error_invalid_token() {
    let error = compile_to("let x = 5 @ 2;", OutputType::Js).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().column, 11);
}

#[test]
fn test_parse_error_missing_semicolon() {
    let error = compile_to("let x = 5\nprint x;", OutputType::Js).unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_parse_error_is_reported_before_analysis() {
    let error = compile_to("print y; let", OutputType::Js).unwrap_err();
    assert!(error.as_semantic().is_none());
}

#[test]
fn test_semantic_errors() {
    assert_eq!(semantic_error("print(x);"), SemanticError::NotDeclared { name: String::from("x") });
    assert_eq!(semantic_error("let x = 1; let x = 2;"), SemanticError::AlreadyDeclared { name: String::from("x") });
    assert_eq!(semantic_error("π = 3;"), SemanticError::ReadOnlyViolation { name: String::from("π") });
    assert_eq!(semantic_error("function f(x) = x; f = 1;"), SemanticError::ReadOnlyViolation { name: String::from("f") });
    assert_eq!(semantic_error("print(sin());"), SemanticError::ArityMismatch { expected: 1, received: 0 });
    assert_eq!(semantic_error("print(hypot(1));"), SemanticError::ArityMismatch { expected: 2, received: 1 });
    assert!(matches!(semantic_error("print(sin + 1);"), SemanticError::WrongEntityKind { .. }));
}

#[test]
fn test_error_message_format() {
    let error = compile_to("let a = 1;\nprint a + b;", OutputType::Js).unwrap_err();
    assert_eq!(error.to_string(), "Line 2, Column 11: Identifier b not declared");
}

#[test]
fn test_display_error_report() {
    let source = "let x = y;";
    let error = compile_to(source, OutputType::Js).unwrap_err();

    let expected = "Error: NotDeclared (Identifier y not declared)
-> main.bella
  |
1 | let x = y;
  | --------^
";
    assert_eq!(display_error(&error, source), expected);
}
