use std::rc::Rc;

use crate::{
    analyzer::{analyzer::analyze, program::Program},
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
};

use super::generator::generate;

fn analyze_source(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.bella".to_string())).unwrap();
    let (_, ast) = parse(tokens, Rc::new("test.bella".to_string()));
    analyze(&ast.unwrap()).unwrap()
}

#[test]
fn test_generates_every_statement_kind() {
    let program = analyze_source(
        "let x = 3.1; function f(x) = x * π; while x < 10 { x = f(x) + 1; print x > 5 ? sqrt(x) : -x; }",
    );

    let expected = [
        "let x_1 = 3.1;",
        "function f_2(x_3) {",
        "return (x_3 * Math.PI);",
        "}",
        "while ((x_1 < 10)) {",
        "x_1 = (f_2(x_1) + 1);",
        "console.log((((x_1 > 5)) ? (Math.sqrt(x_1)) : (-(x_1))));",
        "}",
    ]
    .join("\n");

    assert_eq!(generate(&program), expected);
}

#[test]
fn test_entities_with_the_same_name_get_distinct_targets() {
    let program = analyze_source("let x = 1; function g(x) = x; print g(x);");
    let expected = ["let x_1 = 1;", "function g_2(x_3) {", "return x_3;", "}", "console.log(g_2(x_1));"].join("\n");

    assert_eq!(generate(&program), expected);
}

#[test]
fn test_javascript_reserved_words_are_suffixed() {
    let program = analyze_source("let for = 1; let class = for;");
    assert_eq!(generate(&program), "let for_1 = 1;\nlet class_2 = for_1;");
}

#[test]
fn test_intrinsics_map_onto_math() {
    let program = analyze_source("print hypot(random(), 2) == 1 || false; print exp(ln(cos(sin(1))));");
    let expected = [
        "console.log(((Math.hypot(Math.random(),2) == 1) || false));",
        "console.log(Math.exp(Math.log(Math.cos(Math.sin(1)))));",
    ]
    .join("\n");

    assert_eq!(generate(&program), expected);
}

#[test]
fn test_generates_optimized_numbers() {
    let program = optimize(analyze_source("print 5 / 8; print 1 / 0; print 0 ** 0; print 2 < 3;"));
    let expected = ["console.log(0.625);", "console.log(Infinity);", "console.log((0 ** 0));", "console.log(true);"].join("\n");

    assert_eq!(generate(&program), expected);
}

#[test]
fn test_empty_program() {
    let program = analyze_source("");
    assert_eq!(generate(&program), "");
}

#[test]
fn test_not_operator() {
    let program = analyze_source("let b = true; print !b;");
    assert_eq!(generate(&program), "let b_1 = true;\nconsole.log(!(b_1));");
}

#[test]
fn test_negated_base_of_power_is_parenthesized() {
    let program = analyze_source("let x = 2; print -x ** 2; print !true ** x; print x ** -2;");
    let expected = ["let x_1 = 2;", "console.log(((-(x_1)) ** 2));", "console.log(((!(true)) ** x_1));", "console.log((x_1 ** -(2)));"].join("\n");

    assert_eq!(generate(&program), expected);
}

#[test]
fn test_negative_literal_base_of_power_is_parenthesized() {
    let program = optimize(analyze_source("let x = 2; print -5 ** x; print -(1 / 0) ** x; print 5 ** x;"));
    let expected = ["let x_1 = 2;", "console.log(((-5) ** x_1));", "console.log(((-Infinity) ** x_1));", "console.log((5 ** x_1));"].join("\n");

    assert_eq!(generate(&program), expected);
}

#[test]
fn test_negative_zero_keeps_its_sign() {
    let program = optimize(analyze_source("let x = 2; print x / -0; print 0;"));
    assert_eq!(generate(&program), "let x_1 = 2;\nconsole.log((x_1 / -0));\nconsole.log(0);");
}
