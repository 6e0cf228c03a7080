use std::rc::Rc;

use crate::{
    analyzer::{
        analyzer::analyze,
        program::{Expression, Program, Statement},
    },
    ast::ast::{BinaryOperator, UnaryOperator},
    entities::entities::Variable,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::optimizer::optimize;

fn analyze_source(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.bella".to_string())).unwrap();
    let (_, ast) = parse(tokens, Rc::new("test.bella".to_string()));
    analyze(&ast.unwrap()).unwrap()
}

/// Analyzes `let x=1; print <source>;` and returns `x` with the optimized
/// argument of the print.
fn optimize_expression(source: &str) -> (Rc<Variable>, Expression) {
    let program = optimize(analyze_source(&format!("let x=1; print {};", source)));

    let Statement::VariableDeclaration { variable, .. } = &program.statements[0] else {
        panic!("expected the declaration of x");
    };
    let Statement::PrintStatement { argument } = &program.statements[1] else {
        panic!("expected a print statement");
    };

    (Rc::clone(variable), argument.clone())
}

fn folds_to(source: &str, expected: f64) {
    let (_, optimized) = optimize_expression(source);
    assert_eq!(optimized, Expression::Number(expected), "optimizing {}", source);
}

fn reduces_to_x(source: &str) {
    let (x, optimized) = optimize_expression(source);
    assert!(
        matches!(&optimized, Expression::Variable(variable) if Rc::ptr_eq(variable, &x)),
        "optimizing {} gave {:?}",
        source,
        optimized
    );
}

#[test]
fn test_folds_arithmetic() {
    folds_to("5 + 8", 13.0);
    folds_to("5 - 8", -3.0);
    folds_to("5 * 8", 40.0);
    folds_to("5 / 8", 0.625);
    folds_to("17 % 5", 2.0);
    folds_to("5 ** 8", 390625.0);
    folds_to("-17 % 5", -2.0);
}

#[test]
fn test_folds_comparisons() {
    let (_, optimized) = optimize_expression("3 < 5");
    assert_eq!(optimized, Expression::Boolean(true));

    let (_, optimized) = optimize_expression("3 == 5");
    assert_eq!(optimized, Expression::Boolean(false));

    let (_, optimized) = optimize_expression("2 >= 2");
    assert_eq!(optimized, Expression::Boolean(true));
}

#[test]
fn test_does_not_fold_logical_operators() {
    let (_, optimized) = optimize_expression("1 && 0");
    assert_eq!(optimized, Expression::binary(BinaryOperator::And, Expression::Number(1.0), Expression::Number(0.0)));
}

#[test]
fn test_zero_to_the_zero_is_not_folded() {
    let (_, optimized) = optimize_expression("0 ** 0");
    assert_eq!(optimized, Expression::binary(BinaryOperator::Power, Expression::Number(0.0), Expression::Number(0.0)));
}

#[test]
fn test_identities_keep_the_operand() {
    reduces_to_x("x + 0");
    reduces_to_x("x - 0");
    reduces_to_x("x * 1");
    reduces_to_x("x / 1");
    reduces_to_x("0 + x");
    reduces_to_x("1 * x");
}

#[test]
fn test_identities_to_constants() {
    folds_to("x * 0", 0.0);
    folds_to("0 * x", 0.0);
    folds_to("0 / x", 0.0);
    folds_to("0 % x", 0.0);
    folds_to("1 ** x", 1.0);
    folds_to("x ** 0", 1.0);
}

#[test]
fn test_zero_minus_becomes_negation() {
    let (x, optimized) = optimize_expression("0 - x");
    assert_eq!(optimized, Expression::unary(UnaryOperator::Negate, Expression::Variable(x)));
}

#[test]
fn test_folds_unary_operators() {
    folds_to("- 8", -8.0);
    folds_to("-(2 + 3)", -5.0);

    let (_, optimized) = optimize_expression("!true");
    assert_eq!(optimized, Expression::Boolean(false));
}

#[test]
fn test_folds_intrinsics() {
    folds_to("sqrt(16)", 4.0);
    folds_to("sin(0)", 0.0);
    folds_to("cos(0)", 1.0);
    folds_to("exp(0)", 1.0);
    folds_to("ln(1)", 0.0);
    folds_to("hypot(3, 4)", 5.0);
    folds_to("sqrt(20 + 61)", 9.0);
}

#[test]
fn test_random_is_not_folded() {
    let (_, optimized) = optimize_expression("random()");
    assert!(matches!(optimized, Expression::Call { .. }));
}

#[test]
fn test_user_functions_are_not_folded() {
    let program = optimize(analyze_source("function sqrt2(y) = y; print sqrt2(4);"));
    let Statement::PrintStatement { argument } = &program.statements[1] else {
        panic!("expected a print statement");
    };
    assert!(matches!(argument, Expression::Call { args, .. } if args == &vec![Expression::Number(4.0)]));
}

#[test]
fn test_optimizes_deeply() {
    folds_to("8 * (-5) + 2 ** 3", -32.0);
}

#[test]
fn test_is_ok_with_doing_nothing() {
    let (x, optimized) = optimize_expression("x + 5");
    assert_eq!(optimized, Expression::binary(BinaryOperator::Plus, Expression::Variable(x), Expression::Number(5.0)));
}

#[test]
fn test_collapses_conditionals() {
    folds_to("1 ? 3 : 5", 3.0);
    folds_to("0 ? 3 : 5", 5.0);
    folds_to("true ? 3 : 5", 3.0);
    folds_to("(0 / 0) ? 3 : 5", 5.0);
    folds_to("(2 < 1) ? 3 : 5 + 1", 6.0);
}

#[test]
fn test_keeps_conditionals_with_unknown_tests() {
    let (x, optimized) = optimize_expression("x ? x : 2");
    assert_eq!(
        optimized,
        Expression::conditional(Expression::Variable(Rc::clone(&x)), Expression::Variable(x), Expression::Number(2.0))
    );
}

#[test]
fn test_optimizes_in_function_body() {
    let program = optimize(analyze_source("function f() = 1+1;"));
    let Statement::FunctionDeclaration { params, body, .. } = &program.statements[0] else {
        panic!("expected a function declaration");
    };
    assert!(params.is_empty());
    assert_eq!(body, &Expression::Number(2.0));
}

#[test]
fn test_removes_self_assignment() {
    let program = optimize(analyze_source("let x=1; x=x; print(x);"));
    assert_eq!(program.statements.len(), 2);
    assert!(matches!(program.statements[0], Statement::VariableDeclaration { .. }));
    assert!(matches!(program.statements[1], Statement::PrintStatement { .. }));
}

#[test]
fn test_removes_assignment_that_simplifies_to_self() {
    let program = optimize(analyze_source("let x=1; while true { x = x * 1 + 0; }"));
    let Statement::WhileStatement { body, .. } = &program.statements[1] else {
        panic!("expected a while statement");
    };
    assert!(body.is_empty());
}

#[test]
fn test_keeps_assignment_from_other_variable() {
    let program = optimize(analyze_source("let x=1; let y=2; x=y;"));
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn test_optimizes_while_test() {
    let program = optimize(analyze_source("while sqrt(25) {}"));
    assert_eq!(
        program,
        Program {
            statements: vec![Statement::WhileStatement { test: Expression::Number(5.0), body: vec![] }]
        }
    );
}

#[test]
fn test_keeps_loops_with_false_tests() {
    let program = optimize(analyze_source("while false { print 1; }"));
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_optimizing_twice_changes_nothing() {
    let sources = [
        "let x=1; x=x; print(x);",
        "let x = 2; function f(y) = 0 - y * 1; while x < 10 { x = x + 1 * 1; print f(x) ? hypot(3, 4) : -x; }",
        "print 0 ** 0 + random() * (1 ** 2);",
        "let x = sqrt(2); print !(x < 1) && true;",
    ];

    for source in sources {
        let once = optimize(analyze_source(source));
        let twice = optimize(once.clone());
        assert_eq!(once, twice, "optimizing {} twice", source);
    }
}
