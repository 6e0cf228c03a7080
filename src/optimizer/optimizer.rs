use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    analyzer::program::{Expression, Program, Statement},
    ast::ast::{BinaryOperator, UnaryOperator},
    entities::stdlib::{standard_library, StandardLibrary},
};

/// Rewriting state. Holds the standard library so intrinsic calls can be
/// recognised by identity.
pub struct Optimizer {
    pub library: StandardLibrary,
    /// Number of rewrites applied so far
    pub rewrites: usize,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer {
    pub fn new() -> Self {
        Optimizer {
            library: standard_library(),
            rewrites: 0,
        }
    }
}

/// Simplifies an analyzed program. Optimizing an already optimized program
/// changes nothing.
pub fn optimize(program: Program) -> Program {
    let mut optimizer = Optimizer::new();
    let statements = optimize_statements(&mut optimizer, program.statements);
    debug!(rewrites = optimizer.rewrites, "optimized program");

    Program { statements }
}

/// Optimizes a statement list, dropping statements that became no-ops.
pub fn optimize_statements(optimizer: &mut Optimizer, statements: Vec<Statement>) -> Vec<Statement> {
    statements
        .into_iter()
        .filter_map(|statement| optimize_statement(optimizer, statement))
        .collect()
}

pub fn optimize_statement(optimizer: &mut Optimizer, statement: Statement) -> Option<Statement> {
    match statement {
        Statement::VariableDeclaration { variable, initializer } => Some(Statement::VariableDeclaration {
            variable,
            initializer: optimize_expression(optimizer, initializer),
        }),
        Statement::FunctionDeclaration { function, params, body } => Some(Statement::FunctionDeclaration {
            function,
            params,
            body: optimize_expression(optimizer, body),
        }),
        Statement::Assignment { target, source } => {
            let source = optimize_expression(optimizer, source);
            if let Expression::Variable(variable) = &source {
                if Rc::ptr_eq(variable, &target) {
                    debug!(name = %target.name, "removed self assignment");
                    optimizer.rewrites += 1;
                    return None;
                }
            }
            Some(Statement::Assignment { target, source })
        }
        // The loop itself is kept even when its test is a false literal
        Statement::WhileStatement { test, body } => Some(Statement::WhileStatement {
            test: optimize_expression(optimizer, test),
            body: optimize_statements(optimizer, body),
        }),
        Statement::PrintStatement { argument } => Some(Statement::PrintStatement {
            argument: optimize_expression(optimizer, argument),
        }),
    }
}

pub fn optimize_expression(optimizer: &mut Optimizer, expression: Expression) -> Expression {
    match expression {
        Expression::Number(_) | Expression::Boolean(_) | Expression::Variable(_) => expression,
        Expression::Call { callee, args } => {
            let args: Vec<Expression> = args.into_iter().map(|arg| optimize_expression(optimizer, arg)).collect();

            if let Some(intrinsic) = optimizer.library.intrinsic_of(&callee) {
                let values: Option<Vec<f64>> = args.iter().map(Expression::as_number).collect();
                if let Some(result) = values.and_then(|values| intrinsic.evaluate(&values)) {
                    trace!(intrinsic = intrinsic.name(), result, "folded call");
                    optimizer.rewrites += 1;
                    return Expression::Number(result);
                }
            }

            Expression::Call { callee, args }
        }
        Expression::Conditional { test, consequent, alternate } => {
            let test = optimize_expression(optimizer, *test);
            let consequent = optimize_expression(optimizer, *consequent);
            let alternate = optimize_expression(optimizer, *alternate);

            match test.literal_truthiness() {
                Some(truthy) => {
                    debug!(truthy, "collapsed conditional");
                    optimizer.rewrites += 1;
                    if truthy { consequent } else { alternate }
                }
                None => Expression::conditional(test, consequent, alternate),
            }
        }
        Expression::BinaryExpression { op, left, right } => {
            let left = optimize_expression(optimizer, *left);
            let right = optimize_expression(optimizer, *right);

            match simplify_binary(op, &left, &right) {
                Some(simplified) => {
                    trace!(op = %op, "folded binary expression");
                    optimizer.rewrites += 1;
                    simplified.resolve(left, right)
                }
                None => Expression::binary(op, left, right),
            }
        }
        Expression::UnaryExpression { op, operand } => {
            let operand = optimize_expression(optimizer, *operand);

            match (op, &operand) {
                (UnaryOperator::Negate, Expression::Number(value)) => {
                    trace!(value, "folded negation");
                    optimizer.rewrites += 1;
                    Expression::Number(-value)
                }
                (UnaryOperator::Not, Expression::Boolean(value)) => {
                    trace!(value, "folded not");
                    optimizer.rewrites += 1;
                    Expression::Boolean(!value)
                }
                _ => Expression::unary(op, operand),
            }
        }
    }
}

/// The outcome of simplifying a binary expression. Keeping an operand is
/// expressed without cloning it so that entities stay shared.
enum Simplified {
    Value(Expression),
    Left,
    Right,
    NegatedRight,
}

impl Simplified {
    fn resolve(self, left: Expression, right: Expression) -> Expression {
        match self {
            Simplified::Value(value) => value,
            Simplified::Left => left,
            Simplified::Right => right,
            Simplified::NegatedRight => Expression::unary(UnaryOperator::Negate, right),
        }
    }
}

fn simplify_binary(op: BinaryOperator, left: &Expression, right: &Expression) -> Option<Simplified> {
    use BinaryOperator::*;

    let number = |value: f64| Some(Simplified::Value(Expression::Number(value)));
    let boolean = |value: bool| Some(Simplified::Value(Expression::Boolean(value)));

    match (left.as_number(), right.as_number()) {
        (Some(x), Some(y)) => match op {
            Plus => number(x + y),
            Minus => number(x - y),
            Times => number(x * y),
            Divide => number(x / y),
            Modulo => number(x % y),
            // 0 ** 0 is left for the target to evaluate
            Power if x == 0.0 && y == 0.0 => None,
            Power => number(x.powf(y)),
            Less => boolean(x < y),
            LessEquals => boolean(x <= y),
            Equals => boolean(x == y),
            NotEquals => boolean(x != y),
            GreaterEquals => boolean(x >= y),
            Greater => boolean(x > y),
            Or | And => None,
        },
        (Some(x), None) => match op {
            Plus if x == 0.0 => Some(Simplified::Right),
            Times if x == 1.0 => Some(Simplified::Right),
            Minus if x == 0.0 => Some(Simplified::NegatedRight),
            Times | Divide | Modulo if x == 0.0 => number(0.0),
            Power if x == 1.0 => number(1.0),
            _ => None,
        },
        (None, Some(y)) => match op {
            Plus | Minus if y == 0.0 => Some(Simplified::Left),
            Times | Divide if y == 1.0 => Some(Simplified::Left),
            Times if y == 0.0 => number(0.0),
            Power if y == 0.0 => number(1.0),
            _ => None,
        },
        (None, None) => None,
    }
}
