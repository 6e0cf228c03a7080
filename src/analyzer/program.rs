use std::rc::Rc;

use crate::{
    ast::ast::{BinaryOperator, UnaryOperator},
    entities::entities::{Function, Variable},
};

/// The analyzed program. Every identifier has been replaced by the entity it
/// refers to, so two uses of the same variable hold the same `Rc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VariableDeclaration {
        variable: Rc<Variable>,
        initializer: Expression,
    },
    FunctionDeclaration {
        function: Rc<Function>,
        params: Vec<Rc<Variable>>,
        body: Expression,
    },
    Assignment {
        target: Rc<Variable>,
        source: Expression,
    },
    WhileStatement {
        test: Expression,
        body: Vec<Statement>,
    },
    PrintStatement {
        argument: Expression,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Boolean(bool),
    Variable(Rc<Variable>),
    Call {
        callee: Rc<Function>,
        args: Vec<Expression>,
    },
    Conditional {
        test: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
    },
    BinaryExpression {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    UnaryExpression {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::BinaryExpression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::UnaryExpression {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn conditional(test: Expression, consequent: Expression, alternate: Expression) -> Self {
        Expression::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expression::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Truthiness of a literal: `true`, or a number other than 0 and NaN.
    /// `None` when the expression is not a literal.
    pub fn literal_truthiness(&self) -> Option<bool> {
        match self {
            Expression::Boolean(value) => Some(*value),
            Expression::Number(value) => Some(*value != 0.0 && !value.is_nan()),
            _ => None,
        }
    }
}
