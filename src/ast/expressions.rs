use crate::Span;

use super::ast::{BinaryOperator, Expr, UnaryOperator};

// LITERALS

/// Number Expression
/// Represents a numeric literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: f64,
    pub span: Span,
}

/// Boolean Expression
/// Represents `true` or `false` in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// Symbol Expression
/// Represents an identifier in the AST: a raw name token that the analyzer
/// will bind to a variable or a function.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// COMPLEX

/// Call Expression
/// Represents `callee(arguments...)`. Only a plain identifier can be called.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: SymbolExpr,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// Conditional Expression
/// Represents `condition ? consequent : alternate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub condition: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
    pub span: Span,
}

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Prefix Expression
/// Represents a unary `-` or `!` applied to an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: UnaryOperator,
    pub right_expr: Box<Expr>,
    pub span: Span,
}
