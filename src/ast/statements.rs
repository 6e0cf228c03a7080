use std::slice::Iter;

use crate::Span;

use super::{ast::{Expr, Stmt}, expressions::SymbolExpr};

/// A sequence of statements: the whole program, or a loop body.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// `let x = initializer;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: SymbolExpr,
    pub initializer: Expr,
    pub span: Span
}

/// `function f(a, b) = body;`
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: SymbolExpr,
    pub parameters: Vec<SymbolExpr>,
    pub body: Expr,
    pub span: Span
}

/// `x = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub assignee: SymbolExpr,
    pub value: Expr,
    pub span: Span
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub argument: Expr,
    pub span: Span
}
