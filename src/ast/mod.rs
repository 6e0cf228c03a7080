/// AST (Abstract Syntax Tree) module
/// Contains the raw tree produced by the parser, before any name is resolved
///
/// Submodules:
/// - ast: The `Stmt` and `Expr` node enums and the operator sets
/// - expressions: Definitions for the expression node structs
/// - statements: Definitions for the statement node structs
pub mod ast;
pub mod expressions;
pub mod statements;
