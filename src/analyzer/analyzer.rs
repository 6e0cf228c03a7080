use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::SymbolExpr,
        statements::{BlockStmt, FnDeclStmt},
    },
    entities::{
        entities::{Entity, EntityKind, Function, Variable},
        stdlib::standard_library,
    },
    errors::errors::{Error, SemanticError},
    Position,
};

use super::program::{Expression, Program, Statement};

/// One scope frame: the names declared directly in it.
#[derive(Debug, Default)]
pub struct Environment {
    pub lookup: HashMap<String, Entity>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            lookup: HashMap::new(),
        }
    }

    pub fn declare(&mut self, name: &str, entity: Entity, position: Position) -> Result<(), Error> {
        if self.lookup.contains_key(name) {
            Err(Error::semantic(SemanticError::AlreadyDeclared { name: name.to_string() }, position))
        } else {
            self.lookup.insert(name.to_string(), entity);
            Ok(())
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.lookup.get(name)
    }
}

/// Resolution state: the stack of open scopes, root first.
#[derive(Debug)]
pub struct Analyzer {
    pub environments: Vec<Environment>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Creates an analyzer whose root scope holds the standard library.
    pub fn new() -> Self {
        let mut root = Environment::new();
        for (name, entity) in standard_library().entities() {
            root.lookup.insert(name, entity);
        }

        Analyzer {
            environments: vec![root],
        }
    }

    pub fn push_environment(&mut self) {
        self.environments.push(Environment::new());
        trace!(depth = self.depth(), "entered scope");
    }

    pub fn pop_environment(&mut self) {
        // The root scope is never popped
        if self.environments.len() > 1 {
            self.environments.pop();
            trace!(depth = self.depth(), "left scope");
        }
    }

    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    pub fn declare(&mut self, name: &str, entity: Entity, position: Position) -> Result<(), Error> {
        let kind = entity.kind();
        let current = self.environments.len() - 1;
        self.environments[current].declare(name, entity, position)?;
        trace!(name, %kind, depth = self.depth(), "declared");
        Ok(())
    }

    /// Finds the innermost binding for `name`.
    pub fn lookup(&self, name: &str) -> Option<Entity> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get(name))
            .cloned()
    }

    fn resolve(&self, symbol: &SymbolExpr) -> Result<Entity, Error> {
        self.lookup(&symbol.value).ok_or_else(|| {
            Error::semantic(SemanticError::NotDeclared { name: symbol.value.clone() }, symbol.span.start.clone())
        })
    }

    fn resolve_variable(&self, symbol: &SymbolExpr) -> Result<Rc<Variable>, Error> {
        match self.resolve(symbol)? {
            Entity::Variable(variable) => Ok(variable),
            Entity::Function(_) => Err(wrong_kind(symbol, EntityKind::Variable)),
        }
    }

    fn resolve_function(&self, symbol: &SymbolExpr) -> Result<Rc<Function>, Error> {
        match self.resolve(symbol)? {
            Entity::Function(function) => Ok(function),
            Entity::Variable(_) => Err(wrong_kind(symbol, EntityKind::Function)),
        }
    }
}

fn wrong_kind(symbol: &SymbolExpr, expected: EntityKind) -> Error {
    Error::semantic(
        SemanticError::WrongEntityKind { name: symbol.value.clone(), expected },
        symbol.span.start.clone(),
    )
}

/// Resolves every name in `ast`, producing the analyzed program or the first
/// semantic error.
pub fn analyze(ast: &BlockStmt) -> Result<Program, Error> {
    let mut analyzer = Analyzer::new();
    let statements = analyze_block(&mut analyzer, ast)?;

    Ok(Program { statements })
}

pub fn analyze_block(analyzer: &mut Analyzer, block: &BlockStmt) -> Result<Vec<Statement>, Error> {
    block.iter().map(|stmt| analyze_stmt(analyzer, stmt)).collect()
}

pub fn analyze_stmt(analyzer: &mut Analyzer, stmt: &Stmt) -> Result<Statement, Error> {
    match stmt {
        Stmt::VarDecl(declaration) => {
            // The initializer is resolved before the name comes into scope
            let initializer = analyze_expr(analyzer, &declaration.initializer)?;
            let name = &declaration.identifier.value;
            let variable = Variable::new(name.as_str(), false);
            analyzer.declare(name, Entity::Variable(Rc::clone(&variable)), declaration.identifier.span.start.clone())?;

            Ok(Statement::VariableDeclaration { variable, initializer })
        }
        Stmt::FnDecl(declaration) => {
            let name = &declaration.identifier.value;
            let function = Function::new(name.as_str(), declaration.parameters.len());
            // Declared before the body so that it may call itself
            analyzer.declare(name, Entity::Function(Rc::clone(&function)), declaration.identifier.span.start.clone())?;

            analyzer.push_environment();
            let result = analyze_fn_body(analyzer, declaration);
            analyzer.pop_environment();
            let (params, body) = result?;

            Ok(Statement::FunctionDeclaration { function, params, body })
        }
        Stmt::Assignment(assignment) => {
            let target = match analyzer.resolve(&assignment.assignee)? {
                Entity::Variable(variable) if !variable.read_only => variable,
                // Functions are always read only
                entity => {
                    return Err(Error::semantic(
                        SemanticError::ReadOnlyViolation { name: entity.name().to_string() },
                        assignment.assignee.span.start.clone(),
                    ))
                }
            };
            let source = analyze_expr(analyzer, &assignment.value)?;

            Ok(Statement::Assignment { target, source })
        }
        Stmt::While(while_stmt) => {
            let test = analyze_expr(analyzer, &while_stmt.condition)?;
            let body = analyze_block(analyzer, &while_stmt.body)?;

            Ok(Statement::WhileStatement { test, body })
        }
        Stmt::Print(print) => Ok(Statement::PrintStatement {
            argument: analyze_expr(analyzer, &print.argument)?,
        }),
    }
}

fn analyze_fn_body(analyzer: &mut Analyzer, declaration: &FnDeclStmt) -> Result<(Vec<Rc<Variable>>, Expression), Error> {
    let mut params = Vec::with_capacity(declaration.parameters.len());
    for parameter in declaration.parameters.iter() {
        let variable = Variable::new(parameter.value.as_str(), true);
        analyzer.declare(&parameter.value, Entity::Variable(Rc::clone(&variable)), parameter.span.start.clone())?;
        params.push(variable);
    }

    let body = analyze_expr(analyzer, &declaration.body)?;
    Ok((params, body))
}

pub fn analyze_expr(analyzer: &mut Analyzer, expr: &Expr) -> Result<Expression, Error> {
    match expr {
        Expr::Number(number) => Ok(Expression::Number(number.value)),
        Expr::Boolean(boolean) => Ok(Expression::Boolean(boolean.value)),
        Expr::Symbol(symbol) => Ok(Expression::Variable(analyzer.resolve_variable(symbol)?)),
        Expr::Call(call) => {
            let callee = analyzer.resolve_function(&call.callee)?;
            let args = call
                .arguments
                .iter()
                .map(|argument| analyze_expr(analyzer, argument))
                .collect::<Result<Vec<_>, Error>>()?;

            if args.len() != callee.param_count {
                return Err(Error::semantic(
                    SemanticError::ArityMismatch { expected: callee.param_count, received: args.len() },
                    call.callee.span.start.clone(),
                ));
            }

            Ok(Expression::Call { callee, args })
        }
        Expr::Conditional(conditional) => Ok(Expression::conditional(
            analyze_expr(analyzer, &conditional.condition)?,
            analyze_expr(analyzer, &conditional.consequent)?,
            analyze_expr(analyzer, &conditional.alternate)?,
        )),
        Expr::Binary(binary) => Ok(Expression::binary(
            binary.operator,
            analyze_expr(analyzer, &binary.left)?,
            analyze_expr(analyzer, &binary.right)?,
        )),
        Expr::Prefix(prefix) => Ok(Expression::unary(prefix.operator, analyze_expr(analyzer, &prefix.right_expr)?)),
    }
}
