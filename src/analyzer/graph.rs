//! Text dump of program trees.
//!
//! Every node is tagged with an integer in depth-first pre-order and printed
//! on its own line as `tag | Kind field=value ...`. A child that is a node
//! prints as `#tag`, so an entity shared by several uses appears once and is
//! referenced everywhere else. Numbers and booleans print inline, names and
//! operators are single-quoted.
//!
//! The raw tree prints with the same layout, except that names, operators
//! and literals are source tokens, written as `Id("x")`, `Sym("*")`,
//! `Num("3")` and `Bool("true")`.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::SymbolExpr,
        statements::BlockStmt,
    },
    entities::entities::{Function, Variable},
    format_number,
};

use super::program::{Expression, Program, Statement};

enum Field {
    Tag(usize),
    Inline(String),
    List(Vec<Field>),
}

impl Field {
    fn render(&self) -> String {
        match self {
            Field::Tag(tag) => format!("#{}", tag),
            Field::Inline(value) => value.clone(),
            Field::List(items) => format!("[{}]", items.iter().map(Field::render).collect::<Vec<_>>().join(",")),
        }
    }
}

struct Node {
    kind: &'static str,
    fields: Vec<(&'static str, Field)>,
}

#[derive(Default)]
struct Graph {
    nodes: Vec<Node>,
    // Entities already tagged, keyed by address
    entities: HashMap<*const (), usize>,
}

impl Graph {
    /// Reserves the next tag for a node whose fields are filled in later.
    fn open(&mut self, kind: &'static str) -> usize {
        self.nodes.push(Node { kind, fields: vec![] });
        self.nodes.len()
    }

    fn close(&mut self, tag: usize, fields: Vec<(&'static str, Field)>) -> Field {
        self.nodes[tag - 1].fields = fields;
        Field::Tag(tag)
    }

    fn render(&self) -> String {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let mut line = format!("{:>4} | {}", index + 1, node.kind);
                for (name, field) in node.fields.iter() {
                    line.push_str(&format!(" {}={}", name, field.render()));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn variable(&mut self, variable: &Rc<Variable>) -> Field {
        let key = Rc::as_ptr(variable) as *const ();
        if let Some(tag) = self.entities.get(&key) {
            return Field::Tag(*tag);
        }

        let tag = self.open("Variable");
        self.entities.insert(key, tag);
        self.close(tag, vec![
            ("name", quoted(&variable.name)),
            ("readOnly", Field::Inline(variable.read_only.to_string())),
        ])
    }

    fn function(&mut self, function: &Rc<Function>) -> Field {
        let key = Rc::as_ptr(function) as *const ();
        if let Some(tag) = self.entities.get(&key) {
            return Field::Tag(*tag);
        }

        let tag = self.open("Function");
        self.entities.insert(key, tag);
        self.close(tag, vec![
            ("name", quoted(&function.name)),
            ("paramCount", Field::Inline(function.param_count.to_string())),
            ("readOnly", Field::Inline(function.read_only.to_string())),
        ])
    }

    fn statements(&mut self, statements: &[Statement]) -> Field {
        Field::List(statements.iter().map(|statement| self.statement(statement)).collect())
    }

    fn statement(&mut self, statement: &Statement) -> Field {
        match statement {
            Statement::VariableDeclaration { variable, initializer } => {
                let tag = self.open("VariableDeclaration");
                let fields = vec![
                    ("variable", self.variable(variable)),
                    ("initializer", self.expression(initializer)),
                ];
                self.close(tag, fields)
            }
            Statement::FunctionDeclaration { function, params, body } => {
                let tag = self.open("FunctionDeclaration");
                let fields = vec![
                    ("fun", self.function(function)),
                    ("params", Field::List(params.iter().map(|param| self.variable(param)).collect())),
                    ("body", self.expression(body)),
                ];
                self.close(tag, fields)
            }
            Statement::Assignment { target, source } => {
                let tag = self.open("Assignment");
                let fields = vec![("target", self.variable(target)), ("source", self.expression(source))];
                self.close(tag, fields)
            }
            Statement::WhileStatement { test, body } => {
                let tag = self.open("WhileStatement");
                let fields = vec![("test", self.expression(test)), ("body", self.statements(body))];
                self.close(tag, fields)
            }
            Statement::PrintStatement { argument } => {
                let tag = self.open("PrintStatement");
                let fields = vec![("argument", self.expression(argument))];
                self.close(tag, fields)
            }
        }
    }

    fn expression(&mut self, expression: &Expression) -> Field {
        match expression {
            Expression::Number(value) => Field::Inline(format_number(*value)),
            Expression::Boolean(value) => Field::Inline(value.to_string()),
            Expression::Variable(variable) => self.variable(variable),
            Expression::Call { callee, args } => {
                let tag = self.open("Call");
                let fields = vec![
                    ("callee", self.function(callee)),
                    ("args", Field::List(args.iter().map(|arg| self.expression(arg)).collect())),
                ];
                self.close(tag, fields)
            }
            Expression::Conditional { test, consequent, alternate } => {
                let tag = self.open("Conditional");
                let fields = vec![
                    ("test", self.expression(test)),
                    ("consequent", self.expression(consequent)),
                    ("alternate", self.expression(alternate)),
                ];
                self.close(tag, fields)
            }
            Expression::BinaryExpression { op, left, right } => {
                let tag = self.open("BinaryExpression");
                let fields = vec![
                    ("op", quoted(op.as_str())),
                    ("left", self.expression(left)),
                    ("right", self.expression(right)),
                ];
                self.close(tag, fields)
            }
            Expression::UnaryExpression { op, operand } => {
                let tag = self.open("UnaryExpression");
                let fields = vec![("op", quoted(op.as_str())), ("operand", self.expression(operand))];
                self.close(tag, fields)
            }
        }
    }

    fn raw_block(&mut self, block: &BlockStmt) -> Field {
        Field::List(block.iter().map(|stmt| self.raw_stmt(stmt)).collect())
    }

    fn raw_stmt(&mut self, stmt: &Stmt) -> Field {
        match stmt {
            Stmt::VarDecl(declaration) => {
                let tag = self.open("VariableDeclaration");
                let fields = vec![
                    ("variable", id(&declaration.identifier)),
                    ("initializer", self.raw_expr(&declaration.initializer)),
                ];
                self.close(tag, fields)
            }
            Stmt::FnDecl(declaration) => {
                let tag = self.open("FunctionDeclaration");
                let fields = vec![
                    ("fun", id(&declaration.identifier)),
                    ("params", Field::List(declaration.parameters.iter().map(id).collect())),
                    ("body", self.raw_expr(&declaration.body)),
                ];
                self.close(tag, fields)
            }
            Stmt::Assignment(assignment) => {
                let tag = self.open("Assignment");
                let fields = vec![("target", id(&assignment.assignee)), ("source", self.raw_expr(&assignment.value))];
                self.close(tag, fields)
            }
            Stmt::While(while_stmt) => {
                let tag = self.open("WhileStatement");
                let fields = vec![("test", self.raw_expr(&while_stmt.condition)), ("body", self.raw_block(&while_stmt.body))];
                self.close(tag, fields)
            }
            Stmt::Print(print) => {
                let tag = self.open("PrintStatement");
                let fields = vec![("argument", self.raw_expr(&print.argument))];
                self.close(tag, fields)
            }
        }
    }

    fn raw_expr(&mut self, expr: &Expr) -> Field {
        match expr {
            Expr::Number(number) => token("Num", &format_number(number.value)),
            Expr::Boolean(boolean) => token("Bool", &boolean.value.to_string()),
            Expr::Symbol(symbol) => id(symbol),
            Expr::Call(call) => {
                let tag = self.open("Call");
                let fields = vec![
                    ("callee", id(&call.callee)),
                    ("args", Field::List(call.arguments.iter().map(|arg| self.raw_expr(arg)).collect())),
                ];
                self.close(tag, fields)
            }
            Expr::Conditional(conditional) => {
                let tag = self.open("Conditional");
                let fields = vec![
                    ("test", self.raw_expr(&conditional.condition)),
                    ("consequent", self.raw_expr(&conditional.consequent)),
                    ("alternate", self.raw_expr(&conditional.alternate)),
                ];
                self.close(tag, fields)
            }
            Expr::Binary(binary) => {
                let tag = self.open("BinaryExpression");
                let fields = vec![
                    ("op", token("Sym", binary.operator.as_str())),
                    ("left", self.raw_expr(&binary.left)),
                    ("right", self.raw_expr(&binary.right)),
                ];
                self.close(tag, fields)
            }
            Expr::Prefix(prefix) => {
                let tag = self.open("UnaryExpression");
                let fields = vec![
                    ("op", token("Sym", prefix.operator.as_str())),
                    ("operand", self.raw_expr(&prefix.right_expr)),
                ];
                self.close(tag, fields)
            }
        }
    }
}

fn quoted(value: &str) -> Field {
    Field::Inline(format!("'{}'", value))
}

fn token(category: &str, lexeme: &str) -> Field {
    Field::Inline(format!("{}(\"{}\")", category, lexeme))
}

fn id(symbol: &SymbolExpr) -> Field {
    token("Id", &symbol.value)
}

/// Dumps an analyzed (or optimized) program.
pub fn stringify(program: &Program) -> String {
    let mut graph = Graph::default();
    let tag = graph.open("Program");
    let statements = graph.statements(&program.statements);
    graph.close(tag, vec![("statements", statements)]);
    graph.render()
}

/// Dumps a raw tree straight from the parser.
pub fn stringify_ast(ast: &BlockStmt) -> String {
    let mut graph = Graph::default();
    let tag = graph.open("Program");
    let statements = graph.raw_block(ast);
    graph.close(tag, vec![("statements", statements)]);
    graph.render()
}
