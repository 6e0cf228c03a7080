use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    analyzer::program::{Expression, Program, Statement},
    ast::ast::BinaryOperator,
    entities::{
        entities::{Function, Variable},
        stdlib::{standard_library, Intrinsic, StandardLibrary},
    },
    format_number,
};

/// JavaScript output state.
///
/// Every user entity is renamed to `<name>_<n>`, numbered in the order the
/// generator first meets it, so Bella names that are reserved words in
/// JavaScript (`for`, `class`, ...) still produce valid code.
pub struct Generator {
    pub library: StandardLibrary,
    pub output: Vec<String>,
    target_names: HashMap<*const (), usize>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            library: standard_library(),
            output: vec![],
            target_names: HashMap::new(),
        }
    }

    fn target_name(&mut self, name: &str, key: *const ()) -> String {
        let next = self.target_names.len() + 1;
        let suffix = *self.target_names.entry(key).or_insert(next);
        format!("{}_{}", name, suffix)
    }

    pub fn variable_name(&mut self, variable: &Rc<Variable>) -> String {
        if self.library.is_pi(variable) {
            return String::from("Math.PI");
        }
        self.target_name(&variable.name, Rc::as_ptr(variable) as *const ())
    }

    pub fn function_name(&mut self, function: &Rc<Function>) -> String {
        match self.library.intrinsic_of(function) {
            Some(intrinsic) => String::from(intrinsic_target(intrinsic)),
            None => self.target_name(&function.name, Rc::as_ptr(function) as *const ()),
        }
    }

    fn emit(&mut self, line: String) {
        trace!(line = %line, "emit");
        self.output.push(line);
    }
}

fn intrinsic_target(intrinsic: Intrinsic) -> &'static str {
    match intrinsic {
        Intrinsic::Sqrt => "Math.sqrt",
        Intrinsic::Sin => "Math.sin",
        Intrinsic::Cos => "Math.cos",
        Intrinsic::Exp => "Math.exp",
        Intrinsic::Ln => "Math.log",
        Intrinsic::Hypot => "Math.hypot",
        Intrinsic::Random => "Math.random",
    }
}

/// Translates a program to JavaScript, one statement per line.
pub fn generate(program: &Program) -> String {
    let mut generator = Generator::new();
    for statement in program.statements.iter() {
        gen_statement(&mut generator, statement);
    }

    generator.output.join("\n")
}

pub fn gen_statement(generator: &mut Generator, statement: &Statement) {
    match statement {
        Statement::VariableDeclaration { variable, initializer } => {
            let name = generator.variable_name(variable);
            let initializer = gen_expression(generator, initializer);
            generator.emit(format!("let {} = {};", name, initializer));
        }
        Statement::FunctionDeclaration { function, params, body } => {
            let name = generator.function_name(function);
            let params = params
                .iter()
                .map(|param| generator.variable_name(param))
                .collect::<Vec<_>>()
                .join(", ");
            generator.emit(format!("function {}({}) {{", name, params));
            let body = gen_expression(generator, body);
            generator.emit(format!("return {};", body));
            generator.emit(String::from("}"));
        }
        Statement::Assignment { target, source } => {
            let target = generator.variable_name(target);
            let source = gen_expression(generator, source);
            generator.emit(format!("{} = {};", target, source));
        }
        Statement::WhileStatement { test, body } => {
            let test = gen_expression(generator, test);
            generator.emit(format!("while ({}) {{", test));
            for statement in body.iter() {
                gen_statement(generator, statement);
            }
            generator.emit(String::from("}"));
        }
        Statement::PrintStatement { argument } => {
            let argument = gen_expression(generator, argument);
            generator.emit(format!("console.log({});", argument));
        }
    }
}

pub fn gen_expression(generator: &mut Generator, expression: &Expression) -> String {
    match expression {
        Expression::Number(value) => number_literal(*value),
        Expression::Boolean(value) => value.to_string(),
        Expression::Variable(variable) => generator.variable_name(variable),
        Expression::Call { callee, args } => {
            let args = args
                .iter()
                .map(|arg| gen_expression(generator, arg))
                .collect::<Vec<_>>()
                .join(",");
            let callee = generator.function_name(callee);
            format!("{}({})", callee, args)
        }
        Expression::Conditional { test, consequent, alternate } => format!(
            "(({}) ? ({}) : ({}))",
            gen_expression(generator, test),
            gen_expression(generator, consequent),
            gen_expression(generator, alternate)
        ),
        Expression::BinaryExpression { op, left, right } => {
            let mut base = gen_expression(generator, left);
            // JavaScript rejects a unary operator directly before `**`
            if *op == BinaryOperator::Power && has_leading_sign(left) {
                base = format!("({})", base);
            }
            format!("({} {} {})", base, op, gen_expression(generator, right))
        }
        Expression::UnaryExpression { op, operand } => format!("{}({})", op, gen_expression(generator, operand)),
    }
}

fn number_literal(value: f64) -> String {
    if value == 0.0 && value.is_sign_negative() {
        String::from("-0")
    } else {
        format_number(value)
    }
}

fn has_leading_sign(expression: &Expression) -> bool {
    match expression {
        Expression::UnaryExpression { .. } => true,
        Expression::Number(value) => value.is_sign_negative(),
        _ => false,
    }
}
