use std::{fmt::Display, rc::Rc};

/// A variable, parameter or constant.
///
/// Equality is identity: a `Variable` is only equal to itself.
#[derive(Debug)]
pub struct Variable {
    pub name: String,
    pub read_only: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, read_only: bool) -> Rc<Self> {
        Rc::new(Variable {
            name: name.into(),
            read_only,
        })
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

/// A user function or an intrinsic. Callers cannot tell the two apart.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub param_count: usize,
    pub read_only: bool,
}

impl Function {
    pub fn new(name: impl Into<String>, param_count: usize) -> Rc<Self> {
        Rc::new(Function {
            name: name.into(),
            param_count,
            read_only: true,
        })
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Variable,
    Function,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Variable => write!(f, "variable"),
            EntityKind::Function => write!(f, "function"),
        }
    }
}

/// What a name is bound to in a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Variable(Rc<Variable>),
    Function(Rc<Function>),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Variable(variable) => &variable.name,
            Entity::Function(function) => &function.name,
        }
    }

    pub fn read_only(&self) -> bool {
        match self {
            Entity::Variable(variable) => variable.read_only,
            Entity::Function(function) => function.read_only,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Variable(_) => EntityKind::Variable,
            Entity::Function(_) => EntityKind::Function,
        }
    }
}
