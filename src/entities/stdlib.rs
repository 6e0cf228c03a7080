use std::rc::Rc;

use super::entities::{Entity, Function, Variable};

/// The built-in functions. Every one except `random` is a pure function of
/// its numeric arguments and can be evaluated at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intrinsic {
    Sqrt,
    Sin,
    Cos,
    Exp,
    Ln,
    Hypot,
    Random,
}

impl Intrinsic {
    pub const ALL: [Intrinsic; 7] = [
        Intrinsic::Sqrt,
        Intrinsic::Sin,
        Intrinsic::Cos,
        Intrinsic::Exp,
        Intrinsic::Ln,
        Intrinsic::Hypot,
        Intrinsic::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Intrinsic::Sqrt => "sqrt",
            Intrinsic::Sin => "sin",
            Intrinsic::Cos => "cos",
            Intrinsic::Exp => "exp",
            Intrinsic::Ln => "ln",
            Intrinsic::Hypot => "hypot",
            Intrinsic::Random => "random",
        }
    }

    pub fn param_count(&self) -> usize {
        match self {
            Intrinsic::Random => 0,
            Intrinsic::Hypot => 2,
            _ => 1,
        }
    }

    /// Computes the result for literal arguments, or `None` when the
    /// intrinsic cannot be evaluated ahead of time.
    pub fn evaluate(&self, args: &[f64]) -> Option<f64> {
        match (self, args) {
            (Intrinsic::Sqrt, [x]) => Some(x.sqrt()),
            (Intrinsic::Sin, [x]) => Some(x.sin()),
            (Intrinsic::Cos, [x]) => Some(x.cos()),
            (Intrinsic::Exp, [x]) => Some(x.exp()),
            (Intrinsic::Ln, [x]) => Some(x.ln()),
            (Intrinsic::Hypot, [x, y]) => Some(x.hypot(*y)),
            _ => None,
        }
    }
}

/// The frozen table of pre-declared entities.
///
/// There is one table per thread. Cloning it clones handles, so entities
/// obtained from any clone are identical to those installed in the root scope.
#[derive(Debug, Clone)]
pub struct StandardLibrary {
    pub pi: Rc<Variable>,
    functions: Vec<(Intrinsic, Rc<Function>)>,
}

thread_local! {
    static STANDARD_LIBRARY: StandardLibrary = StandardLibrary::build();
}

/// Returns this thread's standard library.
pub fn standard_library() -> StandardLibrary {
    STANDARD_LIBRARY.with(|library| library.clone())
}

impl StandardLibrary {
    fn build() -> Self {
        StandardLibrary {
            pi: Variable::new("π", true),
            functions: Intrinsic::ALL
                .iter()
                .map(|intrinsic| (*intrinsic, Function::new(intrinsic.name(), intrinsic.param_count())))
                .collect(),
        }
    }

    /// Every entity with the name it is declared under.
    pub fn entities(&self) -> Vec<(String, Entity)> {
        let mut entities = vec![(self.pi.name.clone(), Entity::Variable(Rc::clone(&self.pi)))];
        for (_, function) in self.functions.iter() {
            entities.push((function.name.clone(), Entity::Function(Rc::clone(function))));
        }
        entities
    }

    #[cfg(test)]
    pub fn function(&self, intrinsic: Intrinsic) -> Rc<Function> {
        self.functions
            .iter()
            .find(|(candidate, _)| *candidate == intrinsic)
            .map(|(_, function)| Rc::clone(function))
            .unwrap_or_else(|| unreachable!("every intrinsic is in the table"))
    }

    /// Identifies `function` as an intrinsic by identity, never by name.
    pub fn intrinsic_of(&self, function: &Rc<Function>) -> Option<Intrinsic> {
        self.functions
            .iter()
            .find(|(_, candidate)| Rc::ptr_eq(candidate, function))
            .map(|(intrinsic, _)| *intrinsic)
    }

    pub fn is_pi(&self, variable: &Rc<Variable>) -> bool {
        Rc::ptr_eq(&self.pi, variable)
    }
}
