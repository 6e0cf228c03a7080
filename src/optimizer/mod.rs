//! Optimization module.
//!
//! This module rewrites an analyzed program into a simpler equivalent one.
//! It performs:
//!
//! - Constant folding of arithmetic, comparisons and intrinsic calls
//! - Algebraic simplifications (`x + 0`, `1 * x`, `x ** 0`, ...)
//! - Collapsing of conditionals with literal tests
//! - Removal of assignments of a variable to itself

pub mod optimizer;

#[cfg(test)]
mod tests;
