//! JavaScript code generation.
//!
//! Translates an analyzed (usually optimized) program into JavaScript source.
//! Standard library entities map onto `Math`, every other entity gets a
//! unique suffixed name.

pub mod generator;

#[cfg(test)]
mod tests;
