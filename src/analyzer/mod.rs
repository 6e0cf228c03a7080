//! Semantic analysis module.
//!
//! This module resolves every identifier in the raw tree to the entity it
//! names and produces the analyzed program. It:
//!
//! - Maintains a stack of scopes rooted in the standard library
//! - Rejects duplicate declarations, undeclared names and misused entities
//! - Enforces read-only entities and call arity
//!
//! It also holds the analyzed tree types and the graph printer used to dump
//! both raw and analyzed trees.

pub mod analyzer;
pub mod graph;
pub mod program;
