//! Program entities.
//!
//! Every identifier in an analyzed program refers to one of these. Entities
//! are shared through `Rc` handles and compare by identity, so two variables
//! called `x` declared in different scopes are never equal.
//!
//! - entities: variables, functions and their kinds
//! - stdlib: the frozen standard library installed in the root scope

pub mod entities;
pub mod stdlib;
