//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - Syntax errors from the lexer and parser
//! - The semantic error taxonomy produced by the analyzer
//! - Error names and suggestions for reporting

pub mod errors;
