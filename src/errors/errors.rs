use std::fmt::Display;

use thiserror::Error;

use crate::{entities::entities::EntityKind, Position};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{position}: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn semantic(error: SemanticError, position: Position) -> Self {
        Error::new(ErrorImpl::Semantic(error), position)
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The semantic error kind, if this error came from analysis.
    pub fn as_semantic(&self) -> Option<&SemanticError> {
        match &self.internal_error {
            ErrorImpl::Semantic(error) => Some(error),
            _ => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::Semantic(semantic) => match semantic {
                SemanticError::AlreadyDeclared { .. } => "AlreadyDeclared",
                SemanticError::NotDeclared { .. } => "NotDeclared",
                SemanticError::WrongEntityKind { .. } => "WrongEntityKind",
                SemanticError::ReadOnlyViolation { .. } => "ReadOnlyViolation",
                SemanticError::ArityMismatch { .. } => "ArityMismatch",
            },
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::Semantic(semantic) => ErrorTip::Suggestion(semantic.to_string()),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// Static-semantic violations. Only the analyzer produces these, and the
/// first one aborts analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("Identifier {name} already declared")]
    AlreadyDeclared { name: String },
    #[error("Identifier {name} not declared")]
    NotDeclared { name: String },
    #[error("{name} is not a {expected}")]
    WrongEntityKind { name: String, expected: EntityKind },
    #[error("{name} is read only")]
    ReadOnlyViolation { name: String },
    #[error("{expected} argument(s) required but {received} passed")]
    ArityMismatch { expected: usize, received: usize },
}
