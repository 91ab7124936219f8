//! Program-layer errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramErrorKind {
    Validation,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramError {
    pub kind: ProgramErrorKind,
    pub message: String,
    /// Wire names of required fields that were absent, in declaration order.
    pub missing_fields: Vec<&'static str>,
}

impl ProgramError {
    pub fn new(kind: ProgramErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ProgramErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProgramErrorKind::NotFound, message)
    }

    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        let message = format!("Missing required fields: {}", fields.join(", "));
        Self {
            kind: ProgramErrorKind::Validation,
            message,
            missing_fields: fields,
        }
    }
}

impl Display for ProgramError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ProgramError {}
