//! Failures raised while loading configuration and wiring the service.

use std::error::Error;
use std::fmt::{Display, Formatter};

use sprogram::ProgramError;
use sprovider::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupErrorKind {
    Config,
    Provider,
    Catalog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupError {
    pub kind: StartupErrorKind,
    pub message: String,
}

impl StartupError {
    pub fn new(kind: StartupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(StartupErrorKind::Config, message)
    }
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for StartupError {}

impl From<config::ConfigError> for StartupError {
    fn from(value: config::ConfigError) -> Self {
        Self::config(value.to_string())
    }
}

impl From<ProviderError> for StartupError {
    fn from(value: ProviderError) -> Self {
        Self::new(StartupErrorKind::Provider, value.to_string())
    }
}

impl From<ProgramError> for StartupError {
    fn from(value: ProgramError) -> Self {
        Self::new(StartupErrorKind::Catalog, value.to_string())
    }
}
