//! Error type raised by the sizing engine.

use thiserror::Error;

/// Rejection of a sizing request.
///
/// The engine has a single failure mode: a value outside its accepted domain.
/// Callers are expected to surface the message and re-prompt; nothing here is
/// retried or partially computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    /// A usage, demand, or assumption value violated its precondition.
    #[error("invalid input: `{field}` {message}")]
    InvalidInput {
        /// Name of the offending field (e.g. `"backup_hours"`).
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
}

impl SizingError {
    pub(crate) fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Name of the field that caused the rejection.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}
