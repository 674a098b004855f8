use thiserror::Error;

/// Errors that can occur during local search optimization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocalSearchError {
    /// An optimizer or schedule parameter is out of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Human readable constraint that was violated
        reason: String,
    },
}

impl LocalSearchError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
