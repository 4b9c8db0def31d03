//! Parsing error types
//!
//! Extraction of individual fields never fails; these errors only cover
//! setting up the parser (compiling the configured CSS selectors).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector for '{field}': {selector} - {reason}")]
    InvalidSelector {
        field: String,
        selector: String,
        reason: String,
    },

    #[error("No selector configured for '{field}'")]
    EmptySelector { field: String },
}

impl ParsingError {
    /// Create an invalid selector error
    pub fn invalid_selector(field: &str, selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            field: field.to_string(),
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Name of the selector field that failed
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidSelector { field, .. } | Self::EmptySelector { field } => field,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
