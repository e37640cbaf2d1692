pub mod category;
pub mod task;
pub mod theme;

use thiserror::Error;

/// Returned when a user-facing word does not name a known variant.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Empty optional text is stored as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
