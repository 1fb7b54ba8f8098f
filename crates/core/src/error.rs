//! Collaborator-fault error model.

use thiserror::Error;

/// Result type for calls into external collaborators (role/credential stores).
pub type StoreResult<T> = Result<T, StoreError>;

/// Opaque fault from an external collaborator.
///
/// Business-rule rejections are *not* represented here; they get their own
/// typed variants at the call site. A `StoreError` means the collaborator
/// itself misbehaved, and the boundary must render it as a generic server
/// error without exposing the contained detail to the caller (the detail is
/// for logs only).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("store fault: {detail}")]
pub struct StoreError {
    detail: String,
}

impl StoreError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Internal detail, intended for logging only.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_detail() {
        let err = StoreError::new("connection reset");
        assert_eq!(err.to_string(), "store fault: connection reset");
        assert_eq!(err.detail(), "connection reset");
    }
}
