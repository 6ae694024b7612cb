//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic business failure with its own stable
/// [`ErrorCode`]. Variants are never merged or coerced into one another so the
/// presentation layer can localise per code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No type record with the requested identifier exists.
    #[error("not found")]
    NotFound,

    /// A value failed validation (malformed or out-of-range input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Another type record already uses this name.
    #[error("duplicate type name: {0}")]
    DuplicateName(String),

    /// A stage token outside the closed stage enumeration.
    #[error("invalid stage: {0}")]
    InvalidStage(String),

    /// The target stage is not strictly after the source stage.
    #[error("invalid stage transition: {from} -> {to}")]
    InvalidStageTransition {
        from: &'static str,
        to: &'static str,
    },

    /// The source stage holds fewer units than requested.
    #[error("insufficient quantity in {stage}: available {available}, requested {requested}")]
    InsufficientQty {
        stage: &'static str,
        available: u64,
        requested: u64,
    },

    /// An import document failed structural validation.
    #[error("invalid import format: {0}")]
    InvalidImportFormat(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    pub fn invalid_stage(token: impl Into<String>) -> Self {
        Self::InvalidStage(token.into())
    }

    pub fn invalid_import(msg: impl Into<String>) -> Self {
        Self::InvalidImportFormat(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Stable code for this error kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::NotFound => ErrorCode::NotFound,
            DomainError::Validation(_) => ErrorCode::Validation,
            DomainError::DuplicateName(_) => ErrorCode::DuplicateTypeName,
            DomainError::InvalidStage(_) => ErrorCode::InvalidStage,
            DomainError::InvalidStageTransition { .. } => ErrorCode::InvalidStageTransition,
            DomainError::InsufficientQty { .. } => ErrorCode::InsufficientQty,
            DomainError::InvalidImportFormat(_) => ErrorCode::InvalidImportFormat,
        }
    }
}

/// Wire-stable error codes, one per [`DomainError`] kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "ERR_NOT_FOUND")]
    NotFound,
    #[serde(rename = "ERR_VALIDATION")]
    Validation,
    #[serde(rename = "ERR_DUPLICATE_TYPE_NAME")]
    DuplicateTypeName,
    #[serde(rename = "ERR_INVALID_STAGE")]
    InvalidStage,
    #[serde(rename = "ERR_INVALID_STAGE_TRANSITION")]
    InvalidStageTransition,
    #[serde(rename = "ERR_INSUFFICIENT_QTY")]
    InsufficientQty,
    #[serde(rename = "ERR_INVALID_IMPORT_FORMAT")]
    InvalidImportFormat,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "ERR_NOT_FOUND",
            ErrorCode::Validation => "ERR_VALIDATION",
            ErrorCode::DuplicateTypeName => "ERR_DUPLICATE_TYPE_NAME",
            ErrorCode::InvalidStage => "ERR_INVALID_STAGE",
            ErrorCode::InvalidStageTransition => "ERR_INVALID_STAGE_TRANSITION",
            ErrorCode::InsufficientQty => "ERR_INSUFFICIENT_QTY",
            ErrorCode::InvalidImportFormat => "ERR_INVALID_IMPORT_FORMAT",
        }
    }

    /// Default human-readable message for the code.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "Miniature type not found.",
            ErrorCode::Validation => "Request validation failed.",
            ErrorCode::DuplicateTypeName => "Miniature type with this name already exists.",
            ErrorCode::InvalidStage => "Unknown stage.",
            ErrorCode::InvalidStageTransition => "Transition must move forward in the pipeline.",
            ErrorCode::InsufficientQty => {
                "Requested quantity exceeds available items in source stage."
            }
            ErrorCode::InvalidImportFormat => "Import payload is invalid.",
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_code() {
        let errors = [
            DomainError::not_found(),
            DomainError::validation("x"),
            DomainError::duplicate_name("x"),
            DomainError::invalid_stage("x"),
            DomainError::InvalidStageTransition {
                from: "DONE",
                to: "IN_BOX",
            },
            DomainError::InsufficientQty {
                stage: "IN_BOX",
                available: 0,
                requested: 1,
            },
            DomainError::invalid_import("x"),
        ];

        let mut codes: Vec<&str> = errors.iter().map(|e| e.code().as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn display_matches_wire_string() {
        assert_eq!(ErrorCode::InsufficientQty.to_string(), "ERR_INSUFFICIENT_QTY");
        assert_eq!(
            DomainError::invalid_import("bad").code().as_str(),
            "ERR_INVALID_IMPORT_FORMAT"
        );
    }
}
