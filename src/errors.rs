//! Error types for rule-tree validation
//!
//! Two classes of failure exist and they travel differently:
//!
//! - Authoring errors (`RULE_INVALID`, `RULE_UNKNOWN_TYPE`) mean the rule
//!   tree itself is broken. They propagate out of the top-level call and
//!   abort the walk.
//! - Data errors (constraint violations, missing required fields) are
//!   never represented here. They are collected per path in
//!   [`ValidationErrors`](crate::ValidationErrors).
//!
//! Ingestion failures (`RULE_INGEST_FAILED`, `RULE_IO_FAILED`) happen at
//! the boundary, before any evaluation starts.

use std::fmt;

use thiserror::Error;

/// Severity levels for validator errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request is rejected; the caller can fix the rule tree or input
    Reject,
    /// The environment failed underneath the validator
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Result type for validator operations
pub type ValidatorResult<T> = Result<T, ValidatorError>;

/// Errors that abort a validation call
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The rule tree is structurally malformed
    #[error("Invalid rule at '{path}': {reason}")]
    InvalidRule {
        /// Data path of the rule set holding the malformed rule
        path: String,
        /// What is wrong with the rule
        reason: String,
    },

    /// A rule references a type name outside the supported set
    #[error("Unknown rule type '{0}'")]
    UnknownType(String),

    /// Rules or data could not be converted into the validator's model
    #[error("Failed to ingest value: {0}")]
    Ingest(#[from] serde_json::Error),

    /// A rule file could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl ValidatorError {
    /// Create an invalid rule error
    ///
    /// An empty path is reported as `$root`.
    pub fn invalid_rule(path: &str, reason: impl Into<String>) -> Self {
        let path = if path.is_empty() { "$root" } else { path };
        ValidatorError::InvalidRule {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an IO error for the given file
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ValidatorError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ValidatorError::InvalidRule { .. } => "RULE_INVALID",
            ValidatorError::UnknownType(_) => "RULE_UNKNOWN_TYPE",
            ValidatorError::Ingest(_) => "RULE_INGEST_FAILED",
            ValidatorError::Io { .. } => "RULE_IO_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ValidatorError::Io { .. } => Severity::Fatal,
            _ => Severity::Reject,
        }
    }

    /// Returns whether this error signals a defect in the rule tree
    pub fn is_authoring_error(&self) -> bool {
        matches!(
            self,
            ValidatorError::InvalidRule { .. } | ValidatorError::UnknownType(_)
        )
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
