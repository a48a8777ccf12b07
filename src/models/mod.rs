//! Data models for the PKI admin forms
//!
//! This module contains the data structures shared by the rule engine and the
//! form controller:
//! - Lifecycle actions and entity kinds
//! - Field descriptors, roles and highlights
//! - Field policies produced by the enablement engine

pub mod action;
pub mod field;
pub mod policy;

pub use action::*;
pub use field::*;
pub use policy::*;

/// Errors raised at the fallible edges (parsing, configuration loading).
///
/// The rule engine itself is total and never produces these.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unknown lifecycle action '{0}'")]
    UnknownAction(String),

    #[error("Unknown entity kind '{0}'")]
    UnknownEntityKind(String),

    #[error("Unknown policy variant '{0}'")]
    UnknownVariant(String),

    #[error("Unsupported file extension: {0}")]
    UnsupportedFormat(String),

    #[error("No file extension found: {0}")]
    MissingExtension(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Field '{0}' is not on the form")]
    UnknownField(String),

    #[error("Invalid event '{0}'")]
    InvalidEvent(String),
}
