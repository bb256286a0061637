//! Error types for the editor core.
//!
//! Fallible I/O (remote store, wire mapping, configuration) is represented by
//! the `EditorError` enum. Graph edits never produce an `EditorError`; they are
//! rejected through [`crate::Rejection`] and reported as notices.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all fallible editor operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Wire/domain conversion errors (JSON, unknown discriminants, etc.).
    #[error("{0}")]
    Convert(String),

    /// Remote store errors (network, status codes, missing records).
    #[error("{0}")]
    Store(String),

    /// Workflow definition errors.
    #[error("{0}")]
    Workflow(String),

    /// Node definition errors.
    #[error("{0}")]
    Node(String),

    /// Edge definition errors.
    #[error("{0}")]
    Edge(String),

    /// Session lifecycle errors (nothing open, etc.).
    #[error("{0}")]
    Session(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<EditorError> for String {
    fn from(val: EditorError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for EditorError {
    fn from(error: std::io::Error) -> Self {
        EditorError::IoError(error.to_string())
    }
}

impl From<EditorError> for std::io::Error {
    fn from(val: EditorError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(error: serde_json::Error) -> Self {
        EditorError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for EditorError {
    fn from(error: toml::de::Error) -> Self {
        EditorError::Config(error.to_string())
    }
}

impl From<reqwest::Error> for EditorError {
    fn from(error: reqwest::Error) -> Self {
        EditorError::Store(error.to_string())
    }
}
