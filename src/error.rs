//! Error types for the rirekisho crate.

use std::io;

use thiserror::Error;

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the renderer and its configuration layer.
///
/// Building document trees never fails; only the PDF stage and configuration
/// loading produce these.
#[derive(Error, Debug)]
pub enum Error {
    /// None of the configured font families could be loaded.
    #[error("no usable font family found; tried: {}", .attempts.join("; "))]
    FontsUnavailable {
        /// One entry per family/directory combination that was rejected.
        attempts: Vec<String>,
    },

    /// The PDF backend failed while laying out or writing the document.
    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] genpdf::error::Error),

    /// The rendered PDF could not be reopened to stamp its metadata.
    #[error("PDF metadata error: {0}")]
    Metadata(#[from] lopdf::Error),

    /// I/O error while reading configuration or input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}
