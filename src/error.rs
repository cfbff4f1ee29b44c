//! Error types for the ambient CLI/service layer.
//!
//! The rendering engine itself never fails on content (a malformed or even
//! empty document simply renders to `""`); `InscriptisError` only covers the
//! I/O-adjacent failures that surround it — reading input, fetching a URL,
//! parsing an annotation-rules file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InscriptisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not fetch URL: {0}")]
    Fetch(String),

    #[error("invalid annotation rules: {0}")]
    AnnotationRules(#[from] serde_json::Error),
}

pub type InscriptisResult<T> = Result<T, InscriptisError>;
