use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input not found: {0:?}")]
    InputNotFound(PathBuf),

    #[error("Unsupported input format: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("Malformed CoNLL-U at line {line}: {message}")]
    Conllu { line: usize, message: String },

    #[error("Annotation service error: {0}")]
    Annotation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
