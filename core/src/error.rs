use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PromptError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    // --- Config files ---
    ConfigReadFailed,
    ConfigCorrupt,
    BoundsExceeded,

    // --- Validation ---
    InvalidWorkDir,
    InvalidTagName,
    EmptyElementList,

    // --- Output ---
    OutputWriteFailed,
    SerializeFailed,
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Config Error: {message} (path: {path:?})")]
    Config { code: ErrorCode, message: String, path: PathBuf },

    #[error("Validation Error: {message} (field: {field})")]
    Validation { code: ErrorCode, message: String, field: String },

    #[error("File Error: {message} (path: {path:?})")]
    File { code: ErrorCode, message: String, path: PathBuf },

    #[error("Serialize Error: {message}")]
    Serialize { code: ErrorCode, message: String },
}

impl PromptError {
    #[must_use]
    pub fn code(&self) -> &ErrorCode {
        match self {
            PromptError::Config { code, .. }
            | PromptError::Validation { code, .. }
            | PromptError::File { code, .. }
            | PromptError::Serialize { code, .. } => code,
        }
    }
}
