//! Error handling for the resume matcher

use crate::processing::document::DocumentType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatchError {
    #[error("{input}: file format not supported: {format}")]
    UnsupportedFormat { input: DocumentType, format: String },

    #[error("{input}: document could not be parsed: {reason}")]
    CorruptDocument { input: DocumentType, reason: String },

    #[error("{input}: text is not valid UTF-8: {reason}")]
    Decode { input: DocumentType, reason: String },

    #[error("{input}: no meaningful words left after removing stop words")]
    EmptyDocument { input: DocumentType },

    #[error("{input}: no input supplied")]
    MissingInput { input: DocumentType },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeMatchError {
    /// The input a document-level failure refers to, if any.
    pub fn input(&self) -> Option<DocumentType> {
        match self {
            ResumeMatchError::UnsupportedFormat { input, .. }
            | ResumeMatchError::CorruptDocument { input, .. }
            | ResumeMatchError::Decode { input, .. }
            | ResumeMatchError::EmptyDocument { input }
            | ResumeMatchError::MissingInput { input } => Some(*input),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResumeMatchError>;
