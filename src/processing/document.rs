//! Document structures

use crate::error::{Result, ResumeMatchError};
use crate::input::file_detector::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the comparison a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "resume"),
            DocumentType::JobDescription => write!(f, "job description"),
        }
    }
}

/// Raw document bytes with their declared format. Immutable once read.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    bytes: Vec<u8>,
    format: DocumentFormat,
    document_type: DocumentType,
    source: Option<String>,
}

impl Document {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat, document_type: DocumentType) -> Self {
        Self {
            bytes,
            format,
            document_type,
            source: None,
        }
    }

    /// Build a document from bytes whose format is given by a declared
    /// content type. Unknown types are `UnsupportedFormat`.
    pub fn from_upload(bytes: Vec<u8>, mime_type: &str, document_type: DocumentType) -> Result<Self> {
        let format = DocumentFormat::from_mime_type(mime_type).ok_or_else(|| ResumeMatchError::UnsupportedFormat {
            input: document_type,
            format: mime_type.to_string(),
        })?;

        Ok(Self::new(bytes, format, document_type))
    }

    /// Attach a human-readable origin (usually the file path).
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Plain UTF-8 text derived from a document. Structure is flattened to
/// newline-joined text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub content: String,
    pub document_type: DocumentType,
}

impl ExtractedText {
    pub fn new(content: String, document_type: DocumentType) -> Self {
        Self {
            content,
            document_type,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// One side of an analysis request: either a document still to be
/// extracted, or text that was pasted in and is used as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentInput {
    Document(Document),
    Text(String),
}

impl DocumentInput {
    /// Pick the input for one side, preferring an uploaded document over
    /// pasted text. Whitespace-only text counts as absent.
    pub fn resolve(document: Option<Document>, text: Option<String>) -> Option<Self> {
        if let Some(document) = document {
            return Some(DocumentInput::Document(document));
        }

        text.map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(DocumentInput::Text)
    }
}
