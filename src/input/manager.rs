//! Input manager for loading documents from disk

use crate::error::{Result, ResumeMatchError};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::extract_text;
use crate::processing::document::{Document, DocumentType, ExtractedText};
use log::info;
use std::path::Path;
use tokio::fs;

/// Reads files fully into memory. Nothing is cached between requests.
#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a file and tag it with the format implied by its extension.
    pub async fn load(&self, path: &Path, document_type: DocumentType) -> Result<Document> {
        if !path.exists() {
            return Err(ResumeMatchError::InvalidInput(format!(
                "{} file does not exist: {}",
                document_type,
                path.display()
            )));
        }

        let format = self.detect_format(path, document_type)?;

        info!("Reading {} from {} ({})", document_type, path.display(), format);
        let bytes = fs::read(path).await?;

        Ok(Document::new(bytes, format, document_type).with_source(path.display().to_string()))
    }

    /// Read a file whose format is given by a declared content type rather
    /// than its extension.
    pub async fn load_with_mime_type(&self, path: &Path, mime_type: &str, document_type: DocumentType) -> Result<Document> {
        if !path.exists() {
            return Err(ResumeMatchError::InvalidInput(format!(
                "{} file does not exist: {}",
                document_type,
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let document = Document::from_upload(bytes, mime_type, document_type)?;
        info!("Read {} from {} as {} ({})", document_type, path.display(), document.format(), mime_type);

        Ok(document.with_source(path.display().to_string()))
    }

    /// Load and extract in one step.
    pub async fn extract_text(&self, path: &Path, document_type: DocumentType) -> Result<ExtractedText> {
        let document = self.load(path, document_type).await?;
        extract_text(&document)
    }

    fn detect_format(&self, path: &Path, document_type: DocumentType) -> Result<DocumentFormat> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeMatchError::UnsupportedFormat {
                input: document_type,
                format: format!("file has no extension: {}", path.display()),
            })?;

        DocumentFormat::from_extension(extension).ok_or_else(|| ResumeMatchError::UnsupportedFormat {
            input: document_type,
            format: format!(".{} (supported: {})", extension, DocumentFormat::extensions().join(", ")),
        })
    }
}
