//! Text extraction from various document formats

use crate::error::{Result, ResumeMatchError};
use crate::input::file_detector::DocumentFormat;
use crate::processing::document::{Document, DocumentType, ExtractedText};
use log::{debug, info, warn};
use lopdf::{Object, ObjectId};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub trait TextExtractor {
    fn extract(&self, document: &Document) -> Result<String>;
}

/// Route a document to the extractor for its declared format.
pub fn extract_text(document: &Document) -> Result<ExtractedText> {
    let text = match document.format() {
        DocumentFormat::PlainText => PlainTextExtractor.extract(document)?,
        DocumentFormat::Pdf => PdfExtractor.extract(document)?,
        DocumentFormat::Docx => DocxExtractor.extract(document)?,
        DocumentFormat::Markdown => MarkdownExtractor.extract(document)?,
    };

    let extracted = ExtractedText::new(text, document.document_type());
    debug!(
        "Extracted {} words ({} characters) from {} ({})",
        extracted.word_count(),
        extracted.character_count(),
        document.document_type(),
        document.format()
    );

    Ok(extracted)
}

fn corrupt(input: DocumentType, reason: impl ToString) -> ResumeMatchError {
    ResumeMatchError::CorruptDocument {
        input,
        reason: reason.to_string(),
    }
}

fn decode_utf8(document: &Document) -> Result<String> {
    let content = String::from_utf8(document.bytes().to_vec()).map_err(|e| ResumeMatchError::Decode {
        input: document.document_type(),
        reason: e.to_string(),
    })?;

    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, document: &Document) -> Result<String> {
        decode_utf8(document)
    }
}

/// Page-by-page PDF extraction. Pages that yield no text contribute nothing.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, document: &Document) -> Result<String> {
        let input = document.document_type();
        let pdf = lopdf::Document::load_mem(document.bytes())
            .map_err(|e| corrupt(input, format!("failed to load PDF: {}", e)))?;

        let mut pages = Vec::new();
        let mut failures = Vec::new();
        for (page_num, page_id) in pdf.get_pages() {
            let text = check_page_content(&pdf, page_id)
                .and_then(|()| pdf.extract_text(&[page_num]).map_err(|e| e.to_string()));
            match text {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        pages.push(text.to_string());
                    }
                }
                Err(e) => {
                    warn!("Skipping page {} of {}: {}", page_num, input, e);
                    failures.push(format!("page {}: {}", page_num, e));
                }
            }
        }

        if !pages.is_empty() {
            return Ok(pages.join("\n"));
        }

        info!("No text found page by page in {}, trying whole-document extraction", input);
        match pdf_extract::extract_text_from_mem(document.bytes()) {
            Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            Ok(_) if failures.is_empty() => Ok(String::new()),
            Ok(_) => Err(corrupt(input, failures.join("; "))),
            Err(e) => {
                failures.push(format!("whole-document extraction: {}", e));
                Err(corrupt(input, failures.join("; ")))
            }
        }
    }
}

/// lopdf silently skips content streams it cannot resolve and yields empty
/// output for streams it cannot inflate, so both are checked up front.
fn check_page_content(pdf: &lopdf::Document, page_id: ObjectId) -> std::result::Result<(), String> {
    for stream_id in pdf.get_page_contents(page_id) {
        let stream = pdf
            .get_object(stream_id)
            .and_then(Object::as_stream)
            .map_err(|e| format!("content stream {} {} R: {}", stream_id.0, stream_id.1, e))?;

        if stream.filters().is_ok() && !stream.content.is_empty() {
            let decoded = stream
                .decompressed_content()
                .map_err(|e| format!("content stream {} {} R: {}", stream_id.0, stream_id.1, e))?;
            if decoded.is_empty() {
                return Err(format!("content stream {} {} R could not be decompressed", stream_id.0, stream_id.1));
            }
        }
    }
    Ok(())
}

/// Paragraph text from `word/document.xml`, one paragraph per line.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, document: &Document) -> Result<String> {
        let input = document.document_type();
        let mut archive = ZipArchive::new(Cursor::new(document.bytes()))
            .map_err(|e| corrupt(input, format!("not a DOCX archive: {}", e)))?;

        let mut xml = String::new();
        let mut body = archive
            .by_name("word/document.xml")
            .map_err(|e| corrupt(input, format!("missing word/document.xml: {}", e)))?;
        body.read_to_string(&mut xml)
            .map_err(|e| corrupt(input, format!("unreadable word/document.xml: {}", e)))?;

        let paragraphs = self.paragraphs(&xml).map_err(|e| corrupt(input, e))?;
        Ok(paragraphs.join("\n"))
    }
}

impl DocxExtractor {
    fn paragraphs(&self, xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        // Text boxes can nest paragraphs inside paragraphs.
        let mut open: Vec<String> = Vec::new();
        let mut in_text = false;
        // `w:tab` also appears in paragraph properties as a tab-stop definition.
        let mut run_depth = 0usize;

        loop {
            match reader.read_event()? {
                XmlEvent::Start(e) => match e.name().local_name().as_ref() {
                    b"p" => open.push(String::new()),
                    b"r" => run_depth += 1,
                    b"t" => in_text = true,
                    _ => {}
                },
                XmlEvent::Empty(e) => match e.name().local_name().as_ref() {
                    b"p" => paragraphs.push(String::new()),
                    b"tab" if run_depth > 0 => {
                        if let Some(p) = open.last_mut() {
                            p.push('\t');
                        }
                    }
                    b"br" | b"cr" if run_depth > 0 => {
                        if let Some(p) = open.last_mut() {
                            p.push('\n');
                        }
                    }
                    _ => {}
                },
                XmlEvent::Text(t) if in_text => {
                    if let Some(p) = open.last_mut() {
                        p.push_str(&t.unescape()?);
                    }
                }
                XmlEvent::End(e) => match e.name().local_name().as_ref() {
                    b"r" => run_depth = run_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    b"p" => {
                        if let Some(p) = open.pop() {
                            paragraphs.push(p);
                        }
                    }
                    _ => {}
                },
                XmlEvent::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, document: &Document) -> Result<String> {
        let markdown = decode_utf8(document)?;
        Ok(self.markdown_to_text(&markdown))
    }
}

impl MarkdownExtractor {
    fn markdown_to_text(&self, markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak | Event::Rule => text.push('\n'),
                Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                    text.push('\n')
                }
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
