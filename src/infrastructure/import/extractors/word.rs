//! Word (.docx) text extractor

use std::io::{Cursor, Read};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::domain::import::{
    is_legacy_doc_name, FormatKind, ImportError, SourceFile, TextExtractor,
};

const DOCUMENT_PART: &str = "word/document.xml";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts raw text from Office Open XML Word documents.
///
/// Legacy binary `.doc` files are rejected without being read.
#[derive(Debug, Clone)]
pub struct WordExtractor {
    timeout: Duration,
}

impl Default for WordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl WordExtractor {
    /// Create a new Word extractor with the default timeout
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the maximum time spent decoding a single file.
    ///
    /// The decoder also checks the deadline after every paragraph, so a
    /// timed-out file stops holding its buffer shortly after the caller has
    /// moved on.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn extract_document(data: &[u8], deadline: Instant) -> Result<String, String> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| format!("invalid DOCX container: {}", e))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| format!("{} not found: {}", DOCUMENT_PART, e))?
            .read_to_string(&mut xml)
            .map_err(|e| format!("failed to read {}: {}", DOCUMENT_PART, e))?;

        let text = text_from_document_xml(&xml, deadline)?;
        Ok(text.trim().to_string())
    }
}

/// Walk WordprocessingML and collect run text.
///
/// Paragraphs are separated by a blank line, tabs and breaks are kept.
fn text_from_document_xml(xml: &str, deadline: Instant) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if Instant::now() >= deadline {
                        return Err("DOCX extraction timed out".to_string());
                    }
                    text.push_str("\n\n");
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let run = e
                    .unescape()
                    .map_err(|e| format!("invalid text run: {}", e))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML parsing error at position {}: {}",
                    reader.buffer_position(),
                    e
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[async_trait]
impl TextExtractor for WordExtractor {
    fn kind(&self) -> FormatKind {
        FormatKind::Docx
    }

    #[tracing::instrument(skip(self, file), fields(filename = %file.name(), size = file.len()))]
    async fn extract(&self, file: &SourceFile) -> Result<String, ImportError> {
        if is_legacy_doc_name(file.name()) {
            return Err(ImportError::unsupported(FormatKind::LegacyDoc, file.name()));
        }

        let data: Bytes = file.bytes().clone();
        let deadline = Instant::now() + self.timeout;

        let extracted = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_document(&data, deadline)),
        )
        .await
        .map_err(|_| {
            ImportError::extraction(FormatKind::Docx, file.name(), "DOCX extraction timed out")
        })?
        .map_err(|e| ImportError::unknown(format!("DOCX decoder task failed: {}", e)))?;

        extracted.map_err(|e| ImportError::extraction(FormatKind::Docx, file.name(), e))
    }
}
