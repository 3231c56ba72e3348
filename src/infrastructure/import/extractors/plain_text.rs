//! Plain text passthrough extractor

use async_trait::async_trait;

use crate::domain::import::{FormatKind, ImportError, SourceFile, TextExtractor};

/// Imports any unrecognised file as UTF-8 text, unmodified
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Create a new plain text extractor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn kind(&self) -> FormatKind {
        FormatKind::PlainTextOrOther
    }

    async fn extract(&self, file: &SourceFile) -> Result<String, ImportError> {
        Ok(file.read_as_text())
    }
}
