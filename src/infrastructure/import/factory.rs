//! Factory and registry for text extractors

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ImportSettings;
use crate::domain::import::{FormatKind, ImportError, SourceFile, TextExtractor};
use crate::domain::DomainError;

use super::extractors::{JsonExtractor, PdfExtractor, PlainTextExtractor, WordExtractor};

/// Factory for creating text extractors
#[derive(Debug, Default)]
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create the extractor for the given format
    pub fn create(
        kind: FormatKind,
        settings: &ImportSettings,
    ) -> Result<Arc<dyn TextExtractor>, DomainError> {
        match kind {
            FormatKind::Pdf => Ok(Arc::new(
                PdfExtractor::new().with_timeout(Duration::from_secs(settings.pdf_timeout_secs)),
            )),
            // Legacy .doc goes through the Word extractor, which rejects it
            FormatKind::Docx | FormatKind::LegacyDoc => Ok(Arc::new(
                WordExtractor::new().with_timeout(Duration::from_secs(settings.docx_timeout_secs)),
            )),
            FormatKind::Json => Ok(Arc::new(JsonExtractor::new())),
            FormatKind::PlainTextOrOther => Ok(Arc::new(PlainTextExtractor::new())),
            FormatKind::Image => Err(DomainError::validation(
                "Images are uploaded, not extracted",
            )),
        }
    }

    /// Formats with a text extractor
    pub fn document_kinds() -> Vec<FormatKind> {
        FormatKind::all()
            .into_iter()
            .filter(|kind| *kind != FormatKind::Image)
            .collect()
    }
}

/// Routes each classified file to its extractor
#[derive(Debug, Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<FormatKind, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Registry with an extractor for every document format
    pub fn from_settings(settings: &ImportSettings) -> Result<Self, DomainError> {
        let mut registry = Self::new();

        for kind in ExtractorFactory::document_kinds() {
            registry = registry.with_extractor(kind, ExtractorFactory::create(kind, settings)?);
        }

        Ok(registry)
    }

    /// Register (or replace) the extractor used for `kind`
    pub fn with_extractor(mut self, kind: FormatKind, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractors.insert(kind, extractor);
        self
    }

    pub fn get(&self, kind: FormatKind) -> Option<&Arc<dyn TextExtractor>> {
        self.extractors.get(&kind)
    }

    /// Extract `file` with the extractor registered for `kind`
    pub async fn extract(&self, kind: FormatKind, file: &SourceFile) -> Result<String, ImportError> {
        let extractor = self.get(kind).ok_or_else(|| {
            ImportError::unknown(format!("No extractor registered for {}", kind))
        })?;

        extractor.extract(file).await
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::MockTextExtractor;

    #[test]
    fn test_factory_kinds() {
        let settings = ImportSettings::default();

        assert_eq!(
            ExtractorFactory::create(FormatKind::Pdf, &settings).unwrap().kind(),
            FormatKind::Pdf
        );
        assert_eq!(
            ExtractorFactory::create(FormatKind::LegacyDoc, &settings)
                .unwrap()
                .kind(),
            FormatKind::Docx
        );
        assert_eq!(
            ExtractorFactory::create(FormatKind::Json, &settings).unwrap().kind(),
            FormatKind::Json
        );
        assert_eq!(
            ExtractorFactory::create(FormatKind::PlainTextOrOther, &settings)
                .unwrap()
                .kind(),
            FormatKind::PlainTextOrOther
        );
    }

    #[test]
    fn test_factory_rejects_images() {
        let result = ExtractorFactory::create(FormatKind::Image, &ImportSettings::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_covers_document_kinds() {
        let registry = ExtractorRegistry::from_settings(&ImportSettings::default()).unwrap();

        for kind in ExtractorFactory::document_kinds() {
            assert!(registry.get(kind).is_some(), "missing {}", kind);
        }
        assert!(registry.get(FormatKind::Image).is_none());
    }

    #[tokio::test]
    async fn test_registry_dispatch() {
        let registry = ExtractorRegistry::new().with_extractor(
            FormatKind::Json,
            Arc::new(MockTextExtractor::new(FormatKind::Json).with_text("mocked")),
        );
        let file = SourceFile::new("a.json", "application/json", b"{}".to_vec());

        let text = registry.extract(FormatKind::Json, &file).await.unwrap();

        assert_eq!(text, "mocked");
    }

    #[tokio::test]
    async fn test_registry_missing_extractor() {
        let registry = ExtractorRegistry::new();
        let file = SourceFile::new("a.pdf", "application/pdf", Vec::new());

        let error = registry.extract(FormatKind::Pdf, &file).await.unwrap_err();

        assert!(matches!(error, ImportError::Unknown { .. }));
    }
}
