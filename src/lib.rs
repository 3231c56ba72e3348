//! Document importer
//!
//! Imports a batch of user files into a markdown document:
//! - Images are uploaded together and referenced as markdown images
//! - PDF and Word (.docx) files are reduced to plain text
//! - JSON is pretty-printed inside a fenced code block
//! - Everything else is inserted as text
//!
//! All fragments from one batch are appended to the document in a single write.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::path::Path;
use std::sync::Arc;

use crate::config::ImportSettings;
use crate::domain::DomainError;
use crate::infrastructure::import::{
    ExtractorRegistry, ImportOrchestrator, LocalAssetUploader, MarkdownFileBuffer,
    TracingNotifier,
};

/// Create an orchestrator that imports into the markdown file at `document`
pub fn create_orchestrator(
    settings: &ImportSettings,
    document: &Path,
) -> Result<ImportOrchestrator, DomainError> {
    let extractors = ExtractorRegistry::from_settings(settings)?;
    let uploader = LocalAssetUploader::new(&settings.assets_dir, settings.assets_url_prefix.clone());

    Ok(ImportOrchestrator::new(
        extractors,
        Arc::new(uploader),
        Arc::new(MarkdownFileBuffer::new(document)),
        Arc::new(TracingNotifier::new()),
    ))
}
