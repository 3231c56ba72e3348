//! Text extractor trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::error::ImportError;
use super::format::FormatKind;
use super::source::SourceFile;

/// Turns one non-image source file into a markdown-compatible text fragment
#[async_trait]
pub trait TextExtractor: Send + Sync + Debug {
    /// The format this extractor handles
    fn kind(&self) -> FormatKind;

    /// Extract the text content of `file`
    async fn extract(&self, file: &SourceFile) -> Result<String, ImportError>;
}
