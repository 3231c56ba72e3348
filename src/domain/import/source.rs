//! Source files selected for import

use std::path::Path;

use bytes::Bytes;

use super::format::{classify, is_image_media_type, FormatKind};
use crate::domain::DomainError;

const UTF8_BOM: char = '\u{feff}';

/// A single user-selected file, immutable for the duration of an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    media_type: String,
    bytes: Bytes,
}

impl SourceFile {
    /// Create a source file from its parts
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing its media type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DomainError::not_found(format!("File '{}' not found", path.display()))
            }
            _ => DomainError::storage(format!("Failed to read '{}': {}", path.display(), e)),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default();

        Ok(Self::new(name, media_type, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the payload as UTF-8 text, replacing invalid sequences
    pub fn read_as_text(&self) -> String {
        let text = String::from_utf8_lossy(&self.bytes);
        match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => text.into_owned(),
        }
    }

    pub fn format_kind(&self) -> FormatKind {
        classify(&self.media_type, &self.name)
    }

    /// Whether the declared media type sends this file to the image phase
    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

/// Ordered files selected in one import action
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    files: Vec<SourceFile>,
}

impl ImportBatch {
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self { files }
    }

    /// Read every path in order into a batch
    pub async fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, DomainError> {
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            files.push(SourceFile::from_path(path).await?);
        }

        Ok(Self::new(files))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Split into (images, documents), keeping the relative order of each
    pub fn partition(self) -> (Vec<SourceFile>, Vec<SourceFile>) {
        self.files.into_iter().partition(SourceFile::is_image)
    }
}

impl From<Vec<SourceFile>> for ImportBatch {
    fn from(files: Vec<SourceFile>) -> Self {
        Self::new(files)
    }
}
