//! Import error taxonomy

use thiserror::Error;

use super::format::FormatKind;

/// Errors raised while importing a batch
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    /// A format that is deliberately not parsed (legacy `.doc`)
    #[error("Unsupported format {kind} for '{filename}'")]
    UnsupportedFormat { kind: FormatKind, filename: String },

    /// A malformed payload for a supported format
    #[error("Failed to extract {kind} text from '{filename}': {message}")]
    Extraction {
        kind: FormatKind,
        filename: String,
        message: String,
    },

    /// The image upload collaborator rejected the batch
    #[error("Image upload failed: {message}")]
    UploadBatch { message: String },

    /// Anything unexpected, e.g. a decoder panic
    #[error("Unexpected import error: {message}")]
    Unknown { message: String },

    /// The document buffer refused the append
    #[error("Failed to append to document: {message}")]
    Commit { message: String },
}

impl ImportError {
    pub fn unsupported(kind: FormatKind, filename: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            kind,
            filename: filename.into(),
        }
    }

    pub fn extraction(
        kind: FormatKind,
        filename: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Extraction {
            kind,
            filename: filename.into(),
            message: message.into(),
        }
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::UploadBatch {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    pub fn commit(message: impl Into<String>) -> Self {
        Self::Commit {
            message: message.into(),
        }
    }
}
