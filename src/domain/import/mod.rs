//! Document import domain types and traits
//!
//! This module provides:
//! - `FormatKind` and the pure `classify` function routing each file
//! - `TextExtractor`, `ImageUploader`, `DocumentBuffer` and `ImportNotifier` ports
//! - The error taxonomy and lifecycle types of an import

pub mod buffer;
pub mod error;
pub mod extractor;
pub mod format;
pub mod notifier;
pub mod outcome;
pub mod source;
pub mod upload;

pub use buffer::{DocumentBuffer, DocumentDraft, EditorMode};
pub use error::ImportError;
pub use extractor::TextExtractor;
pub use format::{
    classify, is_accepted_name, is_image_media_type, is_legacy_doc_name, FormatKind,
    ACCEPTED_EXTENSIONS,
};
pub use notifier::{
    legacy_doc_notice, ImportNotifier, ImportSignal, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use outcome::{ImportOutcome, ImportPhase, SkippedFile};
pub use source::{ImportBatch, SourceFile};
pub use upload::{ImageUploadItem, ImageUploader};

// Re-export mocks for testing
#[cfg(test)]
pub use buffer::MockDocumentBuffer;
#[cfg(test)]
pub use extractor::mock::MockTextExtractor;
#[cfg(test)]
pub use notifier::mock::RecordingNotifier;
#[cfg(test)]
pub use upload::MockImageUploader;
