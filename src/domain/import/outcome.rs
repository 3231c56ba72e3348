//! Import lifecycle and results

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ImportError;
use super::format::FormatKind;

/// Lifecycle of a single import invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    Idle,
    Splitting,
    UploadingImages,
    ExtractingDocuments,
    Assembling,
    Committed,
    Failed,
}

impl ImportPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Splitting => "splitting",
            Self::UploadingImages => "uploading_images",
            Self::ExtractingDocuments => "extracting_documents",
            Self::Assembling => "assembling",
            Self::Committed => "committed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: ImportPhase) -> bool {
        use ImportPhase::*;

        matches!(
            (self, next),
            (Idle, Splitting)
                | (Splitting, UploadingImages)
                | (Splitting, ExtractingDocuments)
                | (UploadingImages, ExtractingDocuments)
                | (UploadingImages, Failed)
                | (ExtractingDocuments, Assembling)
                | (ExtractingDocuments, Failed)
                | (Assembling, Committed)
                | (Assembling, Failed)
        )
    }
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file that produced no fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub filename: String,
    pub kind: FormatKind,
    pub reason: String,
}

impl SkippedFile {
    pub fn new(filename: impl Into<String>, kind: FormatKind, error: &ImportError) -> Self {
        Self {
            filename: filename.into(),
            kind,
            reason: error.to_string(),
        }
    }
}

/// Result of an import that did not fail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Fragments were appended to the document in one mutation
    Committed {
        fragments: usize,
        appended_chars: usize,
        skipped: Vec<SkippedFile>,
    },
    /// No fragment was produced; the document was not touched
    NothingImported { skipped: Vec<SkippedFile> },
}

impl ImportOutcome {
    pub fn fragments(&self) -> usize {
        match self {
            Self::Committed { fragments, .. } => *fragments,
            Self::NothingImported { .. } => 0,
        }
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        match self {
            Self::Committed { skipped, .. } | Self::NothingImported { skipped } => skipped,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}
