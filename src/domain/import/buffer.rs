//! Document buffer contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Whether the draft is a new post or an edit of a published one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Create,
    Edit,
}

/// In-progress document owned by the editor state store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    pub markdown: String,
    pub mode: EditorMode,
}

impl DocumentDraft {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
            mode: EditorMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: EditorMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Markdown buffer the import pipeline appends to.
///
/// `append` must apply the whole text as one mutation: readers either see
/// none of it or all of it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentBuffer: Send + Sync {
    /// Current markdown content
    async fn markdown(&self) -> Result<String, DomainError>;

    /// Append `text` to the end of the markdown content
    async fn append(&self, text: &str) -> Result<(), DomainError>;
}
