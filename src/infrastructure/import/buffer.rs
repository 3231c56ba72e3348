//! Document buffer implementations

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::domain::import::{DocumentBuffer, DocumentDraft};
use crate::domain::DomainError;

/// Thread-safe in-memory draft
///
/// Useful for testing and embedding. Appends happen under a single write lock.
#[derive(Debug, Default)]
pub struct InMemoryDocumentBuffer {
    draft: RwLock<DocumentDraft>,
}

impl InMemoryDocumentBuffer {
    /// Creates an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding an existing draft
    pub fn with_draft(draft: DocumentDraft) -> Self {
        Self {
            draft: RwLock::new(draft),
        }
    }

    /// Snapshot of the whole draft
    pub fn draft(&self) -> Result<DocumentDraft, DomainError> {
        let draft = self.draft.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(draft.clone())
    }
}

#[async_trait]
impl DocumentBuffer for InMemoryDocumentBuffer {
    async fn markdown(&self) -> Result<String, DomainError> {
        let draft = self.draft.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(draft.markdown.clone())
    }

    async fn append(&self, text: &str) -> Result<(), DomainError> {
        let mut draft = self.draft.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        draft.markdown.push_str(text);
        Ok(())
    }
}

/// Markdown file on disk used as the document buffer
///
/// Appends are a single write on a handle opened in append mode and are
/// serialized within the process.
#[derive(Debug)]
pub struct MarkdownFileBuffer {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl MarkdownFileBuffer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentBuffer for MarkdownFileBuffer {
    async fn markdown(&self) -> Result<String, DomainError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to read '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn append(&self, text: &str) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to open '{}': {}", self.path.display(), e))
            })?;

        let original_len = file
            .metadata()
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to stat '{}': {}", self.path.display(), e))
            })?
            .len();

        append_or_restore(&mut file, original_len, text.as_bytes())
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to append to '{}': {}", self.path.display(), e))
            })
    }
}

/// Sink that can be cut back to an earlier length
#[async_trait]
trait Truncate {
    async fn truncate(&mut self, len: u64) -> std::io::Result<()>;
}

#[async_trait]
impl Truncate for tokio::fs::File {
    async fn truncate(&mut self, len: u64) -> std::io::Result<()> {
        self.set_len(len).await
    }
}

/// Write all of `data`, or cut the sink back to `original_len` so a failed
/// append leaves no partial text behind
async fn append_or_restore<W>(writer: &mut W, original_len: u64, data: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Truncate + Unpin + Send,
{
    let written = match writer.write_all(data).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        if let Err(restore) = writer.truncate(original_len).await {
            tracing::error!(error = %restore, "Failed to roll back partial append");
        }
        return Err(e);
    }

    Ok(())
}
