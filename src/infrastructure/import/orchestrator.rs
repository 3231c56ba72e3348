//! Import orchestrator
//!
//! Drives one batch through the import lifecycle:
//! split images off, upload them in one call, extract every other file in
//! order, assemble the fragments and append them to the document once.

use std::sync::Arc;

use tracing::Instrument;

use crate::domain::import::{
    legacy_doc_notice, DocumentBuffer, FormatKind, ImageUploader, ImportBatch, ImportError,
    ImportNotifier, ImportOutcome, ImportPhase, ImportSignal, SkippedFile, SourceFile,
    FAILURE_MESSAGE,
};
use crate::infrastructure::observability::{record_import_batch, record_import_file, FileStatus};

use super::factory::ExtractorRegistry;
use super::images::render_image_fragments;

/// Wrap fragment content so consecutive fragments stay visually separated
pub fn frame_fragment(content: &str) -> String {
    format!("\n{}\n", content)
}

/// Concatenate image fragments then document fragments
pub fn assemble(image_fragments: &[String], document_fragments: &[String]) -> String {
    image_fragments
        .iter()
        .chain(document_fragments)
        .map(|fragment| frame_fragment(fragment))
        .collect()
}

struct PhaseTracker {
    phase: ImportPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            phase: ImportPhase::Idle,
        }
    }

    fn advance(&mut self, next: ImportPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal import transition {} -> {}",
            self.phase,
            next
        );
        tracing::debug!(from = %self.phase, to = %next, "Import phase transition");
        self.phase = next;
    }
}

/// Runs document imports against a document buffer
pub struct ImportOrchestrator {
    extractors: ExtractorRegistry,
    uploader: Arc<dyn ImageUploader>,
    buffer: Arc<dyn DocumentBuffer>,
    notifier: Arc<dyn ImportNotifier>,
}

impl std::fmt::Debug for ImportOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportOrchestrator")
            .field("extractors", &self.extractors)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl ImportOrchestrator {
    /// Create a new orchestrator
    pub fn new(
        extractors: ExtractorRegistry,
        uploader: Arc<dyn ImageUploader>,
        buffer: Arc<dyn DocumentBuffer>,
        notifier: Arc<dyn ImportNotifier>,
    ) -> Self {
        Self {
            extractors,
            uploader,
            buffer,
            notifier,
        }
    }

    /// Import a batch and append the result to the document.
    ///
    /// Per-file extraction failures are skipped; an image upload failure or a
    /// rejected append fails the whole import and leaves the document as it was.
    pub async fn import(&self, batch: ImportBatch) -> Result<ImportOutcome, ImportError> {
        let import_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!(
            "document_import",
            import_id = %import_id,
            files = batch.len()
        );

        self.run(batch).instrument(span).await
    }

    async fn run(&self, batch: ImportBatch) -> Result<ImportOutcome, ImportError> {
        let mut tracker = PhaseTracker::new();

        tracker.advance(ImportPhase::Splitting);
        let (images, documents) = batch.partition();
        tracing::debug!(
            images = images.len(),
            documents = documents.len(),
            "Split import batch"
        );

        let image_fragments = if images.is_empty() {
            Vec::new()
        } else {
            tracker.advance(ImportPhase::UploadingImages);

            match self.upload_images(images).await {
                Ok(fragments) => fragments,
                Err(error) => return Err(self.fail(&mut tracker, error)),
            }
        };

        tracker.advance(ImportPhase::ExtractingDocuments);
        let (document_fragments, skipped) = self.extract_documents(&documents).await;

        tracker.advance(ImportPhase::Assembling);
        let fragments = image_fragments.len() + document_fragments.len();

        if fragments == 0 {
            tracker.advance(ImportPhase::Committed);
            record_import_batch(ImportPhase::Committed, 0);
            self.notifier.notify(ImportSignal::NothingImported);
            tracing::info!(skipped = skipped.len(), "Import produced no fragments");

            return Ok(ImportOutcome::NothingImported { skipped });
        }

        let assembled = assemble(&image_fragments, &document_fragments);

        if let Err(e) = self.buffer.append(&assembled).await {
            return Err(self.fail(&mut tracker, ImportError::commit(e.to_string())));
        }

        tracker.advance(ImportPhase::Committed);
        record_import_batch(ImportPhase::Committed, fragments);
        self.notifier.notify(ImportSignal::Succeeded);

        let appended_chars = assembled.chars().count();
        tracing::info!(
            fragments,
            appended_chars,
            skipped = skipped.len(),
            "Import committed"
        );

        Ok(ImportOutcome::Committed {
            fragments,
            appended_chars,
            skipped,
        })
    }

    async fn upload_images(&self, images: Vec<SourceFile>) -> Result<Vec<String>, ImportError> {
        let expected = images.len();
        let items = self.uploader.upload(images).await?;

        if items.len() != expected {
            tracing::warn!(
                expected,
                received = items.len(),
                "Image uploader returned a different number of items"
            );
        }

        for _ in &items {
            record_import_file(FormatKind::Image, FileStatus::Extracted);
        }

        Ok(render_image_fragments(&items))
    }

    async fn extract_documents(&self, documents: &[SourceFile]) -> (Vec<String>, Vec<SkippedFile>) {
        let mut fragments = Vec::with_capacity(documents.len());
        let mut skipped = Vec::new();

        for file in documents {
            let kind = file.format_kind();

            match self.extractors.extract(kind, file).await {
                Ok(text) => {
                    record_import_file(kind, FileStatus::Extracted);
                    tracing::debug!(filename = %file.name(), %kind, chars = text.len(), "Extracted fragment");
                    fragments.push(text);
                }
                Err(error) => {
                    self.report_skip(file, kind, &error);
                    skipped.push(SkippedFile::new(file.name(), kind, &error));
                }
            }
        }

        (fragments, skipped)
    }

    fn report_skip(&self, file: &SourceFile, kind: FormatKind, error: &ImportError) {
        match error {
            ImportError::UnsupportedFormat { .. } => {
                record_import_file(kind, FileStatus::Unsupported);
                tracing::info!(filename = %file.name(), %kind, "Skipping unsupported file");
                self.notifier
                    .notify(ImportSignal::Notice(legacy_doc_notice(file.name())));
            }
            ImportError::Unknown { .. } => {
                record_import_file(kind, FileStatus::Failed);
                tracing::error!(filename = %file.name(), %kind, error = %error, "Unexpected extraction error");
            }
            _ => {
                record_import_file(kind, FileStatus::Failed);
                tracing::warn!(filename = %file.name(), %kind, error = %error, "Skipping file that failed to extract");
            }
        }
    }

    fn fail(&self, tracker: &mut PhaseTracker, error: ImportError) -> ImportError {
        tracker.advance(ImportPhase::Failed);
        record_import_batch(ImportPhase::Failed, 0);
        tracing::error!(error = %error, "Import failed, document left unchanged");
        self.notifier
            .notify(ImportSignal::Failed(FAILURE_MESSAGE.to_string()));

        error
    }
}
