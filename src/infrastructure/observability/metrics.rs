//! Import metrics
//!
//! Counters are recorded through the `metrics` facade; whichever recorder the
//! embedding application installs receives them.

use ::metrics::counter;

use crate::domain::import::{FormatKind, ImportPhase};

/// Per-file extraction status label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Extracted,
    Unsupported,
    Failed,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracted => "extracted",
            Self::Unsupported => "unsupported",
            Self::Failed => "failed",
        }
    }
}

/// Record the outcome of processing one file
pub fn record_import_file(kind: FormatKind, status: FileStatus) {
    let labels = [
        ("format", kind.as_str().to_string()),
        ("status", status.as_str().to_string()),
    ];

    counter!("document_import_files_total", &labels).increment(1);
}

/// Record the terminal phase of one import
pub fn record_import_batch(phase: ImportPhase, fragments: usize) {
    let status = batch_status(phase, fragments);
    let labels = [("status", status.to_string())];

    counter!("document_import_batches_total", &labels).increment(1);

    if fragments > 0 {
        counter!("document_import_fragments_total").increment(fragments as u64);
    }
}

fn batch_status(phase: ImportPhase, fragments: usize) -> &'static str {
    match phase {
        ImportPhase::Failed => "failed",
        _ if fragments == 0 => "empty",
        _ => "committed",
    }
}
