//! Notifier that reports import signals through tracing

use crate::domain::import::{ImportNotifier, ImportSignal, SUCCESS_MESSAGE};

/// Emits every signal as a log event; used by the CLI and headless embeddings
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ImportNotifier for TracingNotifier {
    fn notify(&self, signal: ImportSignal) {
        match signal {
            ImportSignal::Succeeded => tracing::info!("{}", SUCCESS_MESSAGE),
            ImportSignal::NothingImported => tracing::info!("Nothing to import"),
            ImportSignal::Notice(message) => tracing::info!(notice = %message, "Import notice"),
            ImportSignal::Failed(message) => tracing::error!(reason = %message, "Import failed"),
        }
    }
}
