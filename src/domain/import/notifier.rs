//! User-visible import signals

use std::fmt::Debug;

/// Coarse-grained signal emitted to the user during an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSignal {
    /// At least one fragment was appended
    Succeeded,
    /// Nothing was produced and the document was left alone
    NothingImported,
    /// Informational guidance, e.g. for a skipped legacy `.doc`
    Notice(String),
    /// The import aborted; the document is unchanged
    Failed(String),
}

pub const SUCCESS_MESSAGE: &str = "Import succeeded";
pub const FAILURE_MESSAGE: &str = "Import failed, please retry";

/// Guidance shown when a legacy `.doc` file is skipped
pub fn legacy_doc_notice(filename: &str) -> String {
    format!(
        "{}: legacy .doc files are not supported, save the file as .docx and import it again",
        filename
    )
}

/// Delivers import signals to the user
pub trait ImportNotifier: Send + Sync + Debug {
    fn notify(&self, signal: ImportSignal);
}
