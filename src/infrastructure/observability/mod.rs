//! Observability infrastructure - import metrics

mod metrics;

pub use self::metrics::{record_import_batch, record_import_file, FileStatus};
