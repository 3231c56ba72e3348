//! Infrastructure layer - adapters for the import pipeline

pub mod import;
pub mod logging;
pub mod observability;
