//! Domain layer - import model, contracts and errors

pub mod error;
pub mod import;

pub use error::DomainError;
