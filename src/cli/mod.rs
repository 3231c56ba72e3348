//! CLI module for the document importer
//!
//! Provides subcommands:
//! - `import`: import files into a markdown document
//! - `classify`: show how files would be routed

pub mod classify;
pub mod import;

use clap::{Parser, Subcommand};

/// Document importer - append PDFs, Word documents, JSON, text and images to markdown
#[derive(Parser)]
#[command(name = "doc-importer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import files into a markdown document
    Import(import::ImportArgs),

    /// Print the format each file is classified as
    Classify(classify::ClassifyArgs),
}
