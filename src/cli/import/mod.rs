//! Import command - appends a batch of files to a markdown document

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::import::{is_accepted_name, ImportBatch, ImportOutcome, ACCEPTED_EXTENSIONS};
use crate::infrastructure::logging;

/// Arguments for the import command
#[derive(Args, Clone, Debug)]
pub struct ImportArgs {
    /// Markdown document to append to (created if missing)
    #[arg(long, short)]
    pub document: PathBuf,

    /// Directory for imported images (overrides config)
    #[arg(long)]
    pub assets_dir: Option<String>,

    /// Link prefix for imported images (overrides config)
    #[arg(long)]
    pub assets_url_prefix: Option<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Files to import, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Run the import
pub async fn run(args: ImportArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    if let Some(dir) = args.assets_dir.clone() {
        config.import.assets_dir = dir;
    }
    if let Some(prefix) = args.assets_url_prefix.clone() {
        config.import.assets_url_prefix = prefix;
    }

    let orchestrator = crate::create_orchestrator(&config.import, &args.document)?;
    let batch = ImportBatch::from_paths(args.files.as_slice()).await?;

    for file in batch.files() {
        if !is_accepted_name(file.name()) {
            warn!(
                filename = %file.name(),
                accepted = %ACCEPTED_EXTENSIONS.join(","),
                "File type is not in the accepted list"
            );
        }
    }

    info!(
        document = %args.document.display(),
        files = batch.len(),
        "Starting import"
    );

    let outcome = orchestrator.import(batch).await?;
    print_outcome(&outcome, args.json)?;

    Ok(())
}

fn print_outcome(outcome: &ImportOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        ImportOutcome::Committed {
            fragments,
            appended_chars,
            ..
        } => println!("Imported {} fragment(s), {} characters", fragments, appended_chars),
        ImportOutcome::NothingImported { .. } => println!("Nothing imported"),
    }

    for skipped in outcome.skipped() {
        println!("Skipped {} ({}): {}", skipped.filename, skipped.kind, skipped.reason);
    }

    Ok(())
}
