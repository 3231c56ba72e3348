use clap::Parser;
use doc_importer::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Import(args) => cli::import::run(args).await,
        Command::Classify(args) => cli::classify::run(args).await,
    }
}
