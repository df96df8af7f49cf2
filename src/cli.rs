use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{load_config, DEFAULT_OUT_DIR};
use crate::digest::run_digest;
use crate::github::GraphQlFetcher;

/// CLI for gh-daily-summary: aggregate and publish one account's daily
/// GitHub activity.
#[derive(Parser)]
#[clap(
    name = "gh-daily-summary",
    version,
    about = "Aggregate one GitHub account's daily activity into a markdown summary"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch today's contributions and write the markdown summary
    Run {
        /// Directory the dated summary files are written to
        #[clap(long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
        /// Document whose sentinel-marked section is replaced with the
        /// latest summary
        #[clap(long, default_value = "README.md")]
        splice_into: PathBuf,
        /// Only write the dated summary file, never touch the persistent
        /// document
        #[clap(long)]
        no_splice: bool,
        /// Leave the "Repositories created" section out of the report
        #[clap(long)]
        skip_new_repos: bool,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            out_dir,
            splice_into,
            no_splice,
            skip_new_repos,
        } => {
            let splice_target = if no_splice { None } else { Some(splice_into) };
            let config = load_config(out_dir, splice_target, !skip_new_repos)?;
            let fetcher = GraphQlFetcher::new(&config.token);

            let outcome = run_digest(&config, &fetcher, Utc::now()).await?;

            println!("Summary written to {}", outcome.summary_path.display());
            if outcome.spliced {
                println!("Latest summary spliced into the persistent document.");
            }
            let preview: Vec<&str> = outcome
                .lines
                .iter()
                .take(10)
                .map(String::as_str)
                .collect();
            println!("{}", preview.join("\n"));
            if outcome.lines.len() > 10 {
                println!("...");
            }
            Ok(())
        }
    }
}
