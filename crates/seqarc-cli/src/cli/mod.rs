//! CLI for the seqarc archiver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seqarc_core::config;
use std::path::{Path, PathBuf};

use commands::{run_archive, run_checksum, run_status, run_verify, RunOverrides};

/// Top-level CLI for the seqarc archiver.
#[derive(Debug, Parser)]
#[command(name = "seqarc")]
#[command(about = "seqarc: incremental content-addressed media archiver", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Archive every id in the range that is not yet in the history log.
    Run {
        /// First id (inclusive). Defaults to `start` from config.toml.
        #[arg(long, value_name = "ID")]
        start: Option<u64>,
        /// Last id (inclusive). Defaults to `end` from config.toml.
        #[arg(long, value_name = "ID")]
        end: Option<u64>,
        /// Directory for archived media (default: current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// History log file (default: Image_History.txt).
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },

    /// Show how many ids are archived and which are still missing.
    Status {
        /// History log file (default: from config.toml).
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },

    /// Compute MD5 of a file and the archive name it would get.
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// Re-hash archived files and report any that no longer match their name.
    Verify {
        /// Directory holding archived media (default: from config.toml, else current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                start,
                end,
                output_dir,
                history,
            } => {
                let overrides = RunOverrides {
                    start,
                    end,
                    output_dir,
                    history,
                };
                run_archive(overrides.apply(cfg)).await?;
            }
            CliCommand::Status { history } => {
                let path = history.unwrap_or_else(|| cfg.history_file.clone());
                run_status(&cfg, &path).await?;
            }
            CliCommand::Checksum { path } => run_checksum(Path::new(&path), &cfg.extension).await?,
            CliCommand::Verify { output_dir } => {
                let dir = output_dir
                    .or_else(|| cfg.output_dir.clone())
                    .unwrap_or_else(|| PathBuf::from("."));
                run_verify(&dir, &cfg.extension).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
