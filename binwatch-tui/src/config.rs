use std::path::PathBuf;

use anyhow::{Result, bail};
use binwatch_core::{AttentionThreshold, SourceId};
use clap::Parser;

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal dashboard for smart garbage bins")]
pub(crate) struct Args {
    /// Data source to show (`seed` or `file`)
    #[arg(long, env = "BINWATCH_SOURCE", default_value = binwatch_source_seed::SOURCE_ID)]
    pub source: String,

    /// JSON document backing the `file` source
    #[arg(long, env = "BINWATCH_DATA")]
    pub data: Option<PathBuf>,

    /// Fill percentage a bin must exceed to need attention
    #[arg(
        long,
        env = "BINWATCH_THRESHOLD",
        default_value_t = AttentionThreshold::DEFAULT_PERCENT,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub threshold: u8,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long, env = "BINWATCH_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub source: SourceId,
    pub data: Option<PathBuf>,
    pub threshold: AttentionThreshold,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Parse CLI args (with environment fallback) into an `AppConfig`.
    pub(crate) fn from_env_and_args() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub(crate) fn from_args(args: Args) -> Result<Self> {
        let source = SourceId(args.source);
        if source.0 == binwatch_source_file::SOURCE_ID && args.data.is_none() {
            bail!("the `file` source needs --data <path> (or BINWATCH_DATA)");
        }

        Ok(Self {
            source,
            data: args.data,
            threshold: AttentionThreshold::new(args.threshold)?,
            log_file: args.log_file,
        })
    }
}
