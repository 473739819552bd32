use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "search-probe",
    version,
    about = "Liveness probe for search-engine endpoints",
    long_about = "Pings every configured search endpoint once and reports pass/fail with timing and error detail. Scheduling is left to the caller (cron, systemd timers, an orchestrator)."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "SEARCH_PROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "SEARCH_PROBE_JSON_LOGS")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run every configured probe once
    Check,

    /// Validate configuration and show the resolved endpoints
    Config,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from("probe.yaml"))
    }

    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Check)
    }
}
