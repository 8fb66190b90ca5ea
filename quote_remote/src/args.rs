//! Command-line arguments for the mock remote.
use clap::Parser;
use quote_common::net::{CHURN_INTERVAL_SECS, REMOTE_PORT};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Interface to bind the TCP listener on.
    #[clap(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// TCP port to listen on.
    #[clap(long, default_value_t = REMOTE_PORT)]
    pub port: u16,

    /// Seconds between two random catalog edits. `0` freezes the catalog.
    #[clap(long, default_value_t = CHURN_INTERVAL_SECS)]
    pub churn_secs: u64,
}
