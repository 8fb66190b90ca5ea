//! Command-line arguments for the quote client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use quote_common::net::{FETCH_TIMEOUT_SECS, REMOTE_PORT, SYNC_INTERVAL_SECS, addr};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON file holding the quote collection. Created on first write.
    #[clap(long, global = true, default_value = "quotes.json")]
    pub store: String,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Client subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print one random quote.
    Show {
        /// Only pick from this category.
        #[clap(long)]
        category: Option<String>,
    },
    /// Add a quote to the collection.
    Add {
        /// Quote text.
        #[clap(long)]
        text: String,
        /// Quote category.
        #[clap(long)]
        category: String,
    },
    /// Print the collection, oldest first.
    List {
        /// Only list this category.
        #[clap(long)]
        category: Option<String>,
    },
    /// Print the distinct categories.
    Categories,
    /// Merge remote quotes into the collection, periodically or once.
    Sync(SyncArgs),
    /// Check that the remote answers.
    Ping(RemoteArgs),
}

/// Where the remote lives and how long to wait for it.
#[derive(Debug, clap::Args)]
pub struct RemoteArgs {
    /// Remote address as `host:port`.
    #[clap(long, default_value_t = addr("127.0.0.1", REMOTE_PORT))]
    pub remote: String,

    /// Timeout in seconds for connecting, sending and each read.
    #[clap(long, default_value_t = FETCH_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,
}

/// Options of the `sync` subcommand.
#[derive(Debug, clap::Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Seconds between two syncs.
    #[clap(long, default_value_t = SYNC_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,

    /// Ask the remote for at most this many items.
    #[clap(long)]
    pub limit: Option<usize>,

    /// Run a single cycle and exit; a failed cycle makes the exit status non-zero.
    #[clap(long)]
    pub once: bool,
}
