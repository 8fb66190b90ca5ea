//! Quote Client — keeps a local quote collection in a JSON file, shows random quotes,
//! lets the user add quotes and browse them by category, and syncs the collection with
//! a remote endpoint using a remote-wins merge.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client show --category Life
//! quote_client add --text "Well begun is half done." --category Motivation
//! quote_client sync --remote 127.0.0.1:8090 --interval-secs 30
//! ```
//!
//! `sync` runs one cycle immediately and then one per interval until Ctrl+C. A cycle
//! whose fetch fails is skipped and the collection is left as it was.
#![warn(missing_docs)]
mod args;
mod fetcher;
mod store;
mod sync;

use crate::args::{Args, Commands, RemoteArgs, SyncArgs};
use crate::fetcher::TcpRemote;
use crate::store::QuoteStore;
use crate::sync::{SyncService, SyncStatus};
use clap::Parser;
use crossbeam_channel::bounded;
use log::info;
use quote_common::collection::{EMPTY_MESSAGE, categories, filter_by_category, pick_random};
use quote_common::{Quote, QuoteError, Result};
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();
    let store = QuoteStore::new(normalize_path(&args.store));

    match args.command {
        Commands::Show { category } => show(&store, category.as_deref()),
        Commands::Add { text, category } => {
            let quote = Quote::new(&text, &category)?;
            let total = store.add(quote.clone())?;
            info!("Collection now holds {} quote(s)", total);
            println!("Quote added successfully!");
            println!("{}", quote);
            Ok(())
        }
        Commands::List { category } => {
            let quotes = store.load()?;
            let view = filter_by_category(&quotes, category.as_deref());
            if view.is_empty() {
                println!("{}", EMPTY_MESSAGE);
            }
            for quote in view {
                println!("{}", quote);
            }
            Ok(())
        }
        Commands::Categories => {
            let quotes = store.load()?;
            for category in categories(&quotes) {
                println!("{}", category);
            }
            Ok(())
        }
        Commands::Sync(sync) => run_sync(store, sync),
        Commands::Ping(remote_args) => {
            let remote = tcp_remote(&remote_args);
            let elapsed = remote.ping()?;
            println!("Remote {} answered in {} ms", remote.addr(), elapsed.as_millis());
            Ok(())
        }
    }
}

/// Print a random quote, optionally restricted to one category.
fn show(store: &QuoteStore, category: Option<&str>) -> Result<(), QuoteError> {
    let quotes = store.load()?;
    let view = filter_by_category(&quotes, category);
    match pick_random(&view, &mut rand::rng()) {
        Some(quote) => println!("{}", quote),
        None => println!("{}", EMPTY_MESSAGE),
    }
    Ok(())
}

fn run_sync(store: QuoteStore, args: SyncArgs) -> Result<(), QuoteError> {
    let remote = tcp_remote(&args.remote).with_limit(args.limit);
    info!(
        "Syncing {} with remote {}",
        store.path().display(),
        remote.addr()
    );
    let service = SyncService::new(remote, store);

    if args.once {
        return match service.run_cycle() {
            SyncStatus::Failure(reason) => Err(QuoteError::Remote(reason)),
            _ => Ok(()),
        };
    }

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Stopping sync...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| QuoteError::Signal(e.to_string()))?;

    info!("Client is running. Press Ctrl+C to exit.");
    service.run_periodic(Duration::from_secs(args.interval_secs), &shutdown_rx);
    Ok(())
}

fn tcp_remote(args: &RemoteArgs) -> TcpRemote {
    let remote = args.remote.trim().replace('"', "");
    TcpRemote::new(&remote, Duration::from_secs(args.timeout_secs))
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
