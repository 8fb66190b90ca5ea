//! Mock remote quote endpoint.
//!
//! This binary plays the part of the remote source the client syncs against. It wires
//! together two building blocks around a shared `Catalog`:
//!
//! - `RemoteReceiver` — accepts TCP connections, reads one newline-terminated JSON
//!   command per connection (`FETCH` or `PING`) and answers with a JSON `Reply`.
//! - `CatalogChurner` — a background thread that periodically adds an item or re-tags
//!   an existing one, so repeated syncs have something to reconcile.
//!
//! Shutdown: Ctrl+C stops the churn thread and exits; connection threads are detached.
#![warn(missing_docs)]
use crate::args::Args;
use crate::model::catalog::Catalog;
use crate::model::churn::CatalogChurner;
use crate::receiver::RemoteReceiver;
use clap::Parser;
use crossbeam_channel::bounded;
use log::{error, info};
use quote_common::QuoteError;
use quote_common::Result;
use quote_common::net::addr;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

mod args;
pub mod model;
mod receiver;

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down remote...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| QuoteError::Signal(e.to_string()))?;

    let catalog = Arc::new(Mutex::new(Catalog::seeded()));
    info!("Catalog seeded with {} item(s)", catalog.lock()?.len());

    let receiver = RemoteReceiver::new(&addr(&args.bind, args.port))?;
    info!("Mock remote listening on: {}", receiver.local_addr()?);
    let serve_catalog = Arc::clone(&catalog);
    thread::spawn(move || {
        if let Err(e) = receiver.serve(serve_catalog) {
            error!("Receiver loop failed: {:?}", e);
        }
    });

    let (churn_stop_tx, churn_stop_rx) = bounded::<()>(1);
    let churner = (args.churn_secs > 0).then(|| {
        CatalogChurner::start(
            Arc::clone(&catalog),
            Duration::from_secs(args.churn_secs),
            churn_stop_rx,
        )
    });

    let _ = shutdown_rx.recv();
    drop(churn_stop_tx);
    if let Some(handle) = churner {
        if handle.join().is_err() {
            error!("Catalog churn thread panicked");
        }
    }
    info!("Remote stopped");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
