//! Periodic synchronization with the remote.
//!
//! One cycle: fetch the remote batch, load the persisted collection, merge the batch into
//! it with [`merge_into`], and persist only if something changed. A failed fetch skips
//! the cycle and leaves the collection untouched; the next tick tries again.
//!
//! Cycles never overlap. `run_periodic` executes them on the calling thread, driven by a
//! `crossbeam_channel::tick` whose single-slot buffer collapses ticks that fire while a
//! cycle is still running.
use crate::fetcher::RemoteSource;
use crate::store::QuoteStore;
use chrono::Local;
use crossbeam_channel::{Receiver, select, tick};
use log::{info, warn};
use quote_common::reconcile::{MergeReport, merge_into};
use quote_common::Result;
use std::fmt;
use std::time::Duration;

/// User-facing state of a sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Waiting on the remote.
    Fetching,
    /// The batch was merged; the report says whether anything changed.
    Success(MergeReport),
    /// The cycle was skipped.
    Failure(String),
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Fetching => write!(f, "Syncing with server..."),
            SyncStatus::Success(report) if report.changed() => write!(
                f,
                "Quotes synced with server ({} added, {} updated)",
                report.added, report.updated
            ),
            SyncStatus::Success(_) => write!(f, "Quotes already up to date"),
            SyncStatus::Failure(reason) => write!(f, "Sync failed: {}", reason),
        }
    }
}

/// Runs sync cycles of a remote source against a quote store.
pub struct SyncService<S> {
    source: S,
    store: QuoteStore,
}

impl<S: RemoteSource> SyncService<S> {
    /// Create a new service.
    pub fn new(source: S, store: QuoteStore) -> Self {
        Self { source, store }
    }

    /// Run one cycle and report its outcome. Never fails; failures become
    /// [`SyncStatus::Failure`].
    pub fn run_cycle(&self) -> SyncStatus {
        notify(&SyncStatus::Fetching);
        let status = match self.try_cycle() {
            Ok(report) => SyncStatus::Success(report),
            Err(e) => SyncStatus::Failure(e.to_string()),
        };
        notify(&status);
        status
    }

    /// Run a cycle now and then once per `interval` until `shutdown` receives a message
    /// or is disconnected. Returns the number of cycles run.
    pub fn run_periodic(&self, interval: Duration, shutdown: &Receiver<()>) -> usize {
        let ticker = tick(interval);
        let mut cycles = 0;

        self.run_cycle();
        cycles += 1;
        loop {
            select! {
                recv(shutdown) -> _ => break,
                recv(ticker) -> _ => {
                    self.run_cycle();
                    cycles += 1;
                }
            }
        }
        info!("Sync loop stopped after {} cycle(s)", cycles);
        cycles
    }

    fn try_cycle(&self) -> Result<MergeReport> {
        let remote = self.source.fetch()?;
        let mut quotes = self.store.load()?;
        let report = merge_into(&mut quotes, remote);
        if report.changed() {
            self.store.save(&quotes)?;
        }
        Ok(report)
    }
}

fn notify(status: &SyncStatus) {
    let now = Local::now().format("%H:%M:%S");
    match status {
        SyncStatus::Failure(_) => warn!("[{}] {}", now, status),
        _ => info!("[{}] {}", now, status),
    }
}
