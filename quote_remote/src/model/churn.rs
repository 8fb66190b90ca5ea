//! Background catalog editor.
//!
//! The `CatalogChurner` thread wakes up on a fixed interval and applies one
//! [`Catalog::churn`] edit, so clients syncing against the mock remote observe new
//! items and category changes over time. The thread stops when its stop channel
//! receives a message or is disconnected.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, select, tick};
use log::{error, info};

use crate::model::catalog::{Catalog, Churn};

/// Background catalog editor.
pub struct CatalogChurner;

impl CatalogChurner {
    /// Start the churn thread.
    pub fn start(
        catalog: Arc<Mutex<Catalog>>,
        interval: Duration,
        stop_rx: Receiver<()>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let mut rng = rand::rng();
            let ticker = tick(interval);
            info!("Catalog churn started, interval {:?}", interval);

            loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(ticker) -> _ => {
                        let change = match catalog.lock() {
                            Ok(mut catalog) => catalog.churn(&mut rng),
                            Err(e) => {
                                error!("Catalog lock poisoned: {}", e);
                                break;
                            }
                        };
                        match change {
                            Some(Churn::Added { id, title }) => info!("Catalog: added #{} \"{}\"", id, title),
                            Some(Churn::Retagged { id, tag }) => info!("Catalog: #{} re-tagged as {}", id, tag),
                            None => {}
                        }
                    }
                }
            }
            info!("Catalog churn stopping...");
        })
    }
}
