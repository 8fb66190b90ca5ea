//!
//! Common types and utilities shared by the quote client and the mock remote.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — the `Quote` model and its seed collection.
//! - `reconcile` — remote-wins merge of a remote batch into the local collection.
//! - `collection` — category listing, filtering and random selection.
//! - `command` — requests sent from client to remote.
//! - `remote` — replies sent back by the remote and their mapping into quotes.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod collection;
pub mod command;
pub mod error;
pub mod net;
pub mod quote;
pub mod reconcile;
pub mod remote;
pub mod result;

pub use error::QuoteError;
pub use quote::Quote;
pub use reconcile::{MergeReport, reconcile};
pub use result::Result;
