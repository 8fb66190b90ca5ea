//! Error types shared between the client and the mock remote.
//!
//! `QuoteError` unifies the failure cases of storage I/O, JSON encoding, quote
//! validation and the remote protocol so every crate can propagate a single
//! error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the client and the remote.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// I/O error from files, sockets or timeouts.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A quote is missing its text or its category.
    #[error("Invalid quote: {0}")]
    InvalidQuote(String),

    /// The remote answered with something the protocol does not allow.
    #[error("Remote protocol error: {0}")]
    Remote(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// The Ctrl+C handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(String),
}

impl<T> From<PoisonError<T>> for QuoteError {
    fn from(err: PoisonError<T>) -> Self {
        QuoteError::MutexLock(err.to_string())
    }
}
