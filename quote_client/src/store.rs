//! File-backed quote persistence.
//!
//! The whole collection lives in one pretty-printed JSON array. A missing file means
//! nothing has been saved yet and yields the seed collection. Writes go to a sibling
//! `.tmp` file that is then renamed over the target.
use log::debug;
use quote_common::{Quote, Result};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// JSON file holding the quote collection.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    path: PathBuf,
}

impl QuoteStore {
    /// Store backed by `path`. Nothing is touched until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted collection, or the seed collection if there is none yet.
    pub fn load(&self) -> Result<Vec<Quote>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found, starting from seed quotes", self.path.display());
                return Ok(Quote::seed());
            }
            Err(e) => return Err(e.into()),
        };

        let quotes: Vec<Quote> = serde_json::from_str(&raw)?;
        for quote in &quotes {
            quote.validate()?;
        }
        debug!("Loaded {} quote(s) from {}", quotes.len(), self.path.display());
        Ok(quotes)
    }

    /// Replace the persisted collection with `quotes`.
    pub fn save(&self, quotes: &[Quote]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, serde_json::to_string_pretty(quotes)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved {} quote(s) to {}", quotes.len(), self.path.display());
        Ok(())
    }

    /// Append one quote and persist. Returns the new collection size.
    pub fn add(&self, quote: Quote) -> Result<usize> {
        self.append_all(vec![quote])
    }

    /// Append `quotes` as-is, without deduplication, and persist.
    /// Returns the new collection size.
    pub fn append_all(&self, quotes: Vec<Quote>) -> Result<usize> {
        for quote in &quotes {
            quote.validate()?;
        }
        let mut all = self.load()?;
        all.extend(quotes);
        self.save(&all)?;
        Ok(all.len())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
