//! Merging a remote batch of quotes into the local collection.
//!
//! The policy is last-remote-write-wins keyed by `text`:
//!
//! - a remote quote whose text is not in the collection is appended at the end;
//! - a remote quote whose text matches an entry with a different category replaces that
//!   entry in place;
//! - a remote quote matching an entry with the same category changes nothing.
//!
//! Matching always picks the first entry with equal text, including entries appended
//! earlier in the same pass. There are no versions or timestamps: a local category edit
//! is lost as soon as the remote disagrees with it.

use crate::quote::Quote;

/// What a merge pass did to the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Remote quotes appended because their text was new.
    pub added: usize,
    /// Local entries replaced because the remote category differed.
    pub updated: usize,
}

impl MergeReport {
    /// `true` when the collection was mutated and must be persisted.
    pub fn changed(&self) -> bool {
        self.added > 0 || self.updated > 0
    }
}

/// Apply `remote` to `local` in place, one remote quote at a time in the given order.
pub fn merge_into<I>(local: &mut Vec<Quote>, remote: I) -> MergeReport
where
    I: IntoIterator<Item = Quote>,
{
    let mut report = MergeReport::default();

    for incoming in remote {
        match local.iter().position(|q| q.text == incoming.text) {
            None => {
                local.push(incoming);
                report.added += 1;
            }
            Some(idx) if local[idx].category != incoming.category => {
                local[idx] = incoming;
                report.updated += 1;
            }
            Some(_) => {}
        }
    }
    report
}

/// Merge `remote` into `local` and return the merged collection with the changed flag.
pub fn reconcile<I>(mut local: Vec<Quote>, remote: I) -> (Vec<Quote>, bool)
where
    I: IntoIterator<Item = Quote>,
{
    let report = merge_into(&mut local, remote);
    (local, report.changed())
}
