//! The remote quote catalog.
//!
//! The catalog starts with a handful of items, some of which share their title with the
//! client's seed quotes but carry a different tag, so the very first sync already
//! exercises the overwrite path. `Catalog::churn` applies one random edit: either a new
//! item drawn from a fixed pool or a re-tag of an existing one.

use quote_common::remote::RemoteItem;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Tags the churn may assign.
const TAGS: [&str; 6] = [
    "Motivation",
    "Life",
    "Inspiration",
    "Wisdom",
    "Humor",
    "Remote",
];

/// Initial catalog content as `(title, tag)`.
const INITIAL: [(&str, &str); 4] = [
    (
        "Life is what happens when you're busy making other plans.",
        "Wisdom",
    ),
    (
        "In the middle of every difficulty lies opportunity.",
        "Inspiration",
    ),
    ("Simplicity is the soul of efficiency.", "Remote"),
    ("Well begun is half done.", "Motivation"),
];

/// Titles the churn may add over time.
const POOL: [&str; 6] = [
    "Whatever you are, be a good one.",
    "Action is the foundational key to all success.",
    "Nothing will work unless you do.",
    "The best way out is always through.",
    "Turn your wounds into wisdom.",
    "Do or do not. There is no try.",
];

/// One random edit applied by [`Catalog::churn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Churn {
    /// A new item was appended.
    Added {
        /// Id of the new item.
        id: u64,
        /// Its title.
        title: String,
    },
    /// An existing item received a different tag.
    Retagged {
        /// Id of the edited item.
        id: u64,
        /// The new tag.
        tag: String,
    },
}

/// In-memory remote catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<RemoteItem>,
    next_id: u64,
}

impl Catalog {
    /// Build a catalog from `(title, tag)` pairs, assigning ids from 1.
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut catalog = Catalog {
            items: Vec::new(),
            next_id: 1,
        };
        for (title, tag) in entries {
            catalog.push(title, tag);
        }
        catalog
    }

    /// The catalog a freshly started remote serves.
    pub fn seeded() -> Self {
        Self::new(INITIAL)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the first `limit` items, or of all of them.
    pub fn snapshot(&self, limit: Option<usize>) -> Vec<RemoteItem> {
        let end = limit.map_or(self.items.len(), |n| n.min(self.items.len()));
        self.items[..end].to_vec()
    }

    /// Apply one random edit.
    ///
    /// Adds an unused pool title with probability one half (always when the catalog is
    /// empty), otherwise re-tags a random item. Returns `None` only if nothing could be
    /// done, i.e. the catalog is empty and the pool is exhausted.
    pub fn churn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Churn> {
        let unused: Vec<&str> = POOL
            .iter()
            .copied()
            .filter(|title| !self.items.iter().any(|item| item.title == *title))
            .collect();

        let add = !unused.is_empty() && (self.items.is_empty() || rng.random_bool(0.5));
        if add {
            let title = *unused.choose(rng)?;
            let tag = *TAGS.choose(rng)?;
            let id = self.push(title, tag);
            return Some(Churn::Added {
                id,
                title: title.to_string(),
            });
        }

        if self.items.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.items.len());
        let item = &mut self.items[idx];
        let other_tags: Vec<&str> = TAGS
            .iter()
            .copied()
            .filter(|tag| *tag != item.tag)
            .collect();
        item.tag = other_tags.choose(rng)?.to_string();
        Some(Churn::Retagged {
            id: item.id,
            tag: item.tag.clone(),
        })
    }

    fn push(&mut self, title: &str, tag: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(RemoteItem {
            id,
            title: title.to_string(),
            tag: tag.to_string(),
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_common::Quote;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_seeded_ids_are_sequential() {
        let catalog = Catalog::seeded();
        let ids: Vec<u64> = catalog.snapshot(None).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_seeded_conflicts_with_local_seed() {
        let seed = Quote::seed();
        let snapshot = Catalog::seeded().snapshot(None);
        let conflicting = snapshot
            .iter()
            .filter(|item| {
                seed.iter()
                    .any(|q| q.text == item.title && q.category != item.tag)
            })
            .count();
        assert_eq!(conflicting, 1);
    }

    #[test]
    fn test_snapshot_limit() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.snapshot(Some(2)).len(), 2);
        assert_eq!(catalog.snapshot(Some(0)).len(), 0);
        assert_eq!(catalog.snapshot(Some(100)).len(), catalog.len());
    }

    #[test]
    fn test_churn_on_empty_catalog_adds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut catalog = Catalog::default();
        assert!(catalog.is_empty());

        let change = catalog.churn(&mut rng).unwrap();
        assert!(matches!(change, Churn::Added { .. }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_churn_retag_always_changes_tag() {
        let mut rng = StdRng::seed_from_u64(11);
        // Pool titles already present, so every churn must be a re-tag.
        let mut catalog = Catalog::new(POOL.iter().map(|title| (*title, "Remote")));

        for _ in 0..50 {
            let before = catalog.snapshot(None);
            match catalog.churn(&mut rng) {
                Some(Churn::Retagged { id, tag }) => {
                    let old = before.iter().find(|i| i.id == id).unwrap();
                    assert_ne!(old.tag, tag);
                }
                other => panic!("unexpected churn: {:?}", other),
            }
            assert_eq!(catalog.len(), POOL.len());
        }
    }

    #[test]
    fn test_churn_never_duplicates_titles() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut catalog = Catalog::seeded();
        for _ in 0..100 {
            catalog.churn(&mut rng);
        }

        let snapshot = catalog.snapshot(None);
        assert!(snapshot.len() <= INITIAL.len() + POOL.len());
        for (i, item) in snapshot.iter().enumerate() {
            assert!(snapshot[i + 1..].iter().all(|other| other.title != item.title));
        }
    }
}
