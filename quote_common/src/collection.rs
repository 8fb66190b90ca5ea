//! Read-only helpers over a quote collection: category listing, filtering and random
//! selection.
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::quote::Quote;

/// Message shown when there is nothing to display.
pub const EMPTY_MESSAGE: &str = "No quotes available. Add some!";

/// Distinct categories in the order they first appear.
pub fn categories(quotes: &[Quote]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for quote in quotes {
        if !seen.contains(&quote.category.as_str()) {
            seen.push(&quote.category);
        }
    }
    seen
}

/// Quotes in `category`, or every quote when `category` is `None`.
///
/// Category matching is exact, like text identity.
pub fn filter_by_category<'a>(quotes: &'a [Quote], category: Option<&str>) -> Vec<&'a Quote> {
    match category {
        None => quotes.iter().collect(),
        Some(wanted) => quotes.iter().filter(|q| q.category == wanted).collect(),
    }
}

/// Uniformly pick one item, `None` for an empty slice.
pub fn pick_random<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}
