//! Quote data model.
//!
//! A `Quote` is a `(text, category)` pair. Two quotes are the same quote when their
//! `text` fields are byte-equal; the category is a free-form label and takes no part
//! in identity.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Collection shown when nothing has been persisted yet.
const SEED: [(&str, &str); 3] = [
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Motivation",
    ),
    (
        "Life is what happens when you're busy making other plans.",
        "Life",
    ),
    (
        "In the middle of every difficulty lies opportunity.",
        "Inspiration",
    ),
];

/// A single quote with its category label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// Quote body. Used as the identity key when merging.
    pub text: String,
    /// Free-form label, e.g. `Motivation`.
    pub category: String,
}

impl Quote {
    /// Build a quote from user input.
    ///
    /// Both fields are trimmed; the quote is rejected if either ends up empty.
    pub fn new(text: &str, category: &str) -> Result<Self, QuoteError> {
        let quote = Quote {
            text: text.trim().to_string(),
            category: category.trim().to_string(),
        };
        quote.validate()?;
        Ok(quote)
    }

    /// Check that neither field is blank.
    ///
    /// Fields are not trimmed here; quotes loaded from disk or mapped from the remote
    /// keep their exact text so identity matching stays byte-for-byte.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.text.trim().is_empty() {
            return Err(QuoteError::InvalidQuote("text is empty".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(QuoteError::InvalidQuote(format!(
                "category is empty for \"{}\"",
                self.text
            )));
        }
        Ok(())
    }

    /// The fixed starting collection.
    pub fn seed() -> Vec<Quote> {
        SEED.iter()
            .map(|(text, category)| Quote {
                text: text.to_string(),
                category: category.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.category)
    }
}
