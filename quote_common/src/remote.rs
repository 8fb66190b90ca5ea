//! Reply payload sent by the mock remote and its mapping into local quotes.
//!
//! The remote does not speak in quotes: it serves catalog items with an id, a title
//! and a tag. Turning those into [`Quote`] values is the client's job and happens
//! before anything reaches the reconciler.
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::quote::Quote;

/// One entry of the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    /// Remote-side identifier; not used for matching.
    pub id: u64,
    /// Becomes the quote text.
    pub title: String,
    /// Becomes the quote category.
    pub tag: String,
}

impl RemoteItem {
    /// Map into a `Quote`, rejecting items with a blank title or tag.
    pub fn into_quote(self) -> Result<Quote, QuoteError> {
        let quote = Quote {
            text: self.title,
            category: self.tag,
        };
        quote
            .validate()
            .map_err(|e| QuoteError::Remote(format!("item {}: {}", self.id, e)))?;
        Ok(quote)
    }
}

/// Reply to any command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Catalog items, empty for `PING`.
    pub items: Vec<RemoteItem>,
    /// Server time in milliseconds since the Unix epoch.
    pub served_at: i64,
}

impl Reply {
    /// Map every item, failing on the first malformed one.
    pub fn into_quotes(self) -> Result<Vec<Quote>, QuoteError> {
        self.items.into_iter().map(RemoteItem::into_quote).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, tag: &str) -> RemoteItem {
        RemoteItem {
            id,
            title: title.to_string(),
            tag: tag.to_string(),
        }
    }

    #[test]
    fn test_item_maps_title_and_tag() {
        let quote = item(3, "Less is more.", "Design").into_quote().unwrap();
        assert_eq!(quote, Quote::new("Less is more.", "Design").unwrap());
    }

    #[test]
    fn test_blank_item_is_rejected() {
        let err = item(9, "Less is more.", " ").into_quote().unwrap_err();
        assert!(matches!(err, QuoteError::Remote(msg) if msg.starts_with("item 9")));
    }

    #[test]
    fn test_reply_fails_on_first_bad_item() {
        let reply = Reply {
            items: vec![item(1, "ok", "A"), item(2, "", "B")],
            served_at: 0,
        };
        assert!(reply.into_quotes().is_err());
    }

    #[test]
    fn test_reply_decodes_from_wire() {
        let raw = r#"{"items":[{"id":1,"title":"Carpe diem.","tag":"Latin"}],"served_at":1700000000000}"#;
        let reply: Reply = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.served_at, 1_700_000_000_000);
        assert_eq!(
            reply.into_quotes().unwrap(),
            vec![Quote::new("Carpe diem.", "Latin").unwrap()]
        );
    }
}
