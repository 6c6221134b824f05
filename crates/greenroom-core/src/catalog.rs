//! Gift catalog loading.
//!
//! The catalog is a bundled JSON document with shape
//! `{"gifts": [ {giftId, giftName, giftPrice, ...} ]}`. It is loaded once at
//! screen construction and read-only afterward.
//!
//! Parsing is strict per entry: a malformed entry rejects that single gift
//! (with a warning), never the whole catalog. Only a malformed envelope
//! fails the load, and the screen-facing `load_or_empty` swallows even that
//! into an empty catalog.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::UserProfile;

/// One catalog entry.
///
/// Field names mirror the bundled document (`giftId`, `giftName`, ...).
/// Unknown fields in the document are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    /// Catalog identifier.
    pub gift_id: String,
    /// Display name.
    pub gift_name: String,
    /// Price label.
    pub gift_price: String,
    /// Default send count.
    #[serde(default = "default_count")]
    pub gift_count: String,
    /// Icon asset key.
    pub gift_icon: String,
    /// Visual-effect asset key, if any.
    #[serde(default)]
    pub gift_effect: String,
    /// Transient selection flag in the picker.
    #[serde(default)]
    pub selected: bool,
    /// Whether the picker closes after sending this gift.
    #[serde(default = "default_true")]
    pub sent_then_close: bool,
    /// Sender attached once the gift is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<UserProfile>,
}

fn default_count() -> String {
    "1".to_owned()
}

fn default_true() -> bool {
    true
}

/// Errors from catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document could not be read from disk.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path of the missing or unreadable document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document envelope is not valid `{"gifts": [...]}` JSON.
    #[error("malformed catalog document: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct CatalogDocument {
    gifts: Vec<serde_json::Value>,
}

/// The static, load-once list of purchasable gifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftCatalog {
    gifts: Vec<Gift>,
}

impl GiftCatalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog document.
    ///
    /// Entries that fail to parse are dropped individually with a warning;
    /// well-formed siblings are kept.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Malformed` if the envelope itself is not valid
    /// JSON of the expected shape.
    pub fn parse(bytes: &[u8]) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_slice(bytes)?;

        let mut gifts = Vec::with_capacity(document.gifts.len());
        for (index, entry) in document.gifts.into_iter().enumerate() {
            match serde_json::from_value::<Gift>(entry) {
                Ok(gift) => gifts.push(gift),
                Err(error) => {
                    tracing::warn!(index, %error, "rejecting malformed gift entry");
                },
            }
        }

        Ok(Self { gifts })
    }

    /// Load a catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the document cannot be read and
    /// `CatalogError::Malformed` if the envelope does not parse.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let bytes = fs::read(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&bytes)
    }

    /// Load a catalog, yielding an empty one on any failure.
    ///
    /// This is the screen-facing entry point: a missing or malformed
    /// document is logged and the screen simply shows no gifts.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::warn!(%error, "gift catalog unavailable, using empty catalog");
                Self::empty()
            },
        }
    }

    /// The catalog entries.
    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn entry(id: &str) -> String {
        format!(
            r#"{{"giftId":"{id}","giftName":"Sweet Heart","giftPrice":"1","giftIcon":"gift_{id}"}}"#
        )
    }

    #[test]
    fn parse_empty_catalog() {
        let catalog = GiftCatalog::parse(br#"{"gifts":[]}"#).unwrap();
        assert_eq!(catalog.len(), 0);
        assert!(catalog.is_empty());
    }

    #[test]
    fn parse_single_entry() {
        let doc = format!(r#"{{"gifts":[{}]}}"#, entry("g1"));
        let catalog = GiftCatalog::parse(doc.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.gifts()[0].gift_id, "g1");
    }

    #[test]
    fn parse_many_entries() {
        let entries: Vec<String> = (0..7).map(|i| entry(&format!("g{i}"))).collect();
        let doc = format!(r#"{{"gifts":[{}]}}"#, entries.join(","));
        let catalog = GiftCatalog::parse(doc.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn entry_defaults_applied() {
        let doc = format!(r#"{{"gifts":[{}]}}"#, entry("g1"));
        let catalog = GiftCatalog::parse(doc.as_bytes()).unwrap();
        let gift = &catalog.gifts()[0];
        assert_eq!(gift.gift_count, "1");
        assert_eq!(gift.gift_effect, "");
        assert!(gift.sent_then_close);
        assert!(!gift.selected);
        assert!(gift.sender.is_none());
    }

    #[test]
    fn unknown_fields_ignored() {
        let doc = r#"{"gifts":[{"giftId":"g1","giftName":"n","giftPrice":"1",
            "giftIcon":"i","vendorExtra":42,"anotherField":"x"}]}"#;
        let catalog = GiftCatalog::parse(doc.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn malformed_entry_rejected_siblings_kept() {
        // Middle entry is missing required fields.
        let doc = format!(
            r#"{{"gifts":[{},{{"giftName":"orphan"}},{}]}}"#,
            entry("g1"),
            entry("g2")
        );
        let catalog = GiftCatalog::parse(doc.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.gifts()[0].gift_id, "g1");
        assert_eq!(catalog.gifts()[1].gift_id, "g2");
    }

    #[test]
    fn malformed_envelope_rejects_load() {
        let result = GiftCatalog::parse(b"not json at all");
        assert!(matches!(result, Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn missing_document_yields_empty() {
        let catalog = GiftCatalog::load_or_empty(Path::new("/nonexistent/gifts.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_document_yields_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{{{{").unwrap();
        let catalog = GiftCatalog::load_or_empty(file.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let doc = format!(r#"{{"gifts":[{}]}}"#, entry("disk"));
        file.write_all(doc.as_bytes()).unwrap();

        let catalog = GiftCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.gifts()[0].gift_id, "disk");
    }
}
