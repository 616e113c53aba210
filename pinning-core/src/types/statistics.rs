//! Statistics reported by pinning providers.

use serde::{Deserialize, Serialize};

/// A single pinned item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatistics {
    /// Content hash (CID) of the pinned item
    pub hash: String,
    /// Size of the pinned content in bytes
    pub size: u64,
    /// Display name given to the content when it was pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ItemStatistics {
    /// Creates a record without a display name.
    pub fn new(hash: impl Into<String>, size: u64) -> Self {
        Self {
            hash: hash.into(),
            size,
            name: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// A record without a content hash does not identify anything.
    pub fn is_valid(&self) -> bool {
        !self.hash.is_empty()
    }
}

/// Aggregate statistics for a provider account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStatistics {
    /// Number of pinned items
    pub items: u64,
    /// Total size of all pinned items in bytes
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_validity() {
        assert!(ItemStatistics::new("QmeeLUVdiSTTKQqhWqsffYDtNvvvcTfJdotkNyi1KDEJtQ", 22).is_valid());
        assert!(!ItemStatistics::new("", 22).is_valid());
    }

    #[test]
    fn test_item_serialization_skips_missing_name() {
        let item = ItemStatistics::new("QmHash", 1);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("name").is_none());

        let named = item.with_name("test file");
        let json = serde_json::to_value(&named).unwrap();
        assert_eq!(json["name"], "test file");
    }

    #[test]
    fn test_site_statistics_default() {
        let stats = SiteStatistics::default();
        assert_eq!(stats.items, 0);
        assert_eq!(stats.size, 0);
    }
}
