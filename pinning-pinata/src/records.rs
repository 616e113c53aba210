//! Typed views of Pinata responses.
//!
//! Every field is optional at the serde layer; required fields are checked
//! explicitly so a missing field surfaces as [`PinningError::MissingField`]
//! instead of a generic deserialization failure.

use serde::Deserialize;
use serde_json::Value;

use pinning_core::error::{PinningError, Result};
use pinning_core::types::{ItemStatistics, SiteStatistics};

/// A count or size, sent by Pinata either as a decimal string or a plain number.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Numeric {
    Text(String),
    Number(u64),
}

impl Numeric {
    pub(crate) fn to_u64(&self, field: &'static str) -> Result<u64> {
        match self {
            Numeric::Number(n) => Ok(*n),
            Numeric::Text(text) => text.trim().parse().map_err(|_| PinningError::InvalidNumber {
                field,
                value: text.clone(),
            }),
        }
    }
}

fn optional_u64(value: Option<&Numeric>, field: &'static str) -> Result<u64> {
    value.map_or(Ok(0), |n| n.to_u64(field))
}

/// Response of `/data/testAuthentication`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthResponse {
    pub message: Option<String>,
}

/// One page of `/data/pinList` or `/data/userPinList/...`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PinListPage {
    pub count: Option<Numeric>,
    pub rows: Option<Vec<PinRow>>,
}

impl PinListPage {
    /// Total number of matching pins; absent means none.
    pub(crate) fn count(&self) -> Result<u64> {
        optional_u64(self.count.as_ref(), "count")
    }
}

/// A single pin as listed by Pinata.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PinRow {
    pub ipfs_pin_hash: Option<String>,
    pub size: Option<Numeric>,
    pub metadata: Option<Value>,
}

impl PinRow {
    /// Validates the row and converts it into an item record.
    pub(crate) fn into_item(self) -> Result<ItemStatistics> {
        let hash = self
            .ipfs_pin_hash
            .filter(|hash| !hash.is_empty())
            .ok_or(PinningError::MissingField("ipfs_pin_hash"))?;
        let size = self
            .size
            .as_ref()
            .ok_or(PinningError::MissingField("size"))?
            .to_u64("size")?;

        // Names are free-form metadata; anything but a string is ignored.
        let name = self
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(ItemStatistics { hash, size, name })
    }
}

/// Response of `/data/userPinnedDataTotal`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PinnedDataTotal {
    pub pin_count: Option<Numeric>,
    pub pin_size_total: Option<Numeric>,
}

impl PinnedDataTotal {
    pub(crate) fn into_stats(self) -> Result<SiteStatistics> {
        Ok(SiteStatistics {
            items: optional_u64(self.pin_count.as_ref(), "pin_count")?,
            size: optional_u64(self.pin_size_total.as_ref(), "pin_size_total")?,
        })
    }
}

/// Response of `/pinning/pinFileToIPFS`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: Option<String>,
}
