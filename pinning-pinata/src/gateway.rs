//! Gateway URL resolution.
//!
//! Content addresses arrive in many shapes: multiaddrs, `ipfs://` and `ipns://`
//! URIs, links to other gateways, and bare CIDs. [`GatewayResolver`] rewrites
//! all of them onto a single gateway base.

use cid::multibase::Base;
use cid::multihash::Multihash;
use cid::Cid;
use multiaddr::Multiaddr;

use pinning_core::constants::{IPFS_PATH, IPFS_SCHEME, IPNS_PATH, IPNS_SCHEME};
use pinning_core::error::{PinningError, Result};

use crate::config::DEFAULT_GATEWAY_URL;

/// Rewrites content addresses onto a gateway base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayResolver {
    base: String,
}

impl Default for GatewayResolver {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}

impl GatewayResolver {
    /// Creates a resolver for the given gateway base (e.g. "https://gateway.pinata.cloud").
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Gateway base URL without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolves `input` to a gateway URL.
    ///
    /// Rules are tried in order and the first match wins:
    ///
    /// 1. multiaddr (`/ipfs/<cid>[/path]`): appended as-is
    /// 2. `ipfs://<cid>[/path]`: mapped to `/ipfs/`
    /// 3. `ipns://<name>[/path]`: mapped to `/ipns/`
    /// 4. any string containing `/ipfs/` or `/ipns/`: everything from that segment on
    /// 5. a bare CID or base58 multihash: mapped to `/ipfs/`
    ///
    /// A bare CID followed by a path is rejected.
    pub fn resolve(&self, input: &str) -> Result<String> {
        if is_multiaddr(input) {
            return Ok(format!("{}{}", self.base, input));
        }

        if let Some(rest) = input.strip_prefix(IPFS_SCHEME) {
            return Ok(format!("{}{}{}", self.base, IPFS_PATH, rest));
        }
        if let Some(rest) = input.strip_prefix(IPNS_SCHEME) {
            return Ok(format!("{}{}{}", self.base, IPNS_PATH, rest));
        }

        // Someone else's gateway link
        if let Some(index) = input.find(IPFS_PATH).or_else(|| input.find(IPNS_PATH)) {
            return Ok(format!("{}{}", self.base, &input[index..]));
        }

        if input.parse::<Cid>().is_ok() || is_b58_multihash(input) {
            return Ok(format!("{}{}{}", self.base, IPFS_PATH, input));
        }

        Err(PinningError::UnrecognisedFormat)
    }
}

/// An empty string parses as an empty multiaddr, which addresses nothing.
fn is_multiaddr(input: &str) -> bool {
    input
        .parse::<Multiaddr>()
        .map(|addr| addr.iter().next().is_some())
        .unwrap_or(false)
}

/// Any hash function is accepted, not just the sha2-256 that CIDv0 requires.
fn is_b58_multihash(input: &str) -> bool {
    Base::Base58Btc
        .decode(input)
        .ok()
        .and_then(|bytes| Multihash::<64>::from_bytes(&bytes).ok())
        .is_some_and(|hash| hash.size() > 0)
}
