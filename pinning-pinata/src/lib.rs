//! # Pinning Pinata
//!
//! [Pinata](https://pinata.cloud) implementation of the pinning provider interface.
//!
//! Every request carries the account's API key and secret as headers. A
//! [`PinataProvider`] can only be obtained after those credentials pass the
//! service's authentication check.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pinning_pinata::PinataProvider;
//!
//! let provider = PinataProvider::new(api_key, api_secret).await?;
//! for item in provider.list().await? {
//!     println!("{} {}", item.hash, item.size);
//! }
//! let url = provider.gateway_url("ipfs://QmbydiPQXL6YYMbsArTVVg9jjK9RzUbjUYX1xiw6XYwDoD")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod decode;
mod gateway;
mod methods;
mod net;
mod provider;
mod records;

pub use config::{PinataConfig, DEFAULT_API_URL, DEFAULT_GATEWAY_URL};
pub use decode::{decode_body, Payload};
pub use gateway::GatewayResolver;
pub use methods::PAGE_SIZE;
pub use provider::{PinataProvider, AUTH_GREETING};
