//! Domain types shared by pinning providers.
//!
//! - [`ItemStatistics`]: a single pinned item as reported by a provider
//! - [`SiteStatistics`]: aggregate usage of a provider account
//! - [`ContentOpts`]: options for uploading new content
//! - [`ContentStream`]: owned byte stream handed to an upload

mod content;
mod statistics;

pub use content::*;
pub use statistics::*;
