//! # Pinning Core
//!
//! Shared contract for IPFS pinning providers.
//!
//! This crate provides the building blocks every provider implementation conforms to:
//!
//! - **Types**: pinned item and account statistics, upload options
//! - **Errors**: one error type with service messages kept verbatim
//! - **Constants**: content address schemes and gateway namespaces
//! - **Traits**: the [`Provider`] interface
//!
//! ## Example
//!
//! ```rust
//! use pinning_core::{ContentOpts, ItemStatistics};
//!
//! let item = ItemStatistics::new("QmeeLUVdiSTTKQqhWqsffYDtNvvvcTfJdotkNyi1KDEJtQ", 22)
//!     .with_name("test file");
//! assert!(item.is_valid());
//! assert!(ContentOpts::in_directory().store_in_directory);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PinningError, Result};
pub use traits::*;
pub use types::*;
