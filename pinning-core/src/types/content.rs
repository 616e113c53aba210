//! Upload inputs.

use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

/// Options applied when pinning new content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentOpts {
    /// Wrap the uploaded content in a directory node.
    #[serde(default)]
    pub store_in_directory: bool,
}

impl ContentOpts {
    /// Options that wrap the content in a directory.
    pub fn in_directory() -> Self {
        Self {
            store_in_directory: true,
        }
    }
}

/// Byte stream supplied for an upload.
///
/// Ownership moves into the upload, which drops (and thereby closes) the stream
/// before returning.
pub type ContentStream = Box<dyn AsyncRead + Send + Unpin>;
