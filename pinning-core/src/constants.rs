//! Constants shared by pinning providers.

// ═══════════════════════════════════════════════════════════════════════════════
// CONTENT ADDRESS PREFIXES
// ═══════════════════════════════════════════════════════════════════════════════

/// URI scheme for immutable IPFS content.
pub const IPFS_SCHEME: &str = "ipfs://";

/// URI scheme for mutable IPNS names.
pub const IPNS_SCHEME: &str = "ipns://";

/// Path namespace for immutable IPFS content on a gateway.
pub const IPFS_PATH: &str = "/ipfs/";

/// Path namespace for IPNS names on a gateway.
pub const IPNS_PATH: &str = "/ipns/";

// ═══════════════════════════════════════════════════════════════════════════════
// UPLOAD FORM FIELDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemes_and_paths_agree() {
        assert_eq!(IPFS_SCHEME.trim_end_matches("://"), IPFS_PATH.trim_matches('/'));
        assert_eq!(IPNS_SCHEME.trim_end_matches("://"), IPNS_PATH.trim_matches('/'));
    }
}
