//! Common traits for pinning providers.
//!
//! Every backend implements [`Provider`], so callers can hold a
//! `Box<dyn Provider>` and treat services interchangeably.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ContentOpts, ContentStream, ItemStatistics, SiteStatistics};

// ═══════════════════════════════════════════════════════════════════════════════
// PROVIDER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for an IPFS pinning service.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Lists all content pinned to this provider.
    async fn list(&self) -> Result<Vec<ItemStatistics>>;

    /// Returns information on a single pinned hash.
    ///
    /// Fails with `UnknownContent` if nothing matches and
    /// `MultipleMatchingContents` if the hash is ambiguous.
    async fn item_stats(&self, hash: &str) -> Result<ItemStatistics>;

    /// Returns aggregate statistics for the account.
    async fn service_stats(&self) -> Result<SiteStatistics>;

    /// Uploads and pins new content, returning its hash.
    ///
    /// The stream is consumed and released before this returns.
    async fn pin_content(
        &self,
        name: &str,
        content: Option<ContentStream>,
        opts: Option<&ContentOpts>,
    ) -> Result<String>;

    /// Pins content that already exists on the network.
    async fn pin(&self, hash: &str) -> Result<()>;

    /// Removes a pin.
    async fn unpin(&self, hash: &str) -> Result<()>;

    /// Resolves a content address in any supported format to this provider's gateway.
    fn gateway_url(&self, input: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PinningError;

    struct EmptyProvider;

    #[async_trait]
    impl Provider for EmptyProvider {
        async fn list(&self) -> Result<Vec<ItemStatistics>> {
            Ok(Vec::new())
        }

        async fn item_stats(&self, _hash: &str) -> Result<ItemStatistics> {
            Err(PinningError::UnknownContent)
        }

        async fn service_stats(&self) -> Result<SiteStatistics> {
            Ok(SiteStatistics::default())
        }

        async fn pin_content(
            &self,
            _name: &str,
            _content: Option<ContentStream>,
            _opts: Option<&ContentOpts>,
        ) -> Result<String> {
            Err(PinningError::NoHashReturned)
        }

        async fn pin(&self, _hash: &str) -> Result<()> {
            Ok(())
        }

        async fn unpin(&self, _hash: &str) -> Result<()> {
            Ok(())
        }

        fn gateway_url(&self, _input: &str) -> Result<String> {
            Err(PinningError::UnrecognisedFormat)
        }
    }

    #[tokio::test]
    async fn test_provider_is_object_safe() {
        let provider: Box<dyn Provider> = Box::new(EmptyProvider);

        assert!(provider.list().await.unwrap().is_empty());
        assert!(provider.item_stats("QmHash").await.unwrap_err().is_not_found());
        assert_eq!(provider.service_stats().await.unwrap(), SiteStatistics::default());

        let stream: ContentStream = Box::new(&b"hello"[..]);
        let err = provider
            .pin_content("hello.txt", Some(stream), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PinningError::NoHashReturned));
    }
}
