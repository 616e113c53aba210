//! Pinata API operations.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tracing::{debug, instrument, warn};
use url::Url;

use pinning_core::constants::FILE_FIELD;
use pinning_core::error::{PinningError, Result};
use pinning_core::traits::Provider;
use pinning_core::types::{ContentOpts, ContentStream, ItemStatistics, SiteStatistics};

use crate::decode::from_payload;
use crate::net::RequestBody;
use crate::provider::PinataProvider;
use crate::records::{PinListPage, PinnedDataTotal, UploadResponse};

/// Number of pins requested per page when listing.
pub const PAGE_SIZE: u64 = 100;

const PIN_LIST_PATH: &str = "/data/pinList";
const HASH_SEARCH_PATH: &str = "/data/userPinList/hashContains";
const HASH_SEARCH_FILTERS: &[&str] = &[
    "pinStart", "*", "pinEnd", "*", "unpinStart", "*", "unpinEnd", "*", "pinSizeMin", "*",
    "pinSizeMax", "*", "pinFilter", "pinned", "pageLimit", "1", "pageOffset", "0",
];
const PINNED_TOTAL_PATH: &str = "/data/userPinnedDataTotal";
const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
const PIN_HASH_PATH: &str = "/pinning/pinHashToIPFS";
const UNPIN_PATH: &str = "/pinning/removePinFromIPFS";

const OPTIONS_FIELD: &str = "pinataOptions";
const WRAP_WITH_DIRECTORY: &str = r#"{"wrapWithDirectory":true}"#;

impl PinataProvider {
    /// Lists all content pinned to this account.
    ///
    /// Pages are fetched one after another until the reported `count` is
    /// reached. Each page starts where the rows collected so far end, so a
    /// server that returns short pages is still read without gaps. A failure
    /// on any page fails the whole listing.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ItemStatistics>> {
        let first = self.pin_list_page(0).await?;
        let count = first.count()?;

        let mut content = Vec::new();
        let mut pages = 0u64;
        let mut next = Some(first);
        while (content.len() as u64) < count {
            let current = match next.take() {
                Some(current) => current,
                None => self.pin_list_page(content.len() as u64).await?,
            };
            pages += 1;

            let rows = current.rows.ok_or(PinningError::MissingField("rows"))?;
            if rows.is_empty() {
                break;
            }
            for row in rows {
                if content.len() as u64 == count {
                    break;
                }
                content.push(row.into_item()?);
            }
        }

        if (content.len() as u64) < count {
            warn!(count, listed = content.len(), "Pin list ended before reported count");
        }
        debug!(count = content.len(), pages, "Listed pins");
        Ok(content)
    }

    async fn pin_list_page(&self, offset: u64) -> Result<PinListPage> {
        let url = format!(
            "{}?status=pinned&pageLimit={}&pageOffset={}",
            self.endpoint(PIN_LIST_PATH),
            PAGE_SIZE,
            offset
        );
        from_payload(self.get(&url).await?)
    }

    /// Returns information on a single pinned hash.
    ///
    /// The hash is sent as one percent-encoded path segment.
    #[instrument(skip(self))]
    pub async fn item_stats(&self, hash: &str) -> Result<ItemStatistics> {
        let url = self.hash_search_url(hash)?;
        let page: PinListPage = from_payload(self.get(url.as_str()).await?)?;

        match page.count()? {
            0 => return Err(PinningError::UnknownContent),
            1 => {}
            _ => return Err(PinningError::MultipleMatchingContents),
        }

        let row = page
            .rows
            .and_then(|rows| rows.into_iter().next())
            .ok_or(PinningError::MissingField("rows"))?;
        row.into_item()
    }

    fn hash_search_url(&self, hash: &str) -> Result<Url> {
        let invalid = || PinningError::ConfigError(format!("invalid API URL: {}", self.config.api_url));
        let mut url = Url::parse(&self.endpoint(HASH_SEARCH_PATH)).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .push(hash)
            .extend(HASH_SEARCH_FILTERS);
        Ok(url)
    }

    /// Returns the number and total size of pins on this account.
    #[instrument(skip(self))]
    pub async fn service_stats(&self) -> Result<SiteStatistics> {
        let totals: PinnedDataTotal = from_payload(self.get(&self.endpoint(PINNED_TOTAL_PATH)).await?)?;
        totals.into_stats()
    }

    /// Uploads `content` under `name` and pins it.
    ///
    /// The stream is read to the end and dropped before the request is sent.
    /// Without a name or a stream an empty request is sent (any stream is still
    /// dropped), which the service normally answers without a hash.
    #[instrument(skip(self, content, opts))]
    pub async fn pin_content(
        &self,
        name: &str,
        content: Option<ContentStream>,
        opts: Option<&ContentOpts>,
    ) -> Result<String> {
        let opts = opts.copied().unwrap_or_default();

        let body = match (name.is_empty(), content) {
            (false, Some(mut stream)) => {
                let mut data = Vec::new();
                stream.read_to_end(&mut data).await?;
                drop(stream);

                let file = Part::bytes(data)
                    .file_name(name.to_string())
                    .mime_str("application/octet-stream")
                    .map_err(|e| PinningError::HttpError(e.to_string()))?;
                let mut form = Form::new().part(FILE_FIELD, file);
                if opts.store_in_directory {
                    form = form.text(OPTIONS_FIELD, WRAP_WITH_DIRECTORY);
                }
                RequestBody::Multipart(form)
            }
            _ => RequestBody::Empty,
        };

        let payload = self.post(&self.endpoint(PIN_FILE_PATH), body).await?;
        let response: UploadResponse = from_payload(payload)?;
        let hash = response
            .ipfs_hash
            .filter(|hash| !hash.is_empty())
            .ok_or(PinningError::NoHashReturned)?;

        debug!(%hash, "Pinned content");
        Ok(hash)
    }

    /// Pins content that already exists on the network.
    #[instrument(skip(self))]
    pub async fn pin(&self, hash: &str) -> Result<()> {
        let body = RequestBody::Json(json!({ "hashToPin": hash }));
        self.post(&self.endpoint(PIN_HASH_PATH), body).await?;
        debug!(hash, "Pinned hash");
        Ok(())
    }

    /// Removes a pin.
    #[instrument(skip(self))]
    pub async fn unpin(&self, hash: &str) -> Result<()> {
        let body = RequestBody::Json(json!({ "ipfs_pin_hash": hash }));
        self.post(&self.endpoint(UNPIN_PATH), body).await?;
        debug!(hash, "Unpinned hash");
        Ok(())
    }

    /// Resolves a content address onto the configured gateway.
    pub fn gateway_url(&self, input: &str) -> Result<String> {
        self.gateway.resolve(input)
    }
}

#[async_trait]
impl Provider for PinataProvider {
    async fn list(&self) -> Result<Vec<ItemStatistics>> {
        PinataProvider::list(self).await
    }

    async fn item_stats(&self, hash: &str) -> Result<ItemStatistics> {
        PinataProvider::item_stats(self, hash).await
    }

    async fn service_stats(&self) -> Result<SiteStatistics> {
        PinataProvider::service_stats(self).await
    }

    async fn pin_content(
        &self,
        name: &str,
        content: Option<ContentStream>,
        opts: Option<&ContentOpts>,
    ) -> Result<String> {
        PinataProvider::pin_content(self, name, content, opts).await
    }

    async fn pin(&self, hash: &str) -> Result<()> {
        PinataProvider::pin(self, hash).await
    }

    async fn unpin(&self, hash: &str) -> Result<()> {
        PinataProvider::unpin(self, hash).await
    }

    fn gateway_url(&self, input: &str) -> Result<String> {
        PinataProvider::gateway_url(self, input)
    }
}
