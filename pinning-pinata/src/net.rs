//! Authenticated HTTP helpers.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::RequestBuilder;
use serde_json::Value;

use pinning_core::error::{PinningError, Result};

use crate::decode::{decode_body, Payload};
use crate::provider::PinataProvider;

const API_KEY_HEADER: &str = "pinata_api_key";
const API_SECRET_HEADER: &str = "pinata_secret_api_key";

/// Body of a POST request.
pub(crate) enum RequestBody {
    /// No body at all.
    Empty,
    /// JSON document, sent as `application/json`.
    Json(Value),
    /// Multipart form; the boundary content type is set by reqwest.
    Multipart(Form),
}

impl PinataProvider {
    /// Runs a GET and decodes the response body.
    ///
    /// The status code is not inspected; failures are reported through the body.
    pub(crate) async fn get(&self, url: &str) -> Result<Payload> {
        let response = self
            .authorized(self.http_client.get(url))
            .send()
            .await
            .map_err(transport_error)?;

        let data = response.bytes().await.map_err(transport_error)?;
        decode_body(&data)
    }

    /// Runs a POST and decodes the response body.
    ///
    /// Any status of 300 or above fails with the status line.
    pub(crate) async fn post(&self, url: &str, body: RequestBody) -> Result<Payload> {
        let request = self.http_client.post(url);
        let request = match body {
            RequestBody::Empty => request.body(Vec::new()),
            RequestBody::Json(value) => request
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.as_u16() >= 300 {
            return Err(PinningError::HttpStatus(status.to_string()));
        }

        let data = response.bytes().await.map_err(transport_error)?;
        decode_body(&data)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_SECRET_HEADER, &self.api_secret)
    }
}

fn transport_error(err: reqwest::Error) -> PinningError {
    PinningError::HttpError(err.to_string())
}
