//! Response body decoding.
//!
//! Pinata answers with JSON objects, plain text, or an `error` field inside an
//! otherwise successful response. [`decode_body`] folds all of these into a
//! [`Payload`] or an error; [`from_payload`] then turns the payload into the
//! loosely optional record an operation expects.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use pinning_core::error::{PinningError, Result};

/// Untyped response body.
pub type Payload = Map<String, Value>;

/// Key under which a plain-text body is stored.
pub const MESSAGE_KEY: &str = "message";

/// Key the service uses to report failures.
pub const ERROR_KEY: &str = "error";

/// Decodes a raw response body.
///
/// - empty body: empty payload
/// - JSON object: the object, unless it carries an `error` field
/// - anything not starting with `{` that fails to decode: the trimmed text under `message`
/// - a body starting with `{` that fails to decode: [`PinningError::MalformedResponse`]
pub fn decode_body(data: &[u8]) -> Result<Payload> {
    if data.is_empty() {
        return Ok(Payload::new());
    }

    let payload = match serde_json::from_slice::<Payload>(data) {
        Ok(payload) => payload,
        Err(_) if data[0] != b'{' => {
            let text = String::from_utf8_lossy(data).trim().to_string();
            let mut payload = Payload::new();
            payload.insert(MESSAGE_KEY.into(), Value::String(text));
            return Ok(payload);
        }
        Err(_) => {
            return Err(PinningError::MalformedResponse(
                String::from_utf8_lossy(data).into_owned(),
            ))
        }
    };

    match payload.get(ERROR_KEY) {
        None | Some(Value::Null) => Ok(payload),
        Some(error) => Err(PinningError::Api(error_text(error))),
    }
}

/// Converts a payload into a typed record.
pub fn from_payload<T: DeserializeOwned>(payload: Payload) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(payload))?)
}

/// Extracts a readable message from an `error` value.
///
/// Older endpoints send a plain string, newer ones `{"reason": .., "details": ..}`.
fn error_text(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        Value::Object(fields) => ["details", "reason"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}
