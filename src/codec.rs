//! Wire encodings for the timestamp exchanged over HTTP.
//!
//! `text` carries whole seconds since the Unix epoch as a decimal string.
//! `json` carries `{"time": "<RFC 3339>"}`. Server and demo client share
//! these functions so both ends agree on the format.

use std::{fmt, str::FromStr};

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::state::timestamp::Timestamp;

pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    #[default]
    Text,
    Json,
}

impl WireFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            WireFormat::Text => TEXT_CONTENT_TYPE,
            WireFormat::Json => JSON_CONTENT_TYPE,
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Text => f.write_str("text"),
            WireFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(WireFormat::Text),
            "json" => Ok(WireFormat::Json),
            other => Err(format!("unknown wire format `{other}` (expected text or json)")),
        }
    }
}

/// JSON body shape. `time` may be missing or `null`, which decodes as an
/// absent value and is left for the store to reject.
#[derive(Debug, Serialize, Deserialize)]
pub struct TimeBody {
    #[serde(default)]
    pub time: Option<Timestamp>,
}

/// Decode a timestamp from a request or response body.
pub fn decode(format: WireFormat, body: &[u8]) -> Result<Option<Timestamp>, ApiError> {
    match format {
        WireFormat::Text => decode_text(body).map(Some),
        WireFormat::Json => serde_json::from_slice::<TimeBody>(body)
            .map(|parsed| parsed.time)
            .map_err(|e| ApiError::Decode(e.to_string())),
    }
}

fn decode_text(body: &[u8]) -> Result<Timestamp, ApiError> {
    let text = std::str::from_utf8(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let secs: i64 = text
        .trim()
        .parse()
        .map_err(|e| ApiError::Decode(format!("invalid seconds value {:?}: {e}", text.trim())))?;

    Timestamp::from_unix_seconds(secs)
        .ok_or_else(|| ApiError::Decode(format!("seconds value {secs} is out of range")))
}

/// Encode a timestamp as a body in the given format.
///
/// The text format truncates to whole seconds.
pub fn encode(format: WireFormat, value: Timestamp) -> String {
    match format {
        WireFormat::Text => value.unix_seconds().to_string(),
        // A struct of one RFC 3339 string cannot fail to serialize.
        WireFormat::Json => serde_json::to_string(&TimeBody { time: Some(value) })
            .unwrap_or_else(|_| format!("{{\"time\":\"{value}\"}}")),
    }
}

/// Build the HTTP response for a read, with the matching content type.
pub fn into_response(format: WireFormat, value: Timestamp) -> Response {
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static(format.content_type()))],
        encode(format, value),
    )
        .into_response()
}
