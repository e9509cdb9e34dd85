//! Configuration token
//!
//! The whole user configuration travels in the first path segment of every
//! addon URL as percent-escaped JSON. Nothing is stored server side, so the
//! same token must always decode to the same configuration.

use std::collections::BTreeMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Grouping label used when a catalog entry carries no `type`
pub const DEFAULT_TYPE: &str = "Playlistio";

/// Characters left unescaped by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Decoded user configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Wrapped catalogs, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalogs: Vec<CatalogEntry>,

    /// Hash key -> catalog base URL
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hashes: BTreeMap<String, String>,
}

/// One wrapped remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Compound identifier (`pl_id:<hash>:<type>/<path>`)
    pub id: String,

    /// Manifest grouping label
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    pub name: String,
}

impl CatalogEntry {
    /// Grouping label, falling back to [`DEFAULT_TYPE`]
    #[must_use]
    pub fn group(&self) -> &str {
        self.group.as_deref().unwrap_or(DEFAULT_TYPE)
    }
}

/// Encode a configuration into a URL path segment
pub fn encode(config: &UserConfig) -> Result<String> {
    let json = serde_json::to_string(config)?;
    Ok(utf8_percent_encode(&json, URI_COMPONENT).to_string())
}

/// Decode a percent-escaped configuration token
pub fn decode(token: &str) -> Result<UserConfig> {
    let json = percent_decode_str(token)
        .decode_utf8()
        .map_err(|e| Error::ConfigDecode(format!("token is not valid UTF-8: {e}")))?;
    decode_segment(&json)
}

/// Decode a path segment that the router has already unescaped
pub fn decode_segment(segment: &str) -> Result<UserConfig> {
    let value: Value = serde_json::from_str(segment)
        .map_err(|e| Error::ConfigDecode(format!("token is not valid JSON: {e}")))?;

    if !value.is_object() {
        return Err(Error::ConfigDecode("token must be a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| Error::ConfigDecode(e.to_string()))
}
