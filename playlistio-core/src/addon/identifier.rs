//! Compound catalog identifiers
//!
//! Format: `pl_id:<hashKey>:<remoteType>/<remotePath>`.
//!
//! Only the first `:` after the prefix separates the hash key, and only the
//! first `/` after that separates the remote type, so a hash key must never
//! contain `:` and a remote type must never contain `/`. [`CompoundId::new`]
//! enforces both.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Namespace prefix of every identifier this addon hands out
pub const PREFIX: &str = "pl_id:";

/// A parsed compound identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundId {
    pub hash_key: String,
    pub remote_type: String,
    pub remote_path: String,
}

impl CompoundId {
    /// Validate and assemble identifier components
    pub fn new(
        hash_key: impl Into<String>,
        remote_type: impl Into<String>,
        remote_path: impl Into<String>,
    ) -> Result<Self> {
        let hash_key = hash_key.into();
        let remote_type = remote_type.into();

        if hash_key.contains(':') {
            return Err(Error::InvalidIdentifier(format!(
                "hash key must not contain ':': {hash_key}"
            )));
        }
        if remote_type.is_empty() || remote_type.contains('/') {
            return Err(Error::InvalidIdentifier(format!(
                "remote type must be non-empty and must not contain '/': {remote_type:?}"
            )));
        }

        Ok(Self {
            hash_key,
            remote_type,
            remote_path: remote_path.into(),
        })
    }

    /// Parse an identifier string
    pub fn parse(id: &str) -> Result<Self> {
        let rest = id
            .strip_prefix(PREFIX)
            .ok_or_else(|| Error::InvalidIdentifier(format!("missing '{PREFIX}' prefix: {id}")))?;

        let (hash_key, url) = rest
            .split_once(':')
            .ok_or_else(|| Error::InvalidIdentifier(format!("missing hash separator: {id}")))?;

        let (remote_type, remote_path) = url
            .split_once('/')
            .filter(|(remote_type, _)| !remote_type.is_empty())
            .ok_or_else(|| Error::InvalidIdentifier(format!("missing remote type: {id}")))?;

        Ok(Self {
            hash_key: hash_key.to_string(),
            remote_type: remote_type.to_string(),
            remote_path: remote_path.to_string(),
        })
    }
}

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}{}:{}/{}",
            self.hash_key, self.remote_type, self.remote_path
        )
    }
}

impl FromStr for CompoundId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse an identifier string
pub fn parse(id: &str) -> Result<CompoundId> {
    CompoundId::parse(id)
}

/// Build an identifier string from its components
pub fn build(hash_key: &str, remote_type: &str, remote_path: &str) -> Result<String> {
    CompoundId::new(hash_key, remote_type, remote_path).map(|id| id.to_string())
}

/// Whether `id` belongs to this addon's namespace
#[must_use]
pub fn has_prefix(id: &str) -> bool {
    id.starts_with(PREFIX)
}

/// Strip the namespace prefix, returning `id` unchanged if absent
#[must_use]
pub fn strip_prefix(id: &str) -> &str {
    id.strip_prefix(PREFIX).unwrap_or(id)
}
