//! Hash registry
//!
//! `UserConfig::hashes` maps the content hash of a remote manifest to the
//! base URL its catalog paths are resolved against.

use std::collections::{BTreeMap, HashSet};

use sha2::{Digest, Sha256};

use super::identifier;
use super::token::UserConfig;

/// Look up the base URL registered for `hash_key`
#[must_use]
pub fn resolve<'a>(hash_key: &str, hashes: &'a BTreeMap<String, String>) -> Option<&'a str> {
    hashes.get(hash_key).map(String::as_str)
}

/// Lowercase hex SHA-256 of a manifest body
#[must_use]
pub fn manifest_hash(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// Drop hash entries that no catalog identifier references.
///
/// Entries whose identifiers do not parse reference nothing.
pub fn prune(config: &mut UserConfig) {
    let referenced: HashSet<String> = config
        .catalogs
        .iter()
        .filter_map(|entry| identifier::parse(&entry.id).ok())
        .map(|id| id.hash_key)
        .collect();

    config.hashes.retain(|key, _| referenced.contains(key));
}
