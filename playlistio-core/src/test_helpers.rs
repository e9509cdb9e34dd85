//! Test helpers and fixtures for playlistio-core tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use playlistio_providers::{FetchedManifest, RemoteCatalog};

use crate::provider::CatalogSource;
use crate::{Error, Result};

/// In-memory `CatalogSource` serving canned JSON bodies by URL
///
/// Every requested URL is recorded; unknown URLs fail like a 404.
#[derive(Default)]
pub struct MockSource {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: &str, body: &Value) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_raw(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn body(&self, url: &str) -> Result<&str> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .map(String::as_str)
            .ok_or_else(|| Error::RemoteFetch(format!("HTTP error 404 Not Found for {url}")))
    }
}

#[async_trait]
impl CatalogSource for MockSource {
    async fn fetch_catalog(&self, url: &str) -> Result<RemoteCatalog> {
        let body = self.body(url)?;
        serde_json::from_str(body).map_err(|e| Error::RemoteFetch(e.to_string()))
    }

    async fn fetch_manifest(&self, url: &str) -> Result<FetchedManifest> {
        let body = self.body(url)?;
        let manifest = serde_json::from_str(body).map_err(|e| Error::RemoteFetch(e.to_string()))?;
        Ok(FetchedManifest {
            manifest,
            body: body.as_bytes().to_vec(),
        })
    }
}
