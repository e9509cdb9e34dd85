//! `CatalogSource` adapter over the remote addon HTTP client

use async_trait::async_trait;

use playlistio_providers::{AddonClient, FetchedManifest, RemoteCatalog};

use super::CatalogSource;
use crate::Result;

#[async_trait]
impl CatalogSource for AddonClient {
    async fn fetch_catalog(&self, url: &str) -> Result<RemoteCatalog> {
        self.get_catalog(url).await.map_err(Into::into)
    }

    async fn fetch_manifest(&self, url: &str) -> Result<FetchedManifest> {
        self.get_manifest(url).await.map_err(Into::into)
    }
}
