// Catalog source trait
//
// The one outbound seam of the addon: everything the resolvers need from
// a wrapped remote addon.

use async_trait::async_trait;

use playlistio_providers::{FetchedManifest, RemoteCatalog};

use crate::Result;

/// Fetches resources from remote Stremio addons
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch a catalog response from an absolute URL
    async fn fetch_catalog(&self, url: &str) -> Result<RemoteCatalog>;

    /// Fetch a manifest together with its raw body
    async fn fetch_manifest(&self, url: &str) -> Result<FetchedManifest>;
}
