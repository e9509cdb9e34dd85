//! Remote addon HTTP Client

use std::time::Duration;

use reqwest::{header::{HeaderValue, ACCEPT}, Client, Url};

use super::types::{RemoteCatalog, RemoteManifest};
use crate::error::{ensure_success, read_body, ProviderClientError, MAX_RESPONSE_SIZE};

/// Maximum number of redirects followed for a single request
const MAX_REDIRECTS: usize = 5;

/// HTTP client tuning
#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    pub connect_timeout: Duration,
    /// Total budget for one request, body included
    pub timeout: Duration,
    pub max_body_size: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            max_body_size: MAX_RESPONSE_SIZE,
        }
    }
}

/// A manifest together with the exact bytes it was served as.
///
/// The raw body is kept because the manifest hash is computed over it.
#[derive(Debug, Clone)]
pub struct FetchedManifest {
    pub manifest: RemoteManifest,
    pub body: Vec<u8>,
}

/// Client for remote Stremio addons
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct AddonClient {
    client: Client,
    max_body_size: usize,
}

impl AddonClient {
    /// Create a new client with its own connection pool
    pub fn new(options: ClientOptions) -> Result<Self, ProviderClientError> {
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .pool_max_idle_per_host(10)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("playlistio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            max_body_size: options.max_body_size,
        })
    }

    /// GET `url` and return the raw body of a successful response
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderClientError> {
        let url = Url::parse(url)?;
        tracing::debug!(%url, "Fetching remote addon resource");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        read_body(ensure_success(response)?, self.max_body_size).await
    }

    /// Fetch a catalog (`{ "metas": [...] }`) from an absolute URL
    pub async fn get_catalog(&self, url: &str) -> Result<RemoteCatalog, ProviderClientError> {
        let body = self.get(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch a manifest and keep its raw body
    pub async fn get_manifest(&self, url: &str) -> Result<FetchedManifest, ProviderClientError> {
        let body = self.get(url).await?;
        let manifest = serde_json::from_slice(&body)?;
        Ok(FetchedManifest { manifest, body })
    }
}
