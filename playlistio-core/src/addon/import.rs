//! Producer side of the configuration token
//!
//! Turns remote manifest URLs into catalog entries and hash registrations,
//! and turns a finished configuration into install links.

use serde::{Deserialize, Serialize};
use url::Url;

use super::hashes;
use super::identifier;
use super::token::{self, CatalogEntry, UserConfig, DEFAULT_TYPE};
use crate::provider::CatalogSource;
use crate::{Error, Result};

const MANIFEST_FILE: &str = "manifest.json";

/// Catalog entries derived from one remote manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedManifest {
    pub hash: String,
    pub base_url: String,
    pub catalogs: Vec<CatalogEntry>,
}

impl ImportedManifest {
    /// Register the hash and append the entries; returns the number added
    pub fn merge_into(self, config: &mut UserConfig) -> usize {
        let added = self.catalogs.len();
        config.hashes.insert(self.hash, self.base_url);
        config.catalogs.extend(self.catalogs);
        added
    }
}

/// Fetch a remote manifest and derive one entry per listable catalog.
///
/// Catalogs that require a search query are skipped.
pub async fn import_manifest(source: &dyn CatalogSource, manifest_url: &str) -> Result<ImportedManifest> {
    let base_url = manifest_url
        .strip_suffix(MANIFEST_FILE)
        .filter(|base| base.ends_with('/'))
        .ok_or_else(|| {
            Error::InvalidInput(format!("manifest URL must end with /{MANIFEST_FILE}: {manifest_url}"))
        })?;

    let fetched = source.fetch_manifest(manifest_url).await?;
    let hash = hashes::manifest_hash(&fetched.body);

    let catalogs = fetched
        .manifest
        .catalogs
        .into_iter()
        .filter(|catalog| !catalog.requires_search())
        .map(|catalog| {
            let remote_path = format!("catalog/{}/{}.json", catalog.content_type, catalog.id);
            Ok(CatalogEntry {
                id: identifier::build(&hash, &catalog.content_type, &remote_path)?,
                group: Some(DEFAULT_TYPE.to_string()),
                name: catalog.name.unwrap_or(catalog.id),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        url = %manifest_url,
        hash = %hash,
        catalogs = catalogs.len(),
        "Imported remote manifest"
    );

    Ok(ImportedManifest {
        hash,
        base_url: base_url.to_string(),
        catalogs,
    })
}

/// Links handed to the user once a configuration is complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallUrls {
    /// `stremio://` deep link for the desktop/mobile apps
    pub stremio: String,
    /// Plain manifest URL
    pub manifest: String,
    /// Stremio Web install link
    pub web: String,
    /// Configuration page prefilled with this configuration
    pub configure: String,
}

/// Prune unused hashes, encode the configuration and build install links
/// under `public_base` (e.g. `https://playlistio.example.com`).
pub fn install_urls(public_base: &str, config: &UserConfig) -> Result<InstallUrls> {
    let base = Url::parse(public_base)
        .map_err(|e| Error::InvalidInput(format!("invalid public URL {public_base}: {e}")))?;
    let host = base
        .host_str()
        .ok_or_else(|| Error::InvalidInput(format!("public URL has no host: {public_base}")))?;
    let authority = base
        .port()
        .map_or_else(|| host.to_string(), |port| format!("{host}:{port}"));
    let path = base.path().trim_end_matches('/');

    let mut config = config.clone();
    hashes::prune(&mut config);
    let token = token::encode(&config)?;

    let location = format!("://{authority}{path}/{token}/");
    let manifest = format!("{}{location}{MANIFEST_FILE}", base.scheme());
    let web = format!(
        "https://web.stremio.com/#/addons?addon={}",
        url::form_urlencoded::byte_serialize(manifest.as_bytes()).collect::<String>()
    );

    Ok(InstallUrls {
        stremio: format!("stremio{location}{MANIFEST_FILE}"),
        configure: format!("{}{location}configure", base.scheme()),
        manifest,
        web,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockSource;
    use serde_json::json;

    const MANIFEST_URL: &str = "https://remote.example/addon/manifest.json";

    fn manifest_body() -> String {
        json!({
            "id": "org.example.remote",
            "catalogs": [
                { "type": "movie", "id": "top", "name": "Top Movies" },
                { "type": "movie", "id": "search", "name": "Search", "extra": [{ "name": "search", "isRequired": true }] },
                { "type": "series", "id": "popular" }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_import_manifest() {
        let body = manifest_body();
        let source = MockSource::new().with_raw(MANIFEST_URL, &body);

        let imported = import_manifest(&source, MANIFEST_URL).await.unwrap();

        assert_eq!(imported.hash, hashes::manifest_hash(body.as_bytes()));
        assert_eq!(imported.base_url, "https://remote.example/addon/");
        assert_eq!(imported.catalogs.len(), 2);

        let first = &imported.catalogs[0];
        assert_eq!(first.name, "Top Movies");
        assert_eq!(first.group(), DEFAULT_TYPE);
        let id = identifier::parse(&first.id).unwrap();
        assert_eq!(id.hash_key, imported.hash);
        assert_eq!(id.remote_type, "movie");
        assert_eq!(id.remote_path, "catalog/movie/top.json");

        assert_eq!(imported.catalogs[1].name, "popular");
        assert_eq!(
            identifier::parse(&imported.catalogs[1].id).unwrap().remote_path,
            "catalog/series/popular.json"
        );
    }

    #[tokio::test]
    async fn test_import_resolves_back_to_remote_catalog() {
        let source = MockSource::new().with_raw(MANIFEST_URL, &manifest_body());
        let mut config = UserConfig::default();

        let added = import_manifest(&source, MANIFEST_URL)
            .await
            .unwrap()
            .merge_into(&mut config);
        assert_eq!(added, 2);

        let id = identifier::parse(&config.catalogs[0].id).unwrap();
        let base = hashes::resolve(&id.hash_key, &config.hashes).unwrap();
        assert_eq!(
            format!("{base}{}", id.remote_path),
            "https://remote.example/addon/catalog/movie/top.json"
        );
    }

    #[tokio::test]
    async fn test_import_rejects_non_manifest_url() {
        let source = MockSource::new();
        for url in ["https://remote.example/addon/", "https://remote.example/xmanifest.json"] {
            let err = import_manifest(&source, url).await.unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{url}");
        }
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_import_fetch_failure() {
        let err = import_manifest(&MockSource::new(), MANIFEST_URL).await.unwrap_err();
        assert!(matches!(err, Error::RemoteFetch(_)));
    }

    #[test]
    fn test_install_urls() {
        let mut config = UserConfig {
            catalogs: vec![CatalogEntry {
                id: "pl_id:abc:movie/catalog/movie/top.json".to_string(),
                group: None,
                name: "Top".to_string(),
            }],
            ..UserConfig::default()
        };
        config.hashes.insert("abc".to_string(), "https://src.example/".to_string());
        config.hashes.insert("stale".to_string(), "https://old.example/".to_string());

        let urls = install_urls("https://playlistio.example.com:8443/", &config).unwrap();

        let mut pruned = config.clone();
        pruned.hashes.remove("stale");
        let token = token::encode(&pruned).unwrap();

        assert_eq!(
            urls.manifest,
            format!("https://playlistio.example.com:8443/{token}/manifest.json")
        );
        assert_eq!(
            urls.stremio,
            format!("stremio://playlistio.example.com:8443/{token}/manifest.json")
        );
        assert_eq!(
            urls.configure,
            format!("https://playlistio.example.com:8443/{token}/configure")
        );
        assert!(urls.web.starts_with("https://web.stremio.com/#/addons?addon=https%3A%2F%2Fplaylistio"));
        assert_eq!(token::decode(&token).unwrap(), pruned);
    }

    #[test]
    fn test_install_urls_invalid_base() {
        assert!(matches!(
            install_urls("not a url", &UserConfig::default()),
            Err(Error::InvalidInput(_))
        ));
    }
}
