//! Remote Stremio addon data structures

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Catalog response of a remote addon (`/catalog/<type>/<id>.json`)
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCatalog {
    pub metas: Vec<RemoteMeta>,
}

/// One item of a remote catalog
///
/// Fields are passed through untouched, so they keep whatever JSON type the
/// remote addon used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteMeta {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub released: Option<Value>,
    #[serde(default)]
    pub background: Option<Value>,
    #[serde(default)]
    pub poster: Option<Value>,
    #[serde(default)]
    pub trailers: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

/// The parts of a remote manifest needed to import its catalogs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteManifest {
    #[serde(default)]
    pub catalogs: Vec<RemoteCatalogDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCatalogDescriptor {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub extra: Vec<RemoteExtra>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteExtra {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "isRequired", default, deserialize_with = "null_as_empty")]
    pub is_required: bool,
}

/// Treat an explicit `null` like a missing field
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RemoteCatalogDescriptor {
    /// Catalogs that only answer search queries cannot be listed.
    #[must_use]
    pub fn requires_search(&self) -> bool {
        self.extra
            .iter()
            .any(|extra| extra.name == "search" && extra.is_required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_catalog_requires_metas() {
        assert!(serde_json::from_str::<RemoteCatalog>(r#"{"metas":[]}"#).is_ok());
        assert!(serde_json::from_str::<RemoteCatalog>(r"{}").is_err());
    }

    #[test]
    fn test_remote_meta_null_fields() {
        let meta: RemoteMeta = serde_json::from_str(
            r#"{"id":"tt1","name":"Movie","released":null,"poster":"p.jpg"}"#,
        )
        .unwrap();
        assert_eq!(meta.id, Some(Value::from("tt1")));
        assert!(meta.released.is_none());
        assert!(meta.background.is_none());
        assert_eq!(meta.poster, Some(Value::from("p.jpg")));
    }

    #[test]
    fn test_remote_meta_mixed_types() {
        let catalog: RemoteCatalog = serde_json::from_str(
            r#"{"metas":[{"id":"tt1"},{"id":42,"name":7,"poster":{"url":"p.jpg"},"description":["a"]}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.metas.len(), 2);
        assert_eq!(catalog.metas[1].id, Some(Value::from(42)));
        assert_eq!(catalog.metas[1].poster, Some(serde_json::json!({ "url": "p.jpg" })));
    }

    #[test]
    fn test_requires_search() {
        let manifest: RemoteManifest = serde_json::from_str(
            r#"{"catalogs":[
                {"type":"movie","id":"top","name":"Top"},
                {"type":"movie","id":"search","extra":[{"name":"search","isRequired":true}]},
                {"type":"series","id":"opt","extra":[{"name":"search"},{"name":"skip","isRequired":true}]}
            ]}"#,
        )
        .unwrap();
        let flags: Vec<bool> = manifest.catalogs.iter().map(RemoteCatalogDescriptor::requires_search).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_lenient_extra() {
        let manifest: RemoteManifest = serde_json::from_str(
            r#"{"catalogs":[
                {"type":"movie","id":"top","extra":null},
                {"type":"movie","id":"odd","extra":[{"isRequired":true},{"name":null,"isRequired":null}]},
                {"type":"movie","id":"find","extra":[{"name":"genre"},{"name":"search","isRequired":true}]}
            ]}"#,
        )
        .unwrap();
        assert!(manifest.catalogs[0].extra.is_empty());
        assert_eq!(manifest.catalogs[1].extra.len(), 2);
        assert!(!manifest.catalogs[1].requires_search());
        assert!(manifest.catalogs[2].requires_search());
    }
}
