//! Meta resolution
//!
//! A wrapped remote catalog is presented as one series with a single
//! season; each remote item becomes an episode in catalog order.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use playlistio_providers::RemoteMeta;

use super::hashes;
use super::identifier;
use super::token::UserConfig;
use super::types::{Meta, MetaResponse, Video};
use crate::provider::CatalogSource;
use crate::{Error, Result};

/// Season number of every synthetic episode
const SEASON: u32 = 1;

/// `released` of items that carry none (`1970-01-01T00:00:00.000Z`)
fn epoch_timestamp() -> String {
    DateTime::<Utc>::UNIX_EPOCH.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Resolve `id` to its remote catalog and reshape it as a series
pub async fn resolve_meta(
    source: &dyn CatalogSource,
    meta_type: &str,
    id: &str,
    config: &UserConfig,
) -> Result<MetaResponse> {
    if !identifier::has_prefix(id) {
        return Err(Error::InvalidIdentifier(format!("unknown meta id: {id}")));
    }

    let entry = config
        .catalogs
        .iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| Error::CatalogNotFound(id.to_string()))?;

    let compound = identifier::parse(&entry.id)?;

    let base_url = hashes::resolve(&compound.hash_key, &config.hashes).unwrap_or_else(|| {
        tracing::debug!(hash_key = %compound.hash_key, "No base URL registered for hash key");
        ""
    });
    let url = format!("{base_url}{}", compound.remote_path);

    let catalog = source.fetch_catalog(&url).await?;
    tracing::debug!(%url, items = catalog.metas.len(), "Fetched remote catalog");

    let videos = catalog
        .metas
        .into_iter()
        .enumerate()
        .map(|(index, item)| to_video(index, item))
        .collect();

    Ok(MetaResponse {
        meta: Meta {
            id: Some(id.to_string()),
            content_type: Some(meta_type.to_string()),
            name: Some(format!("{} ({})", entry.name, compound.remote_type)),
            videos: Some(videos),
        },
    })
}

/// Map the zero-based `index`-th remote item to an episode
fn to_video(index: usize, item: RemoteMeta) -> Video {
    Video {
        id: item.id,
        title: item.name,
        released: item
            .released
            .unwrap_or_else(|| Value::String(epoch_timestamp())),
        thumbnail: item.background.or(item.poster),
        episode: index + 1,
        season: SEASON,
        trailers: item.trailers,
        overview: item.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::token::{decode_segment, CatalogEntry};
    use crate::test_helpers::MockSource;
    use serde_json::json;
    use std::collections::BTreeMap;

    const ID: &str = "pl_id:abc:movie/catalog/top.json";

    fn example_config() -> UserConfig {
        decode_segment(
            r#"{"catalogs":[{"id":"pl_id:abc:movie/catalog/top.json","type":"Playlistio","name":"Top Movies"}],"hashes":{"abc":"https://src.example/"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_epoch_timestamp() {
        assert_eq!(epoch_timestamp(), "1970-01-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_example_meta() {
        let source = MockSource::new().with_json(
            "https://src.example/catalog/top.json",
            &json!({
                "metas": [
                    {
                        "id": "tt0111161",
                        "name": "The Shawshank Redemption",
                        "released": "1994-09-23T00:00:00.000Z",
                        "background": "https://img/bg.jpg",
                        "poster": "https://img/poster.jpg",
                        "trailers": [{ "source": "abc", "type": "Trailer" }],
                        "description": "Two imprisoned men bond."
                    },
                    { "id": "tt0068646", "name": "The Godfather", "poster": "https://img/gf.jpg" }
                ]
            }),
        );

        let response = resolve_meta(&source, "Playlistio", ID, &example_config())
            .await
            .unwrap();

        assert_eq!(source.requests(), vec!["https://src.example/catalog/top.json"]);

        let meta = response.meta;
        assert_eq!(meta.id.as_deref(), Some(ID));
        assert_eq!(meta.content_type.as_deref(), Some("Playlistio"));
        assert_eq!(meta.name.as_deref(), Some("Top Movies (movie)"));

        let videos = meta.videos.unwrap();
        assert_eq!(videos.len(), 2);

        assert_eq!(videos[0].id, Some(json!("tt0111161")));
        assert_eq!(videos[0].title, Some(json!("The Shawshank Redemption")));
        assert_eq!(videos[0].released, json!("1994-09-23T00:00:00.000Z"));
        assert_eq!(videos[0].thumbnail, Some(json!("https://img/bg.jpg")));
        assert_eq!(videos[0].trailers, Some(json!([{ "source": "abc", "type": "Trailer" }])));
        assert_eq!(videos[0].overview, Some(json!("Two imprisoned men bond.")));

        assert_eq!(videos[1].released, json!("1970-01-01T00:00:00.000Z"));
        assert_eq!(videos[1].thumbnail, Some(json!("https://img/gf.jpg")));
        assert_eq!(videos[1].overview, None);
    }

    #[tokio::test]
    async fn test_episodes_are_numbered_in_order() {
        let metas: Vec<Value> = (0..7).map(|i| json!({ "id": format!("tt{i}") })).collect();
        let source = MockSource::new()
            .with_json("https://src.example/catalog/top.json", &json!({ "metas": metas }));

        let videos = resolve_meta(&source, "series", ID, &example_config())
            .await
            .unwrap()
            .meta
            .videos
            .unwrap();

        assert_eq!(videos.len(), 7);
        for (i, video) in videos.iter().enumerate() {
            assert_eq!(video.episode, i + 1);
            assert_eq!(video.season, 1);
            assert_eq!(video.id, Some(json!(format!("tt{i}"))));
        }
    }

    #[tokio::test]
    async fn test_items_keep_their_json_types() {
        let source = MockSource::new().with_json(
            "https://src.example/catalog/top.json",
            &json!({
                "metas": [
                    { "id": "tt1" },
                    { "id": 42, "name": 7, "poster": { "url": "p.jpg" }, "description": ["a", "b"] }
                ]
            }),
        );

        let videos = resolve_meta(&source, "series", ID, &example_config())
            .await
            .unwrap()
            .meta
            .videos
            .unwrap();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, Some(json!("tt1")));
        assert_eq!(videos[1].id, Some(json!(42)));
        assert_eq!(videos[1].title, Some(json!(7)));
        assert_eq!(videos[1].thumbnail, Some(json!({ "url": "p.jpg" })));
        assert_eq!(videos[1].overview, Some(json!(["a", "b"])));
        assert_eq!(videos[1].episode, 2);
    }

    #[tokio::test]
    async fn test_empty_remote_catalog() {
        let source = MockSource::new()
            .with_json("https://src.example/catalog/top.json", &json!({ "metas": [] }));

        let meta = resolve_meta(&source, "series", ID, &example_config())
            .await
            .unwrap()
            .meta;
        assert_eq!(meta.videos, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_missing_hash_uses_empty_base_url() {
        let mut config = example_config();
        config.hashes = BTreeMap::new();
        let source = MockSource::new();

        let err = resolve_meta(&source, "series", ID, &config).await.unwrap_err();

        assert!(matches!(err, Error::RemoteFetch(_)));
        assert_eq!(source.requests(), vec!["catalog/top.json"]);
    }

    #[tokio::test]
    async fn test_entry_not_found() {
        let source = MockSource::new();
        let err = resolve_meta(&source, "series", "pl_id:abc:movie/other.json", &example_config())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CatalogNotFound(_)));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_prefix() {
        let source = MockSource::new();
        let err = resolve_meta(&source, "movie", "tt0111161", &example_config())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier(_)));
    }

    #[tokio::test]
    async fn test_malformed_entry_identifier() {
        let config = UserConfig {
            catalogs: vec![CatalogEntry {
                id: "pl_id:no-separator".to_string(),
                group: None,
                name: "broken".to_string(),
            }],
            ..UserConfig::default()
        };
        let err = resolve_meta(&MockSource::new(), "series", "pl_id:no-separator", &config)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier(_)));
    }

    #[tokio::test]
    async fn test_malformed_remote_json() {
        let source = MockSource::new()
            .with_raw("https://src.example/catalog/top.json", r#"{"metas": "nope"}"#);
        let err = resolve_meta(&source, "series", ID, &example_config())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteFetch(_)));
    }
}
