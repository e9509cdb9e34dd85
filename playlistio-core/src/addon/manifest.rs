//! Addon manifest

use super::identifier::{self, PREFIX};
use super::token::{UserConfig, DEFAULT_TYPE};
use super::types::{BehaviorHints, Manifest, ManifestCatalog};
use crate::config::AddonConfig;
use crate::Result;

/// Addon identifier announced to Stremio
pub const ADDON_ID: &str = "playlistio.elfhosted.com";

/// Builds the per-configuration manifest
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    name: String,
    description: String,
    version: String,
    dev_mode: bool,
}

impl ManifestBuilder {
    #[must_use]
    pub fn new(addon: &AddonConfig) -> Self {
        Self {
            name: addon.name.clone(),
            description: addon.description.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            dev_mode: addon.dev_mode,
        }
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Icon URL; tracks `main` in dev mode and the release tag otherwise
    #[must_use]
    pub fn logo_url(&self) -> String {
        let git_ref = if self.dev_mode {
            "main".to_string()
        } else {
            format!("v{}", self.version)
        };
        format!("https://github.com/xXCrash2BomberXx/Playlistio/blob/{git_ref}/icon.png?raw=true")
    }

    /// Manifest for a decoded configuration.
    ///
    /// Entries with a malformed identifier contribute no type but still
    /// keep their group listed.
    pub fn build(&self, config: &UserConfig) -> Result<Manifest> {
        let mut types: Vec<String> = Vec::new();
        for entry in &config.catalogs {
            let id = match identifier::parse(&entry.id) {
                Ok(id) => id,
                Err(err) => {
                    tracing::warn!(id = %entry.id, error = %err, "Skipping malformed catalog entry");
                    continue;
                }
            };
            if !types.contains(&id.remote_type) {
                types.push(id.remote_type);
            }
        }

        let mut catalogs: Vec<ManifestCatalog> = Vec::new();
        for entry in &config.catalogs {
            let group = entry.group();
            if catalogs.iter().any(|catalog| catalog.name == group) {
                continue;
            }
            catalogs.push(ManifestCatalog {
                content_type: DEFAULT_TYPE.to_string(),
                id: format!("{PREFIX}{group}"),
                name: group.to_string(),
            });
        }

        Ok(Manifest {
            id: ADDON_ID.to_string(),
            version: self.version.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            resources: vec!["catalog".to_string(), "meta".to_string()],
            types,
            id_prefixes: vec![PREFIX.to_string()],
            catalogs,
            logo: self.logo_url(),
            behavior_hints: BehaviorHints { configurable: true },
        })
    }
}
