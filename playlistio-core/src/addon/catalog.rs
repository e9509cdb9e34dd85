//! Catalog listing

use super::identifier;
use super::token::UserConfig;
use super::types::{CatalogResponse, MetaPreview};
use crate::{Error, Result};

/// One preview per configured catalog, in configuration order.
///
/// The preview type is the remote type from the identifier, not the
/// grouping label.
pub fn resolve_catalog(catalog_id: &str, config: &UserConfig) -> Result<CatalogResponse> {
    if !identifier::has_prefix(catalog_id) {
        return Err(Error::InvalidIdentifier(format!("unknown catalog id: {catalog_id}")));
    }

    let metas = config
        .catalogs
        .iter()
        .map(|entry| {
            let id = identifier::parse(&entry.id)?;
            Ok(MetaPreview {
                id: entry.id.clone(),
                name: format!("{} ({})", entry.name, id.remote_type),
                content_type: id.remote_type,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CatalogResponse { metas })
}
