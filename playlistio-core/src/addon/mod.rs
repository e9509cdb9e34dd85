// Stremio addon protocol
//
// token      - configuration token codec (UserConfig <-> URL segment)
// identifier - compound catalog identifiers
// hashes     - hash key -> base URL registry
// manifest / catalog / meta - the three addon resources
// import     - producer side: manifest import and install links

pub mod catalog;
pub mod hashes;
pub mod identifier;
pub mod import;
pub mod manifest;
pub mod meta;
pub mod token;
pub mod types;

pub use catalog::resolve_catalog;
pub use identifier::{CompoundId, PREFIX};
pub use import::{import_manifest, install_urls, ImportedManifest, InstallUrls};
pub use manifest::{ManifestBuilder, ADDON_ID};
pub use meta::resolve_meta;
pub use token::{CatalogEntry, UserConfig, DEFAULT_TYPE};
pub use types::{CatalogResponse, Manifest, Meta, MetaPreview, MetaResponse, Video};
