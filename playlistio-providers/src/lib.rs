// Playlistio Provider Clients
//
// Pure HTTP clients for the remote Stremio addons that Playlistio wraps.
// These clients know nothing about the Playlistio configuration token;
// playlistio-core adapts them to its CatalogSource trait.

// Shared error types
pub mod error;

// HTTP clients
pub mod addon;

// Re-export client types for convenience
pub use addon::types::{RemoteCatalog, RemoteCatalogDescriptor, RemoteExtra, RemoteManifest, RemoteMeta};
pub use addon::{AddonClient, ClientOptions, FetchedManifest};
pub use error::ProviderClientError;
