// Remote catalog providers
//
// `CatalogSource` abstracts the outbound fetch; `AddonClient` from
// playlistio-providers is the production implementation.

mod addon;
mod traits;

pub use traits::CatalogSource;
