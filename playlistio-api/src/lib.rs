// Playlistio API Library
//
// HTTP surface of the addon: Stremio resources, configuration page and
// manifest import endpoint

pub mod http;

// Re-export commonly used types
pub use http::{create_router, AppState};
