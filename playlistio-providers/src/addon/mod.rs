//! Remote Stremio addon client

pub mod client;
pub mod types;

pub use client::{AddonClient, ClientOptions, FetchedManifest};
