use thiserror::Error;

use playlistio_providers::ProviderClientError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config decode error: {0}")]
    ConfigDecode(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Remote fetch error: {0}")]
    RemoteFetch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ProviderClientError> for Error {
    fn from(err: ProviderClientError) -> Self {
        Self::RemoteFetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
