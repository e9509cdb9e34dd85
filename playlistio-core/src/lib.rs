pub mod addon;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod provider;

#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use error::{Error, Result};
