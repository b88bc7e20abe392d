//! Errors raised while reading or checking `folio.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A setting that parsed but cannot be used, keyed by its `section.field`.
    #[error("[{key}] {reason}")]
    Validation { key: &'static str, reason: &'static str },
}

impl ConfigError {
    pub const fn invalid(key: &'static str, reason: &'static str) -> Self {
        Self::Validation { key, reason }
    }
}
