//! Content resolution errors.
//!
//! These never leave the data module through [`super::load_site_data`]; they
//! exist so the resolution step can be tested and logged on its own.

use thiserror::Error;

/// Why a candidate (or the whole candidate list) could not supply content.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error when reading `{0}`")]
    Io(String, #[source] std::io::Error),

    #[error("request for `{0}` failed")]
    Network(String, #[source] reqwest::Error),

    #[error("`{0}` answered with status {1}")]
    Status(String, u16),

    #[error("`{0}` is not valid site data")]
    Parse(String, #[source] serde_json::Error),

    #[error("`{0}` does not hold a JSON object")]
    NotObject(String),

    #[error("invalid location `{0}`")]
    Location(String),

    #[error("no candidate locations configured")]
    NoCandidates,
}
