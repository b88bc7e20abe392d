//! `[data]` section configuration.
//!
//! Where `data.json` is resolved from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[data]` section in folio.toml - site data resolution.
///
/// # Example
/// ```toml
/// [data]
/// base = "."                                          # or "https://example.com/"
/// candidates = ["data/data.json", "../data/data.json"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Directory (relative to root) or `http(s)://` URL candidates are
    /// resolved against.
    #[serde(default = "defaults::data::base")]
    #[educe(Default = defaults::data::base())]
    pub base: String,

    /// Relative locations tried in order; the first parseable one wins.
    #[serde(default = "defaults::data::candidates")]
    #[educe(Default = defaults::data::candidates())]
    pub candidates: Vec<String>,
}

impl DataConfig {
    pub fn is_remote(&self) -> bool {
        self.base.starts_with("http://") || self.base.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_data_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.data.base, ".");
        assert_eq!(config.data.candidates, ["data/data.json", "../data/data.json"]);
        assert!(!config.data.is_remote());
    }

    #[test]
    fn test_data_config_remote() {
        let config = r#"
            [data]
            base = "https://ernest.example.com/"
            candidates = ["content.json"]
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(config.data.is_remote());
        assert_eq!(config.data.candidates, ["content.json"]);
    }
}
