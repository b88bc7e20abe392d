//! `[base]` section configuration.
//!
//! Contains basic site information used in the page `<head>`.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Ernest Bernin"
/// description = "PhD Candidate in Chemistry"
/// url = "https://ernest.example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Browser tab title. Falls back to the hero title of the site data.
    #[serde(default)]
    pub title: String,

    /// Author name for meta tags.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Site description for SEO meta tags.
    #[serde(default)]
    pub description: String,

    /// Public URL of the deployed site, written as each page's canonical
    /// link. `serve` replaces it with the local server address.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code (e.g., "en", "fr-CA").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Ernest Bernin"
            description = "Chemistry"
            url = "https://ernest.example.com"
            language = "en-US"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Ernest Bernin");
        assert_eq!(config.base.description, "Chemistry");
        assert_eq!(config.base.url, Some("https://ernest.example.com".to_string()));
        assert_eq!(config.base.language, "en-US");
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.title, "");
        assert_eq!(config.base.author, "<YOUR_NAME>");
        assert_eq!(config.base.language, "en");
        assert_eq!(config.base.url, None);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
