//! Site content types.
//!
//! Field names follow the camelCase keys of `data/data.json`. Every field is
//! optional in the payload: missing strings become `""`, missing lists become
//! empty, so a partial document still renders (with blank sections).

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Complete content record for the site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteData {
    #[serde(deserialize_with = "lenient_string")]
    pub hero_title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub hero_subtitle: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tagline: String,

    #[serde(deserialize_with = "lenient_string")]
    pub about_short: String,
    /// Paragraphs separated by blank lines.
    #[serde(deserialize_with = "lenient_string")]
    pub about_long: String,

    #[serde(deserialize_with = "lenient_list")]
    pub research: Vec<ResearchItem>,
    #[serde(deserialize_with = "lenient_list")]
    pub publications: Vec<PublicationItem>,
    #[serde(deserialize_with = "lenient_string")]
    pub publications_note: String,
    #[serde(deserialize_with = "lenient_list")]
    pub projects: Vec<ProjectItem>,

    #[serde(deserialize_with = "lenient_string")]
    pub contact_email: String,
    #[serde(rename = "contactLinkedIn", deserialize_with = "lenient_string")]
    pub contact_linkedin: String,
    #[serde(deserialize_with = "lenient_string")]
    pub contact_location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub contact_availability: String,
    /// Path or URL of the CV document; empty when not published.
    #[serde(deserialize_with = "lenient_string")]
    pub cv_file: String,
}

impl SiteData {
    /// Top-level keys every complete payload carries, in declaration order.
    pub const KEYS: &'static [&'static str] = &[
        "heroTitle",
        "heroSubtitle",
        "tagline",
        "aboutShort",
        "aboutLong",
        "research",
        "publications",
        "publicationsNote",
        "projects",
        "contactEmail",
        "contactLinkedIn",
        "contactLocation",
        "contactAvailability",
        "cvFile",
    ];

    /// Paragraphs of the long about text, trimmed, blank ones dropped.
    pub fn about_paragraphs(&self) -> impl Iterator<Item = &str> {
        self.about_long
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// A research area card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchItem {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub image: Option<String>,
}

/// A project or award card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub image: Option<String>,
}

/// A publication card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationItem {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub journal: String,
    /// Kept as text: payloads write both `"2024"` and `2024`.
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub image: Option<String>,
}

// ============================================================================
// Lenient Deserializers
// ============================================================================

/// Text of a JSON value in a string slot.
///
/// Numbers and booleans keep their JSON text. `null`, objects and arrays
/// carry no text and come out empty.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(_) | Value::Array(_) => Some(String::new()),
        Value::Null => None,
    }
}

/// String field that takes any JSON value.
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(value_text(Value::deserialize(de)?).unwrap_or_default())
}

/// Optional string field with the same leniency as [`lenient_string`].
fn lenient_option<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(value_text(Value::deserialize(de)?))
}

/// List field that takes any JSON value.
///
/// Anything but an array is an empty list. Entries that are not objects keep
/// their slot as a blank item.
fn lenient_list<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(items) = Value::deserialize(de)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
            _ => T::default(),
        })
        .collect())
}
