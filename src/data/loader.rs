//! Candidate resolution with silent fallback.
//!
//! ```text
//! load_site_data()
//!     │
//!     └── resolve_site_data()          Result<SiteData, LoadError>
//!             │
//!             ├── fetch candidates[0] ──► parse ──► Ok
//!             ├── fetch candidates[1] ──► parse ──► Ok
//!             └── last error ──────────────────────► Err
//!
//!     Err ──► DEFAULT_SITE_DATA
//! ```

use super::{
    defaults::DEFAULT_SITE_DATA,
    error::LoadError,
    source::ContentSource,
    types::SiteData,
};
use crate::log;

/// Candidate locations covering root-level and one-level-nested pages.
///
/// Relative to the source base. For a file source rooted at the site root,
/// the second entry points at the root's parent directory.
pub const DEFAULT_CANDIDATES: &[&str] = &["data/data.json", "../data/data.json"];

/// Resolve site data, substituting the embedded default on any failure.
///
/// Never fails: callers get either the first parseable candidate or
/// [`DEFAULT_SITE_DATA`].
pub async fn load_site_data<S, C>(source: &S, candidates: &[C]) -> SiteData
where
    S: ContentSource + Sync,
    C: AsRef<str> + Sync,
{
    match resolve_site_data(source, candidates).await {
        Ok(data) => data,
        Err(err) => {
            log!("data"; "{err}, using embedded defaults");
            DEFAULT_SITE_DATA.clone()
        }
    }
}

/// Try each candidate in order and return the first one that parses.
///
/// Candidates are fetched one after another; a later candidate is only
/// requested once every earlier one has failed. The error of the last
/// attempted candidate is returned when all of them fail.
pub async fn resolve_site_data<S, C>(source: &S, candidates: &[C]) -> Result<SiteData, LoadError>
where
    S: ContentSource + Sync,
    C: AsRef<str> + Sync,
{
    let mut last_err = None;

    for candidate in candidates {
        let location = candidate.as_ref();
        match fetch_candidate(source, location).await {
            Ok(data) => return Ok(data),
            Err(err) => last_err = Some(err),
        }
    }

    Err(last_err.unwrap_or(LoadError::NoCandidates))
}

async fn fetch_candidate<S: ContentSource>(source: &S, location: &str) -> Result<SiteData, LoadError> {
    let body = source.fetch(location).await?;
    parse_site_data(&body, location)
}

/// Parse a payload, logging top-level keys it leaves out.
///
/// Any JSON object is accepted. Missing keys and oddly typed fields render as
/// empty sections; only bodies that fail to parse or are not objects fail.
pub fn parse_site_data(body: &[u8], location: &str) -> Result<SiteData, LoadError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|err| LoadError::Parse(location.to_owned(), err))?;

    if !value.is_object() {
        return Err(LoadError::NotObject(location.to_owned()));
    }

    let missing = missing_keys(&value);
    if !missing.is_empty() {
        log!("data"; "{location} is missing {}", missing.join(", "));
    }

    serde_json::from_value(value).map_err(|err| LoadError::Parse(location.to_owned(), err))
}

/// Top-level [`SiteData::KEYS`] absent from a parsed payload.
pub fn missing_keys(value: &serde_json::Value) -> Vec<&'static str> {
    SiteData::KEYS
        .iter()
        .copied()
        .filter(|key| value.get(*key).is_none())
        .collect()
}
