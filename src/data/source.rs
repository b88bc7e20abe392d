//! Places site data can be fetched from.
//!
//! A source turns a relative candidate location (`data/data.json`,
//! `../data/data.json`) into raw bytes. Resolution against the base happens
//! here, so the loader only deals with the ordered candidate list.

use super::error::LoadError;
use reqwest::{
    Client, Url,
    header::{CACHE_CONTROL, PRAGMA},
};
use std::{
    future::Future,
    path::{Path, PathBuf},
};

/// Something that can fetch the body stored at a relative location.
pub trait ContentSource {
    /// Fetch the raw body at `location`.
    ///
    /// Any failure (missing file, transport error, non-success status) is an
    /// `Err`; the caller decides whether to move on to the next candidate.
    fn fetch(&self, location: &str) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

// ============================================================================
// Filesystem
// ============================================================================

/// Reads candidates relative to a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    base: PathBuf,
}

impl FileSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ContentSource for FileSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(self.base.join(location))
            .await
            .map_err(|err| LoadError::Io(location.to_owned(), err))
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Requests candidates relative to a base URL, bypassing HTTP caches.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    /// Create a source rooted at `base`.
    ///
    /// The base is treated as a directory: `https://a.org/pages` resolves
    /// `../data/data.json` to `https://a.org/data/data.json`.
    pub fn new(base: &str) -> Result<Self, LoadError> {
        let dir = if base.ends_with('/') {
            base.to_owned()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&dir).map_err(|_| LoadError::Location(base.to_owned()))?;
        let client = Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| LoadError::Network(base.to_string(), err))?;

        Ok(Self { base, client })
    }

    /// Absolute URL for a candidate location.
    pub fn resolve(&self, location: &str) -> Result<Url, LoadError> {
        self.base
            .join(location)
            .map_err(|_| LoadError::Location(location.to_owned()))
    }
}

impl ContentSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.resolve(location)?;
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|err| LoadError::Network(location.to_owned(), err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(location.to_owned(), status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| LoadError::Network(location.to_owned(), err))?;
        Ok(body.to_vec())
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Source picked from the `[data].base` setting.
#[derive(Debug, Clone)]
pub enum Source {
    File(FileSource),
    Http(HttpSource),
}

impl Source {
    /// `http://` and `https://` bases fetch over the network, anything else
    /// is a directory relative to `root`.
    pub fn from_base(base: &str, root: &Path) -> Result<Self, LoadError> {
        if base.starts_with("http://") || base.starts_with("https://") {
            HttpSource::new(base).map(Self::Http)
        } else {
            Ok(Self::File(FileSource::new(root.join(base))))
        }
    }
}

impl ContentSource for Source {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, LoadError> {
        match self {
            Self::File(source) => source.fetch(location).await,
            Self::Http(source) => source.fetch(location).await,
        }
    }
}
