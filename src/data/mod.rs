//! Site content resolution.
//!
//! Content lives in a single JSON document (`data/data.json`). Pages can sit
//! at the site root or one directory deeper, so resolution walks an ordered
//! list of relative candidates and falls back to an embedded default when
//! none of them yields a parseable document.
//!
//! | Module     | Responsibility                                   |
//! |------------|--------------------------------------------------|
//! | `types`    | `SiteData` and the card item records             |
//! | `defaults` | Embedded fallback profile                        |
//! | `source`   | File and HTTP fetchers behind `ContentSource`    |
//! | `loader`   | Ordered candidate resolution + silent fallback   |

mod defaults;
mod error;
mod loader;
mod source;
mod types;

pub use defaults::DEFAULT_SITE_DATA;
pub use loader::{DEFAULT_CANDIDATES, load_site_data};
pub use source::Source;
pub use types::{ProjectItem, PublicationItem, ResearchItem, SiteData};
