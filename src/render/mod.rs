//! Card rendering and mounting.
//!
//! ```text
//! SiteData items ──► render_card() ──► Element (card)
//!                          │
//!          ┌───────────────┴───────────────┐
//!          ▼                               ▼
//!   mount_carousel()                  mount_grid()
//!   [‹] [track: cards…] [›]           [grid: cards…]
//! ```

mod card;
mod carousel;

pub use card::{CardItem, render_card};
pub use carousel::{mount_carousel, mount_grid};

use crate::data::{ProjectItem, PublicationItem, ResearchItem};

/// Card rendering rules. Only [`Variant::Publication`] has special fields;
/// the others are plain title/description cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Research,
    Publication,
    Project,
}

impl Variant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Publication => "publication",
            Self::Project => "project",
        }
    }

    pub const fn is_publication(self) -> bool {
        matches!(self, Self::Publication)
    }
}

/// `Some` only for non-empty strings: an empty image or link is absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl CardItem for ResearchItem {
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn image(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }
}

impl CardItem for ProjectItem {
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn image(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }
}

impl CardItem for PublicationItem {
    fn title(&self) -> &str {
        &self.title
    }
    fn image(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }
    fn journal(&self) -> &str {
        &self.journal
    }
    fn year(&self) -> &str {
        &self.year
    }
    fn link(&self) -> Option<&str> {
        non_empty(self.link.as_deref())
    }
}
