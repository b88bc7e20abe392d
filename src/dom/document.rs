//! Document root, click actions and scroll simulation.
//!
//! Actions are data: the page runtime interprets them in the browser. The
//! click dispatch and scroll model below replay them headlessly and are only
//! compiled for tests.

use super::Element;

/// Class of the scroll container a [`Action::ScrollTrack`] control drives.
pub const TRACK_CLASS: &str = "carousel-track";

// ============================================================================
// Actions
// ============================================================================

/// Declarative click behavior, interpreted by the page runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Toggle `class` on the element with id `target_id`.
    ToggleClass { target_id: String, class: String },

    /// Smooth-scroll the sibling [`TRACK_CLASS`] element by one step.
    ScrollTrack {
        direction: ScrollDirection,
        step: ScrollStep,
    },
}

impl Action {
    /// Compact form stored in the `data-on-click` attribute.
    ///
    /// `toggle-class:<id>:<class>` or `scroll:<prev|next>:<min>:<percent>`.
    pub fn encode(&self) -> String {
        match self {
            Self::ToggleClass { target_id, class } => format!("toggle-class:{target_id}:{class}"),
            Self::ScrollTrack { direction, step } => format!(
                "scroll:{}:{}:{}",
                direction.as_str(),
                step.min,
                step.percent
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Prev,
    Next,
}

impl ScrollDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }

    #[cfg(test)]
    const fn sign(self) -> i64 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// Scroll distance policy: `max(min, floor(client_width * percent / 100))`.
///
/// Evaluated at click time so the step follows the container's current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollStep {
    pub min: u32,
    pub percent: u32,
}

impl ScrollStep {
    pub const fn new(min: u32, percent: u32) -> Self {
        Self { min, percent }
    }

    #[cfg(test)]
    pub fn at(&self, client_width: u32) -> u32 {
        let scaled = u64::from(client_width) * u64::from(self.percent) / 100;
        let scaled = u32::try_from(scaled).unwrap_or(u32::MAX);
        scaled.max(self.min)
    }
}

// ============================================================================
// Scroll State
// ============================================================================

#[cfg(test)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// One `scrollBy` call as issued by a control.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollCommand {
    pub left: i64,
    pub behavior: ScrollBehavior,
}

/// Layout and position of a horizontal scroll container.
///
/// Widths are supplied by the caller.
/// Commands are applied immediately and also recorded; overlapping smooth
/// animations are not modeled beyond their combined displacement.
#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub client_width: u32,
    pub scroll_width: u32,
    pub scroll_left: u32,
    history: Vec<ScrollCommand>,
}

#[cfg(test)]
impl ScrollState {
    pub fn set_layout(&mut self, client_width: u32, scroll_width: u32) {
        self.client_width = client_width;
        self.scroll_width = scroll_width;
        self.scroll_left = self.scroll_left.min(self.max_scroll_left());
    }

    pub fn max_scroll_left(&self) -> u32 {
        self.scroll_width.saturating_sub(self.client_width)
    }

    /// Scroll by `left` pixels, clamped to the content edges.
    pub fn scroll_by(&mut self, left: i64, behavior: ScrollBehavior) {
        self.history.push(ScrollCommand { left, behavior });
        let target = i64::from(self.scroll_left).saturating_add(left);
        let clamped = target.clamp(0, i64::from(self.max_scroll_left()));
        self.scroll_left = u32::try_from(clamped).unwrap_or_default();
    }

    /// Every command issued so far, oldest first.
    pub fn history(&self) -> &[ScrollCommand] {
        &self.history
    }
}

// ============================================================================
// Document
// ============================================================================

/// Owner of a page's element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    #[cfg(test)]
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_by_id_mut(id)
    }

    /// Dispatch a click on the element at `path` (see [`Element::path_to`]).
    ///
    /// Returns `false` when no element exists at `path`. Actions whose target
    /// is missing are skipped silently.
    #[cfg(test)]
    pub fn click(&mut self, path: &[usize]) -> bool {
        let Some(actions) = self.root.at_path(path).map(|e| e.listeners().to_vec()) else {
            return false;
        };

        for action in actions {
            match action {
                Action::ToggleClass { target_id, class } => {
                    if let Some(target) = self.root.find_by_id_mut(&target_id) {
                        target.toggle_class(&class);
                    }
                }
                Action::ScrollTrack { direction, step } => {
                    let parent = path.split_last().map_or(&[][..], |(_, parent)| parent);
                    if let Some(scroll) = self
                        .root
                        .at_path_mut(parent)
                        .and_then(|p| p.child_elements_mut().find(|e| e.has_class(TRACK_CLASS)))
                        .map(Element::scroll_mut)
                    {
                        let distance = i64::from(step.at(scroll.client_width));
                        scroll.scroll_by(direction.sign() * distance, ScrollBehavior::Smooth);
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::el;

    #[test]
    fn test_scroll_step() {
        let step = ScrollStep::new(260, 80);
        assert_eq!(step.at(1000), 800);
        assert_eq!(step.at(100), 260);
        assert_eq!(step.at(0), 260);
        assert_eq!(step.at(326), 260);
        assert_eq!(step.at(327), 261);
        assert_eq!(step.at(u32::MAX), (u64::from(u32::MAX) * 80 / 100) as u32);
    }

    #[test]
    fn test_scroll_by_clamps_to_edges() {
        let mut state = ScrollState::default();
        state.set_layout(500, 1200);

        state.scroll_by(-300, ScrollBehavior::Smooth);
        assert_eq!(state.scroll_left, 0);

        state.scroll_by(400, ScrollBehavior::Smooth);
        state.scroll_by(400, ScrollBehavior::Smooth);
        assert_eq!(state.scroll_left, 700);
        assert_eq!(state.history().len(), 3);
        assert_eq!(state.history()[0].left, -300);
    }

    #[test]
    fn test_set_layout_reclamps_position() {
        let mut state = ScrollState::default();
        state.set_layout(100, 1000);
        state.scroll_by(900, ScrollBehavior::Auto);
        state.set_layout(800, 1000);
        assert_eq!(state.scroll_left, 200);
    }

    #[test]
    fn test_click_toggles_class() {
        let mut toggle = el("button", "", None).with_id("menu-toggle");
        toggle.on_click(Action::ToggleClass {
            target_id: "nav-links".into(),
            class: "open".into(),
        });
        let root = el("nav", "", None)
            .child(toggle)
            .child(el("ul", "nav-links", None).with_id("nav-links"));
        let mut doc = Document::new(root);

        assert!(doc.click(&[0]));
        assert!(doc.get_element_by_id("nav-links").unwrap().has_class("open"));
        doc.click(&[0]);
        assert!(!doc.get_element_by_id("nav-links").unwrap().has_class("open"));
    }

    #[test]
    fn test_click_missing_path() {
        let mut doc = Document::new(el("div", "", None));
        assert!(!doc.click(&[3]));
        assert!(doc.click(&[]));
    }

    #[test]
    fn test_encode_actions() {
        let toggle = Action::ToggleClass {
            target_id: "nav-links".into(),
            class: "open".into(),
        };
        assert_eq!(toggle.encode(), "toggle-class:nav-links:open");

        let scroll = Action::ScrollTrack {
            direction: ScrollDirection::Prev,
            step: ScrollStep::new(260, 80),
        };
        assert_eq!(scroll.encode(), "scroll:prev:260:80");
    }
}
