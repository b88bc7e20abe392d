//! Minimal virtual DOM.
//!
//! Pages are assembled as a tree of [`Element`]s and serialized to HTML at
//! the end of a build. Behavior is declarative: elements carry click
//! [`Action`]s instead of closures. The browser runtime interprets them; tests
//! replay them with `Document::click` to check pages headlessly.
//!
//! # Example
//!
//! ```ignore
//! let mut card = el("div", "card", None);
//! card.append(el("h3", "", Some("Catalysis")));
//! assert_eq!(card.text_content(), "Catalysis");
//! ```

mod document;
pub mod html;

pub use document::{Action, Document, ScrollDirection, ScrollStep, TRACK_CLASS};

#[cfg(test)]
pub use document::{ScrollBehavior, ScrollState};

// ============================================================================
// Nodes
// ============================================================================

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Escaped on output.
    Text(String),
    /// Written verbatim (inline scripts and styles).
    Raw(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

// ============================================================================
// Element
// ============================================================================

/// An HTML element with ordered attributes, children and click actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    listeners: Vec<Action>,
    #[cfg(test)]
    scroll: Option<ScrollState>,
}

/// Create an element, mirroring `createElement` + `className` + `textContent`.
///
/// An empty `class` sets no class attribute; `None` text leaves the element
/// childless.
pub fn el(tag: &str, class: &str, text: Option<&str>) -> Element {
    let mut element = Element::new(tag);
    if !class.is_empty() {
        element.set_attr("class", class);
    }
    if let Some(text) = text {
        element.set_text(text);
    }
    element
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any previous value in place.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name.to_owned(), value)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builder form of [`Self::set_attr`].
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    // ------------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------------

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Builder form of [`Self::append`].
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.append(child);
        self
    }

    /// Remove all children (`innerHTML = ''`).
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replace children with a single text node (`textContent = text`).
    ///
    /// Empty text leaves the element childless.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_owned()));
        }
    }

    // ------------------------------------------------------------------------
    // Behavior
    // ------------------------------------------------------------------------

    /// Attach a click action.
    pub fn on_click(&mut self, action: Action) {
        self.listeners.push(action);
    }

    pub fn listeners(&self) -> &[Action] {
        &self.listeners
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.path_to(|e| e.id() == Some(id))
            .and_then(|path| self.at_path(&path))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        let path = self.path_to(|e| e.id() == Some(id))?;
        self.at_path_mut(&path)
    }

    /// Child-index path to the first element (depth-first) matching `pred`.
    ///
    /// Indices count every child node, text included. `self` is `[]`.
    pub fn path_to(&self, pred: impl Fn(&Element) -> bool + Copy) -> Option<Vec<usize>> {
        if pred(self) {
            return Some(Vec::new());
        }
        self.children.iter().enumerate().find_map(|(index, child)| {
            let mut path = child.as_element()?.path_to(pred)?;
            path.insert(0, index);
            Some(path)
        })
    }

    pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children.get(*first)?.as_element()?.at_path(rest),
        }
    }

    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self
                .children
                .get_mut(*first)?
                .as_element_mut()?
                .at_path_mut(rest),
        }
    }
}

// ============================================================================
// Inspection
// ============================================================================

/// Read-side helpers and the class toggling the click harness needs.
#[cfg(test)]
impl Element {
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| key != name);
    }

    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|c| c == class)
    }

    /// Add `class` if absent, remove it if present. Returns whether the
    /// class is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        let present = self.has_class(class);
        let mut classes: Vec<String> = self.class_list().map(str::to_owned).collect();
        if present {
            classes.retain(|c| c != class);
        } else {
            classes.push(class.to_owned());
        }

        if classes.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", classes.join(" "));
        }
        !present
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// Concatenated text of all descendants (raw nodes excluded).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
                Node::Raw(_) => {}
            }
        }
    }

    pub fn scroll(&self) -> Option<&ScrollState> {
        self.scroll.as_ref()
    }

    /// Scroll state of this element, created on first use.
    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        self.scroll.get_or_insert_with(ScrollState::default)
    }

    /// This element and all descendant elements, depth-first, pre-order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in self.child_elements() {
            out.extend(child.descendants());
        }
        out
    }

    /// Descendant elements (including self) carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// Descendant elements (including self) with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|e| e.tag == tag)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_el_sets_class_and_text() {
        let e = el("P", "meta", Some("Nature"));
        assert_eq!(e.tag(), "p");
        assert_eq!(e.attr("class"), Some("meta"));
        assert_eq!(e.text_content(), "Nature");
    }

    #[test]
    fn test_el_empty_class_and_text() {
        let e = el("h3", "", Some(""));
        assert_eq!(e.attr("class"), None);
        assert!(e.children().is_empty());
        assert_eq!(e.text_content(), "");
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut e = Element::new("a").with_attr("href", "/a").with_attr("rel", "x");
        e.set_attr("href", "/b");
        let attrs: Vec<_> = e.attributes().collect();
        assert_eq!(attrs, [("href", "/b"), ("rel", "x")]);
    }

    #[test]
    fn test_toggle_class() {
        let mut e = el("ul", "nav-links", None);
        assert!(e.toggle_class("open"));
        assert_eq!(e.attr("class"), Some("nav-links open"));
        assert!(!e.toggle_class("open"));
        assert_eq!(e.attr("class"), Some("nav-links"));

        let mut bare = Element::new("div");
        bare.toggle_class("x");
        bare.toggle_class("x");
        assert_eq!(bare.attr("class"), None);
    }

    #[test]
    fn test_text_content_is_recursive() {
        let e = el("div", "", None)
            .child(el("h3", "", Some("Title")))
            .child(el("p", "", Some(" body")))
            .child(Node::Raw("ignored".into()));
        assert_eq!(e.text_content(), "Title body");
    }

    #[test]
    fn test_queries() {
        let mut root = el("main", "", None)
            .child("intro")
            .child(el("section", "", None).child(el("div", "card", None).with_id("c1")))
            .child(el("div", "card", None));

        assert_eq!(root.find_by_class("card").len(), 2);
        assert_eq!(root.find_by_tag("section").len(), 1);
        assert_eq!(root.path_to(|e| e.id() == Some("c1")), Some(vec![1, 0]));
        assert_eq!(root.at_path(&[1, 0]).and_then(Element::id), Some("c1"));
        assert!(root.at_path(&[0]).is_none());

        root.find_by_id_mut("c1").unwrap().set_text("found");
        assert_eq!(root.find_by_id("c1").unwrap().text_content(), "found");
        assert!(root.find_by_id("missing").is_none());
    }

    #[test]
    fn test_clear() {
        let mut e = el("div", "", Some("old"));
        e.clear();
        assert!(e.children().is_empty());
    }
}
