//! Single card construction.

use super::Variant;
use crate::dom::{Element, el};

/// Separator between journal and year in a publication's meta line.
const META_SEPARATOR: &str = " • ";

/// Content a card can be built from.
///
/// Fields a record does not have default to empty.
pub trait CardItem {
    fn title(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Image URL; `None` when absent or empty.
    fn image(&self) -> Option<&str> {
        None
    }

    fn journal(&self) -> &str {
        ""
    }

    fn year(&self) -> &str {
        ""
    }

    /// Publication URL; `None` when absent or empty.
    fn link(&self) -> Option<&str> {
        None
    }
}

/// Build a card node.
///
/// With `click_url` the whole card is wrapped in `a.card-link` and the inline
/// publication link is left out, so links never nest.
pub fn render_card(item: &impl CardItem, variant: Variant, click_url: Option<&str>) -> Element {
    let click_url = click_url.filter(|url| !url.is_empty());
    let mut card = el("div", "card", None);

    if let Some(src) = item.image() {
        let alt = match item.title() {
            "" => variant.as_str(),
            title => title,
        };
        card.append(
            el("img", "card-image", None)
                .with_attr("src", src)
                .with_attr("alt", alt),
        );
    }

    let mut body = el("div", "card-body", None);
    body.append(el("h3", "", Some(item.title())));

    if variant.is_publication() {
        let meta = [item.journal(), item.year()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(META_SEPARATOR);
        if !meta.is_empty() {
            body.append(el("p", "meta", Some(meta.as_str())));
        }
    }

    if !item.description().is_empty() {
        body.append(el("p", "", Some(item.description())));
    }

    if variant.is_publication()
        && click_url.is_none()
        && let Some(link) = item.link()
    {
        body.append(
            el("a", "text-link", Some("View publication"))
                .with_attr("href", link)
                .with_attr("target", "_blank")
                .with_attr("rel", "noopener"),
        );
    }
    card.append(body);

    match click_url {
        Some(url) => el("a", "card-link", None).with_attr("href", url).child(card),
        None => card,
    }
}
