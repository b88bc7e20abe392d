//! Carousel and grid mounting.

use super::{CardItem, Variant, render_card};
use crate::dom::{Action, Element, ScrollDirection, ScrollStep, TRACK_CLASS, el};

/// Carousel scroll distance: 80% of the visible track width, at least 260px.
pub const CAROUSEL_STEP: ScrollStep = ScrollStep::new(260, 80);

/// Replace the container's content with a carousel of cards.
///
/// Layout: `div.carousel > [button ‹] [div.carousel-track > cards] [button ›]`.
/// Does nothing when `container` is `None`.
pub fn mount_carousel<T: CardItem>(
    container: Option<&mut Element>,
    items: &[T],
    variant: Variant,
    click_url: Option<&str>,
) {
    let Some(container) = container else {
        return;
    };

    let prev = scroll_button("‹", "Scroll left", ScrollDirection::Prev);
    let next = scroll_button("›", "Scroll right", ScrollDirection::Next);

    let mut track = el("div", TRACK_CLASS, None);
    for item in items {
        track.append(render_card(item, variant, click_url));
    }

    let carousel = el("div", "carousel", None)
        .child(prev)
        .child(track)
        .child(next);

    container.clear();
    container.append(carousel);
}

/// Replace the container's content with a static grid of cards.
///
/// Does nothing when `container` is `None`.
pub fn mount_grid<T: CardItem>(
    container: Option<&mut Element>,
    items: &[T],
    variant: Variant,
    click_url: Option<&str>,
) {
    let Some(container) = container else {
        return;
    };

    let mut grid = el("div", "card-grid", None);
    for item in items {
        grid.append(render_card(item, variant, click_url));
    }

    container.clear();
    container.append(grid);
}

fn scroll_button(label: &str, aria_label: &str, direction: ScrollDirection) -> Element {
    let mut button = el("button", "carousel-btn", Some(label))
        .with_attr("type", "button")
        .with_attr("aria-label", aria_label);
    button.on_click(Action::ScrollTrack {
        direction,
        step: CAROUSEL_STEP,
    });
    button
}
