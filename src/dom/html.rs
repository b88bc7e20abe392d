//! HTML serialization for the virtual DOM.
//!
//! Click actions are written as a `data-on-click` attribute (multiple actions
//! separated by `;`) for the page runtime to pick up. Scroll state is layout
//! information and is not serialized.

use super::{Document, Element, Node};
use anyhow::Result;
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

/// Attribute carrying encoded click actions.
pub const ACTION_ATTR: &str = "data-on-click";

/// Elements that never have children and are written self-closed.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize a whole document, prefixed with the HTML5 doctype.
pub fn document_to_html(doc: &Document) -> Result<Vec<u8>> {
    let mut writer = Writer::new(b"<!DOCTYPE html>\n".to_vec());
    write_element(&mut writer, doc.root())?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.tag());
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    let actions = element
        .listeners()
        .iter()
        .map(|action| action.encode())
        .collect::<Vec<_>>();
    if !actions.is_empty() {
        start.push_attribute((ACTION_ATTR, actions.join(";").as_str()));
    }

    if VOID_ELEMENTS.contains(&element.tag()) {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in element.children() {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::Raw(raw) => writer.write_event(Event::Text(BytesText::from_escaped(raw.as_str())))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Action, ScrollDirection, ScrollStep, el};

    fn element_to_html(element: &Element) -> String {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, element).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_nested_elements() {
        let card = el("div", "card", None).child(el("h3", "", Some("Title")));
        assert_eq!(
            element_to_html(&card),
            r#"<div class="card"><h3>Title</h3></div>"#
        );
    }

    #[test]
    fn test_empty_non_void_keeps_closing_tag() {
        let div = el("div", "", None).with_id("research-carousel");
        assert_eq!(
            element_to_html(&div),
            r#"<div id="research-carousel"></div>"#
        );
    }

    #[test]
    fn test_void_element_self_closes() {
        let img = el("img", "card-image", None).with_attr("src", "a.png");
        let html = element_to_html(&img);
        assert!(html.starts_with(r#"<img class="card-image" src="a.png""#));
        assert!(html.ends_with("/>"));
        assert!(!html.contains("</img>"));
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let a = el("a", "", Some("Fish & <Chips>")).with_attr("href", r#"/q?a=1&b="2""#);
        let html = element_to_html(&a);
        assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
    }

    #[test]
    fn test_raw_is_verbatim() {
        let script = el("script", "", None).child(Node::Raw("if (a < b) {}".into()));
        assert_eq!(
            element_to_html(&script),
            "<script>if (a < b) {}</script>"
        );
    }

    #[test]
    fn test_actions_serialized() {
        let mut button = el("button", "carousel-btn", Some("›"));
        button.on_click(Action::ScrollTrack {
            direction: ScrollDirection::Next,
            step: ScrollStep::new(260, 80),
        });
        let html = element_to_html(&button);
        assert!(html.contains(r#"data-on-click="scroll:next:260:80""#));
    }

    #[test]
    fn test_document_has_doctype() {
        let doc = Document::new(el("html", "", None));
        let html = String::from_utf8(document_to_html(&doc).unwrap()).unwrap();
        assert_eq!(html, "<!DOCTYPE html>\n<html></html>");
    }
}
