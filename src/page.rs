//! Page skeletons and the glue run on every page.
//!
//! ```text
//! render_page(kind, data, config)
//!     │
//!     ├── skeleton()          html > head + header/nav + main + footer + runtime
//!     ├── mount_*()           cards into the #…-carousel / #…-grid containers
//!     ├── stamp_current_year()
//!     └── wire_mobile_nav()
//! ```

use crate::{
    config::SiteConfig,
    data::SiteData,
    dom::{Action, Document, Element, Node, el},
    render::{Variant, mount_carousel, mount_grid},
};
use chrono::{Datelike, Local};
use std::borrow::Cow;

const STYLE: &str = include_str!("embed/style.css");
const RUNTIME: &str = include_str!("embed/runtime.js");

const MENU_TOGGLE_ID: &str = "menu-toggle";
const NAV_LINKS_ID: &str = "nav-links";
const YEAR_ID: &str = "year";
const NAV_OPEN_CLASS: &str = "open";

// ============================================================================
// Page kinds
// ============================================================================

/// Every page the site consists of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Research,
    Publications,
    Projects,
    About,
}

impl PageKind {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Research,
        Self::Publications,
        Self::Projects,
        Self::About,
    ];

    /// Output file, relative to the output directory.
    pub const fn output_path(self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Research => "research/index.html",
            Self::Publications => "publications/index.html",
            Self::Projects => "projects/index.html",
            Self::About => "about/index.html",
        }
    }

    /// Directory levels between the page and the site root.
    pub const fn depth(self) -> usize {
        match self {
            Self::Home => 0,
            _ => 1,
        }
    }

    const fn heading(self) -> &'static str {
        match self {
            Self::Home => "",
            Self::Research => "Research",
            Self::Publications => "Publications",
            Self::Projects => "Projects",
            Self::About => "About",
        }
    }

    /// Link to `target` (relative to the site root) from this page.
    pub fn rel(self, target: &str) -> String {
        let href = format!("{}{target}", "../".repeat(self.depth()));
        if href.is_empty() { "./".to_owned() } else { href }
    }

    /// Absolute address of this page under the site's `[base].url`.
    pub fn canonical_url(self, base_url: &str) -> String {
        let dir = self.output_path().trim_end_matches("index.html");
        format!("{}/{dir}", base_url.trim_end_matches('/'))
    }

    /// Resolve a URL taken from the content file for this page.
    ///
    /// | Input | From `research/` |
    /// |-------|------------------|
    /// | `assets/cv.pdf` | `../assets/cv.pdf` |
    /// | `/assets/cv.pdf` | unchanged |
    /// | `#contact`, `?q=1` | unchanged |
    /// | `https://…`, `mailto:…` | unchanged |
    pub fn resolve_url(self, url: &str) -> Cow<'_, str> {
        if self.depth() == 0 || !is_site_relative(url) {
            return Cow::Borrowed(url);
        }
        Cow::Owned(self.rel(url.strip_prefix("./").unwrap_or(url)))
    }
}

/// A non-empty path relative to the site root: no scheme, no leading `/`,
/// and not a bare fragment or query.
fn is_site_relative(url: &str) -> bool {
    let has_scheme = url.split_once(':').is_some_and(|(scheme, _)| {
        scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });
    !url.is_empty() && !has_scheme && !url.starts_with(['/', '#', '?'])
}

/// Content with every site-relative URL rewritten for `kind`.
fn localize_urls(kind: PageKind, data: &SiteData) -> Cow<'_, SiteData> {
    if kind.depth() == 0 {
        return Cow::Borrowed(data);
    }

    let rewrite = |url: &mut String| *url = kind.resolve_url(url).into_owned();
    let mut data = data.clone();
    rewrite(&mut data.cv_file);
    data.research.iter_mut().filter_map(|r| r.image.as_mut()).for_each(rewrite);
    data.projects.iter_mut().filter_map(|p| p.image.as_mut()).for_each(rewrite);
    for publication in &mut data.publications {
        publication.image.iter_mut().for_each(rewrite);
        publication.link.iter_mut().for_each(rewrite);
    }
    Cow::Owned(data)
}

// ============================================================================
// Glue
// ============================================================================

/// Set the text of `#year`, if the page has one.
pub fn stamp_year(doc: &mut Document, year: i32) {
    if let Some(target) = doc.get_element_by_id_mut(YEAR_ID) {
        target.set_text(&year.to_string());
    }
}

/// [`stamp_year`] with the local calendar year.
pub fn stamp_current_year(doc: &mut Document) {
    stamp_year(doc, Local::now().year());
}

/// Make `#menu-toggle` toggle class `open` on `#nav-links`.
///
/// Requires both elements; wiring twice attaches a single listener.
pub fn wire_mobile_nav(doc: &mut Document) {
    if doc.get_element_by_id(NAV_LINKS_ID).is_none() {
        return;
    }
    let Some(toggle) = doc.get_element_by_id_mut(MENU_TOGGLE_ID) else {
        return;
    };

    let action = Action::ToggleClass {
        target_id: NAV_LINKS_ID.to_owned(),
        class: NAV_OPEN_CLASS.to_owned(),
    };
    if !toggle.listeners().contains(&action) {
        toggle.on_click(action);
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Build the complete document for `kind`.
pub fn render_page(kind: PageKind, data: &SiteData, config: &SiteConfig) -> Document {
    let data = localize_urls(kind, data);
    let data: &SiteData = &data;
    let mut doc = Document::new(skeleton(kind, data, config));

    match kind {
        PageKind::Home => {
            let research_url = kind.rel("research/");
            let projects_url = kind.rel("projects/");
            mount_carousel(
                doc.get_element_by_id_mut("research-carousel"),
                &data.research,
                Variant::Research,
                Some(research_url.as_str()),
            );
            mount_carousel(
                doc.get_element_by_id_mut("publications-carousel"),
                &data.publications,
                Variant::Publication,
                None,
            );
            mount_carousel(
                doc.get_element_by_id_mut("projects-carousel"),
                &data.projects,
                Variant::Project,
                Some(projects_url.as_str()),
            );
        }
        PageKind::Research => mount_grid(
            doc.get_element_by_id_mut("research-grid"),
            &data.research,
            Variant::Research,
            None,
        ),
        PageKind::Publications => mount_grid(
            doc.get_element_by_id_mut("publications-grid"),
            &data.publications,
            Variant::Publication,
            None,
        ),
        PageKind::Projects => mount_grid(
            doc.get_element_by_id_mut("projects-grid"),
            &data.projects,
            Variant::Project,
            None,
        ),
        PageKind::About => {}
    }

    stamp_current_year(&mut doc);
    wire_mobile_nav(&mut doc);
    doc
}

fn skeleton(kind: PageKind, data: &SiteData, config: &SiteConfig) -> Element {
    let site_title = config.title_or(&data.hero_title);
    let title = match kind.heading() {
        "" => site_title.to_owned(),
        heading => format!("{heading} | {site_title}"),
    };
    let description = match config.base.description.as_str() {
        "" => data.hero_subtitle.as_str(),
        description => description,
    };

    let mut head = el("head", "", None)
        .child(el("meta", "", None).with_attr("charset", "utf-8"))
        .child(
            el("meta", "", None)
                .with_attr("name", "viewport")
                .with_attr("content", "width=device-width, initial-scale=1"),
        )
        .child(el("title", "", Some(title.as_str())))
        .child(
            el("meta", "", None)
                .with_attr("name", "description")
                .with_attr("content", description),
        )
        .child(
            el("meta", "", None)
                .with_attr("name", "author")
                .with_attr("content", &config.base.author),
        );
    if let Some(url) = &config.base.url {
        let canonical = kind.canonical_url(url);
        head.append(
            el("link", "", None)
                .with_attr("rel", "canonical")
                .with_attr("href", &canonical),
        );
        head.append(
            el("meta", "", None)
                .with_attr("property", "og:url")
                .with_attr("content", canonical),
        );
    }
    head.append(el("style", "", None).child(Node::Raw(STYLE.to_owned())));

    let mut main = el("main", "", None);
    for section in sections(kind, data) {
        main.append(section);
    }

    let footer = el("footer", "site-footer", None).child(
        el("p", "", None)
            .child("© ")
            .child(el("span", "", None).with_id(YEAR_ID))
            .child(format!(" {}", data.hero_title)),
    );

    let body = el("body", "", None)
        .child(header(kind, data))
        .child(main)
        .child(footer)
        .child(el("script", "", None).child(Node::Raw(RUNTIME.to_owned())));

    el("html", "", None)
        .with_attr("lang", &config.base.language)
        .child(head)
        .child(body)
}

fn header(kind: PageKind, data: &SiteData) -> Element {
    let mut links = el("ul", "", None).with_id(NAV_LINKS_ID);
    for (label, target) in [
        ("About", "about/"),
        ("Research", "research/"),
        ("Publications", "publications/"),
        ("Projects", "projects/"),
        ("Contact", "#contact"),
    ] {
        links.append(el("li", "", None).child(link(label, &kind.rel(target))));
    }

    let toggle = el("button", "", Some("☰"))
        .with_id(MENU_TOGGLE_ID)
        .with_attr("type", "button")
        .with_attr("aria-label", "Toggle navigation");

    el("header", "site-header", None).child(
        el("nav", "nav", None)
            .child(el("a", "brand", Some(data.hero_title.as_str())).with_attr("href", kind.rel("")))
            .child(toggle)
            .child(links),
    )
}

fn sections(kind: PageKind, data: &SiteData) -> Vec<Element> {
    match kind {
        PageKind::Home => vec![
            el("section", "hero", None)
                .with_id("home")
                .child(el("h1", "", Some(data.hero_title.as_str())))
                .child(el("p", "subtitle", Some(data.hero_subtitle.as_str())))
                .child(el("p", "tagline", Some(data.tagline.as_str()))),
            el("section", "", None)
                .with_id("about")
                .child(el("h2", "", Some("About")))
                .child(el("p", "", Some(data.about_short.as_str())))
                .child(link("Read more", &kind.rel("about/")).with_attr("class", "text-link")),
            card_section("research", "Research", "carousel"),
            card_section("publications", "Publications", "carousel")
                .child(el("p", "note", Some(data.publications_note.as_str()))),
            card_section("projects", "Projects", "carousel"),
            contact(data),
        ],
        PageKind::Research => vec![card_section("research", "Research", "grid")],
        PageKind::Publications => vec![
            card_section("publications", "Publications", "grid")
                .child(el("p", "note", Some(data.publications_note.as_str()))),
        ],
        PageKind::Projects => vec![card_section("projects", "Projects", "grid")],
        PageKind::About => {
            let mut about = el("section", "", None)
                .with_id("about")
                .child(el("h2", "", Some("About")));
            for paragraph in data.about_paragraphs() {
                about.append(el("p", "", Some(paragraph)));
            }
            if !data.cv_file.is_empty() {
                about.append(
                    link("Download CV", &data.cv_file)
                        .with_attr("class", "text-link")
                        .with_attr("target", "_blank")
                        .with_attr("rel", "noopener"),
                );
            }
            vec![about, contact(data)]
        }
    }
}

/// `section#<name>` with a heading and an empty `#<name>-<layout>` container.
fn card_section(name: &str, heading: &str, layout: &str) -> Element {
    el("section", "", None)
        .with_id(name)
        .child(el("h2", "", Some(heading)))
        .child(el("div", "", None).with_id(&format!("{name}-{layout}")))
}

fn contact(data: &SiteData) -> Element {
    let mut section = el("section", "", None)
        .with_id("contact")
        .child(el("h2", "", Some("Contact")));

    if !data.contact_email.is_empty() {
        let mailto = format!("mailto:{}", data.contact_email);
        section.append(el("p", "", None).child(link(&data.contact_email, &mailto)));
    }
    if !data.contact_linkedin.is_empty() {
        section.append(
            el("p", "", None).child(
                link("LinkedIn", &data.contact_linkedin)
                    .with_attr("target", "_blank")
                    .with_attr("rel", "noopener"),
            ),
        );
    }
    for line in [&data.contact_location, &data.contact_availability] {
        if !line.is_empty() {
            section.append(el("p", "", Some(line.as_str())));
        }
    }
    section
}

fn link(text: &str, href: &str) -> Element {
    el("a", "", Some(text)).with_attr("href", href)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DEFAULT_SITE_DATA, PublicationItem, ResearchItem};

    fn home() -> Document {
        render_page(PageKind::Home, &DEFAULT_SITE_DATA, &SiteConfig::default())
    }

    #[test]
    fn test_output_paths_and_rel() {
        assert_eq!(PageKind::Home.output_path(), "index.html");
        assert_eq!(PageKind::About.output_path(), "about/index.html");
        assert_eq!(PageKind::Home.rel(""), "./");
        assert_eq!(PageKind::Home.rel("research/"), "research/");
        assert_eq!(PageKind::Projects.rel("research/"), "../research/");
        assert_eq!(PageKind::Projects.rel("#contact"), "../#contact");
    }

    #[test]
    fn test_resolve_url() {
        let page = PageKind::Research;
        assert_eq!(page.resolve_url("assets/cv.pdf"), "../assets/cv.pdf");
        assert_eq!(page.resolve_url("./assets/a.png"), "../assets/a.png");
        for unchanged in [
            "",
            "/assets/cv.pdf",
            "//cdn.example.com/a.png",
            "#contact",
            "?page=2",
            "https://doi.org/10.1/x",
            "mailto:ada@example.com",
            "data:image/png;base64,AAAA",
        ] {
            assert_eq!(page.resolve_url(unchanged), unchanged);
        }
        assert_eq!(PageKind::Home.resolve_url("assets/cv.pdf"), "assets/cv.pdf");
    }

    #[test]
    fn test_card_images_resolve_per_page() {
        let mut data = SiteData::default();
        data.research = vec![ResearchItem {
            title: "Catalysis".into(),
            description: String::new(),
            image: Some("assets/images/a.png".into()),
        }];
        data.publications = vec![PublicationItem {
            title: "Paper".into(),
            link: Some("papers/p.pdf".into()),
            image: Some("https://example.com/p.png".into()),
            ..Default::default()
        }];

        let research = render_page(PageKind::Research, &data, &SiteConfig::default());
        let img = research.root().find_by_tag("img");
        assert_eq!(img[0].attr("src"), Some("../assets/images/a.png"));

        let publications = render_page(PageKind::Publications, &data, &SiteConfig::default());
        let img = publications.root().find_by_tag("img");
        assert_eq!(img[0].attr("src"), Some("https://example.com/p.png"));
        let inline = publications.root().find_by_class("text-link");
        assert_eq!(inline[0].attr("href"), Some("../papers/p.pdf"));

        let home = render_page(PageKind::Home, &data, &SiteConfig::default());
        let img = home.root().find_by_tag("img");
        assert_eq!(img[0].attr("src"), Some("assets/images/a.png"));
    }

    #[test]
    fn test_canonical_link_follows_base_url() {
        let doc = home();
        assert!(doc.root().find_by_tag("link").is_empty());

        let mut config = SiteConfig::default();
        config.base.url = Some("https://ernest.example.com/".into());
        for (kind, expected) in [
            (PageKind::Home, "https://ernest.example.com/"),
            (PageKind::About, "https://ernest.example.com/about/"),
        ] {
            let doc = render_page(kind, &DEFAULT_SITE_DATA, &config);
            let link = doc.root().find_by_tag("link");
            assert_eq!(link.len(), 1);
            assert_eq!(link[0].attr("rel"), Some("canonical"));
            assert_eq!(link[0].attr("href"), Some(expected));

            let og = doc.root().path_to(|e| e.attr("property") == Some("og:url"));
            let og = og.and_then(|path| doc.root().at_path(&path)).unwrap();
            assert_eq!(og.attr("content"), Some(expected));
        }
    }

    #[test]
    fn test_stamp_year() {
        let mut doc = home();
        stamp_year(&mut doc, 2024);
        assert_eq!(doc.get_element_by_id("year").unwrap().text_content(), "2024");
    }

    #[test]
    fn test_stamp_year_without_target_is_noop() {
        let mut doc = Document::new(el("body", "", None).child(el("p", "", Some("x"))));
        let before = doc.clone();
        stamp_year(&mut doc, 2024);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_current_year_is_stamped() {
        let doc = home();
        let year = doc.get_element_by_id("year").unwrap().text_content();
        assert_eq!(year, Local::now().year().to_string());
    }

    #[test]
    fn test_mobile_nav_toggles_open() {
        let mut doc = home();
        let path = doc.root().path_to(|e| e.id() == Some(MENU_TOGGLE_ID)).unwrap();

        assert!(doc.click(&path));
        assert!(doc.get_element_by_id(NAV_LINKS_ID).unwrap().has_class("open"));
        assert!(doc.click(&path));
        assert!(!doc.get_element_by_id(NAV_LINKS_ID).unwrap().has_class("open"));
    }

    #[test]
    fn test_wire_mobile_nav_twice_attaches_once() {
        let mut doc = home();
        wire_mobile_nav(&mut doc);
        let toggle = doc.get_element_by_id(MENU_TOGGLE_ID).unwrap();
        assert_eq!(toggle.listeners().len(), 1);
    }

    #[test]
    fn test_wire_mobile_nav_requires_both_elements() {
        let mut doc = Document::new(
            el("body", "", None).child(el("button", "", None).with_id(MENU_TOGGLE_ID)),
        );
        wire_mobile_nav(&mut doc);
        assert!(doc.get_element_by_id(MENU_TOGGLE_ID).unwrap().listeners().is_empty());
    }

    #[test]
    fn test_home_mounts_three_carousels() {
        let doc = home();
        for (id, count) in [
            ("research-carousel", DEFAULT_SITE_DATA.research.len()),
            ("publications-carousel", DEFAULT_SITE_DATA.publications.len()),
            ("projects-carousel", DEFAULT_SITE_DATA.projects.len()),
        ] {
            let container = doc.get_element_by_id(id).unwrap();
            let track = container.find_by_class("carousel-track");
            assert_eq!(track.len(), 1, "{id}");
            assert_eq!(track[0].child_elements().count(), count, "{id}");
        }
    }

    #[test]
    fn test_home_cards_link_to_section_pages() {
        let doc = home();
        let research = doc.get_element_by_id("research-carousel").unwrap();
        let links = research.find_by_class("card-link");
        assert_eq!(links.len(), DEFAULT_SITE_DATA.research.len());
        assert!(links.iter().all(|a| a.attr("href") == Some("research/")));

        let publications = doc.get_element_by_id("publications-carousel").unwrap();
        assert!(publications.find_by_class("card-link").is_empty());
    }

    #[test]
    fn test_nested_page_links_go_up() {
        let doc = render_page(PageKind::Research, &DEFAULT_SITE_DATA, &SiteConfig::default());
        let brand = doc.root().find_by_class("brand")[0];
        assert_eq!(brand.attr("href"), Some("../"));

        let grid = doc.get_element_by_id("research-grid").unwrap();
        assert_eq!(grid.find_by_class("card").len(), DEFAULT_SITE_DATA.research.len());
        assert!(grid.find_by_class("card-link").is_empty());
    }

    #[test]
    fn test_publications_page_shows_inline_links() {
        let mut data = SiteData::default();
        data.publications = vec![PublicationItem {
            title: "Paper".into(),
            journal: "Nature".into(),
            year: "2024".into(),
            link: Some("https://doi.org/x".into()),
            image: None,
        }];
        let doc = render_page(PageKind::Publications, &data, &SiteConfig::default());

        let inline = doc.root().find_by_class("text-link");
        assert_eq!(inline.len(), 1);
        assert_eq!(inline[0].attr("target"), Some("_blank"));
        assert_eq!(doc.root().find_by_class("meta")[0].text_content(), "Nature • 2024");
    }

    #[test]
    fn test_about_page_paragraphs_and_cv() {
        let mut data = DEFAULT_SITE_DATA.clone();
        data.cv_file = "assets/cv.pdf".into();
        let doc = render_page(PageKind::About, &data, &SiteConfig::default());

        let about = doc.get_element_by_id("about").unwrap();
        assert_eq!(about.find_by_tag("p").len(), data.about_paragraphs().count());
        let cv = about.find_by_tag("a");
        assert_eq!(cv.len(), 1);
        assert_eq!(cv[0].attr("href"), Some("../assets/cv.pdf"));
        assert!(doc.get_element_by_id("contact").is_some());
    }

    #[test]
    fn test_about_page_without_cv() {
        let doc = render_page(PageKind::About, &DEFAULT_SITE_DATA, &SiteConfig::default());
        let about = doc.get_element_by_id("about").unwrap();
        assert!(about.find_by_tag("a").is_empty());
    }

    #[test]
    fn test_empty_data_renders_blank_sections() {
        let doc = render_page(PageKind::Home, &SiteData::default(), &SiteConfig::default());
        let track = doc.root().find_by_class("carousel-track");
        assert_eq!(track.len(), 3);
        assert!(track.iter().all(|t| t.child_elements().count() == 0));
        assert!(doc.get_element_by_id("contact").unwrap().find_by_tag("a").is_empty());
    }

    #[test]
    fn test_title_prefers_config() {
        let mut config = SiteConfig::default();
        let doc = render_page(PageKind::Projects, &DEFAULT_SITE_DATA, &config);
        let title = doc.root().find_by_tag("title")[0].text_content();
        assert_eq!(title, format!("Projects | {}", DEFAULT_SITE_DATA.hero_title));

        config.base.title = "Lab".into();
        let doc = render_page(PageKind::Home, &DEFAULT_SITE_DATA, &config);
        assert_eq!(doc.root().find_by_tag("title")[0].text_content(), "Lab");
    }
}
