//! Embedded fallback content.
//!
//! Used whenever no candidate data file can be resolved, so a build never
//! produces a blank page. Keep the shape in sync with `data/data.json`.

use super::types::{ProjectItem, PublicationItem, ResearchItem, SiteData};
use std::sync::LazyLock;

/// The built-in placeholder profile.
pub static DEFAULT_SITE_DATA: LazyLock<SiteData> = LazyLock::new(default_site_data);

fn research(title: &str, description: &str) -> ResearchItem {
    ResearchItem {
        title: title.into(),
        description: description.into(),
        image: Some(String::new()),
    }
}

fn publication(title: &str, journal: &str, year: &str) -> PublicationItem {
    PublicationItem {
        title: title.into(),
        journal: journal.into(),
        year: year.into(),
        link: Some(String::new()),
        image: Some(String::new()),
    }
}

fn project(title: &str, description: &str) -> ProjectItem {
    ProjectItem {
        title: title.into(),
        description: description.into(),
        image: Some(String::new()),
    }
}

fn default_site_data() -> SiteData {
    const ABOUT_SHORT: &str = "Ernest Bernin is a doctoral candidate in chemistry at [University Name], \
        exploring cutting-edge research in synthetic organic chemistry and catalysis.";

    SiteData {
        hero_title: "Ernest Bernin".into(),
        hero_subtitle: "PhD Candidate in Chemistry".into(),
        tagline: "Research • Teaching • Outreach".into(),

        about_short: ABOUT_SHORT.into(),
        about_long: format!(
            "{ABOUT_SHORT} His work focuses on developing novel molecules and understanding the \
             reaction mechanisms that drive complex transformations. With a passion for discovery \
             and a commitment to education, Ernest strives to advance scientific understanding \
             and share his findings with the community.\n\n\
             Outside the lab, Ernest mentors junior researchers and contributes to outreach \
             efforts that help make chemistry more accessible to students and the public."
        ),

        research: vec![
            research(
                "Synthetic Organic Chemistry",
                "Designing new reaction pathways and building complex molecules efficiently and selectively.",
            ),
            research(
                "Catalysis & Mechanisms",
                "Developing catalytic methods and probing mechanisms using kinetics and spectroscopy.",
            ),
            research(
                "Computational Chemistry",
                "Using modeling to interpret experiments, predict reactivity, and guide molecular design.",
            ),
        ],

        publications: vec![
            publication("Title 1", "Journal Name", "2024"),
            publication("Title 2", "Journal Name", "2025"),
        ],
        publications_note:
            "For a full list of publications, please see my CV or contact me directly.".into(),

        projects: vec![
            project(
                "Project Title 1",
                "A brief description of a notable research project or award. Explain the goals, \
                 your contribution, and the outcomes or recognition received.",
            ),
            project(
                "Project Title 2",
                "A brief description of another significant project or scholarly achievement.",
            ),
        ],

        contact_email: "ernest.bernin@example.com".into(),
        contact_linkedin: "https://www.linkedin.com/in/ernestbernin".into(),
        contact_location: "Knoxville, TN (or your city)".into(),
        contact_availability: "Open to collaborations and speaking opportunities.".into(),
        cv_file: String::new(),
    }
}
