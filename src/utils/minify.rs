//! HTML minification.
//!
//! Enabled or disabled by `[build].minify`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a rendered page.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify_html<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if config.build.minify {
        Cow::Owned(minify_html_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

/// Minify HTML content using `minify_html` crate.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_minify(enabled: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.minify = enabled;
        config
    }

    #[test]
    fn test_minify_disabled_borrows() {
        let html = b"<div>\n    <p>Hi</p>\n</div>";
        let result = minify_html(html, &config_with_minify(false));
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, html);
    }

    #[test]
    fn test_minify_enabled_shrinks() {
        let html = b"<div>\n    <p>Hi</p>\n    <!-- note -->\n</div>";
        let result = minify_html(html, &config_with_minify(true));
        assert!(result.len() < html.len());
        let text = String::from_utf8_lossy(&result);
        assert!(text.contains("<p>Hi</p>"));
        assert!(!text.contains("note"));
    }
}
