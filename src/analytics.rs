//! Beacon script injection.
//!
//! When enabled, every rendered page carries one deferred `<script>` tag
//! pointing at an external collector. The script loads after the page and
//! never blocks rendering; nothing else is collected or stored here.

use crate::{config::SiteConfig, render::escape_html};

/// Script tag for the configured collector, `None` when disabled.
pub fn snippet(config: &SiteConfig) -> Option<String> {
    if !config.analytics.enable || config.analytics.src.is_empty() {
        return None;
    }

    let src = escape_html(&config.analytics.src);
    let tag = match &config.analytics.site_id {
        Some(site_id) => format!(
            r#"<script defer src="{src}" data-site="{}"></script>"#,
            escape_html(site_id)
        ),
        None => format!(r#"<script defer src="{src}"></script>"#),
    };
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_disabled() {
        let config = SiteConfig::default();
        assert_eq!(snippet(&config), None);
    }

    #[test]
    fn test_snippet_enabled() {
        let mut config = SiteConfig::default();
        config.analytics.enable = true;
        config.analytics.src = "https://plausible.io/js/script.js".into();

        let tag = snippet(&config).unwrap();
        assert!(tag.starts_with("<script defer"));
        assert!(tag.contains(r#"src="https://plausible.io/js/script.js""#));
        assert!(!tag.contains("data-site"));
    }

    #[test]
    fn test_snippet_with_site_id() {
        let mut config = SiteConfig::default();
        config.analytics.enable = true;
        config.analytics.src = "https://plausible.io/js/script.js".into();
        config.analytics.site_id = Some("myblog.com".into());

        let tag = snippet(&config).unwrap();
        assert!(tag.contains(r#"data-site="myblog.com""#));
    }

    #[test]
    fn test_snippet_requires_src() {
        let mut config = SiteConfig::default();
        config.analytics.enable = true;

        assert_eq!(snippet(&config), None);
    }
}
