//! Shared document shell.
//!
//! Every page renders through `render_document`: head metadata including
//! OpenGraph tags, the site header with navigation and theme toggle, the
//! page body slot, and a footer. The `data-theme` attribute on `<html>`
//! carries the server-resolved theme; `theme.js` takes over client-side.

use super::escape_html;
use crate::{analytics, config::SiteConfig, theme::Theme};

/// Inputs for one rendered document.
pub struct Page {
    /// Document title, combined with the site title in `<title>`.
    pub title: String,

    /// Meta description; falls back to the site description.
    pub description: Option<String>,

    /// Site-relative path of this page, e.g. `/` or `/hello-world/`.
    pub path: String,

    /// Site-relative URL of the social preview image.
    pub og_image: Option<String>,

    /// Rendered `<main>` content.
    pub body: String,
}

/// Render a complete HTML document around the given page content.
pub fn render_document(config: &SiteConfig, theme: Theme, page: &Page) -> String {
    let site_title = escape_html(&config.base.title);
    let page_title = if page.title.is_empty() || page.title == config.base.title {
        site_title.clone()
    } else {
        format!("{} | {site_title}", escape_html(&page.title))
    };

    let description = escape_html(
        page.description
            .as_deref()
            .unwrap_or(&config.base.description),
    );

    let base_url = config.base.url.as_deref().unwrap_or("").trim_end_matches('/');
    let canonical = format!("{base_url}{}", page.path);

    let mut head_extra = String::new();
    if let Some(image) = &page.og_image {
        head_extra.push_str(&format!(
            "    <meta property=\"og:image\" content=\"{base_url}{}\">\n",
            escape_html(image)
        ));
        head_extra.push_str("    <meta name=\"twitter:card\" content=\"summary_large_image\">\n");
    }
    if let Some(beacon) = analytics::snippet(config) {
        head_extra.push_str("    ");
        head_extra.push_str(&beacon);
        head_extra.push('\n');
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" data-theme="{theme}">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{page_title}</title>
    <meta name="description" content="{description}">
    <link rel="canonical" href="{canonical}">
    <meta property="og:title" content="{page_title}">
    <meta property="og:description" content="{description}">
    <meta property="og:url" content="{canonical}">
    <meta property="og:type" content="website">
{head_extra}    <link rel="stylesheet" href="/style.css">
    <script defer src="/theme.js"></script>
  </head>
  <body>
    <header class="site-header">
      <a class="site-title" href="/">{site_title}</a>
      <nav>
        <a href="/">Home</a>
        <a href="/about/">About</a>
        <button id="theme-toggle" type="button" aria-label="Toggle theme">◐</button>
      </nav>
    </header>
    <main>
{body}    </main>
    <footer class="site-footer">
      <p>{copyright}</p>
    </footer>
  </body>
</html>
"#,
        lang = escape_html(&config.base.language),
        theme = theme.resolve(Theme::Light).as_str(),
        body = page.body,
        copyright = escape_html(&config.base.copyright),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "My Blog".into();
        config.base.description = "A personal blog".into();
        config.base.url = Some("https://example.com".into());
        config
    }

    fn test_page(body: &str) -> Page {
        Page {
            title: "Hello".into(),
            description: Some("First post".into()),
            path: "/hello/".into(),
            og_image: Some("/og/hello.png".into()),
            body: body.to_owned(),
        }
    }

    #[test]
    fn test_document_structure() {
        let html = render_document(&test_config(), Theme::Dark, &test_page("<p>hi</p>\n"));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en-US" data-theme="dark">"#));
        assert!(html.contains("<title>Hello | My Blog</title>"));
        assert!(html.contains("<p>hi</p>"));
        assert!(html.contains(r#"<button id="theme-toggle""#));
        assert!(html.contains(r#"<script defer src="/theme.js">"#));
    }

    #[test]
    fn test_system_theme_resolves_to_concrete_mode() {
        let html = render_document(&test_config(), Theme::System, &test_page(""));
        assert!(html.contains(r#"data-theme="light""#));
    }

    #[test]
    fn test_og_tags() {
        let html = render_document(&test_config(), Theme::Light, &test_page(""));

        assert!(html.contains(r#"<meta property="og:title" content="Hello | My Blog">"#));
        assert!(html.contains(r#"<meta property="og:url" content="https://example.com/hello/">"#));
        assert!(
            html.contains(r#"<meta property="og:image" content="https://example.com/og/hello.png">"#)
        );
    }

    #[test]
    fn test_no_og_image_no_twitter_card() {
        let mut page = test_page("");
        page.og_image = None;
        let html = render_document(&test_config(), Theme::Light, &page);

        assert!(!html.contains("og:image"));
        assert!(!html.contains("twitter:card"));
    }

    #[test]
    fn test_analytics_snippet_injected_when_enabled() {
        let mut config = test_config();
        config.analytics.enable = true;
        config.analytics.src = "https://plausible.io/js/script.js".into();

        let html = render_document(&config, Theme::Light, &test_page(""));
        assert!(html.contains(r#"<script defer src="https://plausible.io/js/script.js">"#));
    }

    #[test]
    fn test_title_escaped() {
        let mut page = test_page("");
        page.title = "Tags & <Trees>".into();
        let html = render_document(&test_config(), Theme::Light, &page);

        assert!(html.contains("Tags &amp; &lt;Trees&gt; | My Blog"));
    }
}
