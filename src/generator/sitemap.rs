//! Sitemap generation.
//!
//! Generates a sitemap.xml listing the home page, the about page and every
//! post, for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use super::full_url;
use crate::{config::SiteConfig, content::ContentSnapshot, log, utils::minify::{MinifyType, minify}};
use anyhow::{Context, Result};
use std::fs;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, content: &ContentSnapshot) -> Result<()> {
    if config.build.sitemap.enable {
        let sitemap = Sitemap::from_content(config, content);
        sitemap.write(config)?;
    }
    Ok(())
}

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (optional, YYYY-MM-DD format)
    lastmod: Option<String>,
}

impl Sitemap {
    /// Build sitemap entries from the content snapshot.
    ///
    /// The home page's lastmod is the newest post date. Post entries carry
    /// their publication date; the about page has none.
    fn from_content(config: &SiteConfig, content: &ContentSnapshot) -> Self {
        let base_url = config.base.url.as_deref().unwrap_or_default();

        let newest = content
            .posts
            .iter()
            .filter_map(|p| p.date)
            .max()
            .map(|d| d.to_string());

        let mut urls = vec![UrlEntry {
            loc: full_url(base_url, "/"),
            lastmod: newest,
        }];

        if content.about.is_some() {
            urls.push(UrlEntry {
                loc: full_url(base_url, "/about/"),
                lastmod: None,
            });
        }

        urls.extend(content.posts.iter().map(|post| UrlEntry {
            loc: full_url(base_url, &post.url_path()),
            lastmod: post.date.map(|d| d.to_string()),
        }));

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = config.build.output.join(&config.build.sitemap.path);
        let xml = self.into_xml();
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{}", sitemap_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
