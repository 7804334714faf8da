//! Feed and sitemap generation.

pub mod rss;
pub mod sitemap;

/// Full URL of a page given its site-relative path.
pub(crate) fn full_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}
