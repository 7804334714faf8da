//! `[build]` section configuration.
//!
//! Contains build paths, minification and feed generation settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in inkpress.toml - build settings.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"
/// output = "public"
/// minify = true
///
/// [build.rss]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Site root directory (set from CLI, not from the config file).
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Content directory containing markdown posts.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Static assets directory (fonts, images, ...).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify generated HTML/XML.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Clear the output directory completely before building.
    #[serde(default = "defaults::r#false")]
    pub clean: bool,

    /// rss feed settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// Sitemap settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// `[build.rss]` - rss feed generation.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RssConfig {
    /// Enable rss feed generation. Requires `[base].url`.
    #[serde(default = "defaults::r#false")]
    pub enable: bool,

    /// Feed file path, relative to the output directory.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,
}

/// `[build.sitemap]` - sitemap generation.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Enable sitemap generation. Requires `[base].url`.
    #[serde(default = "defaults::r#false")]
    pub enable: bool,

    /// Sitemap file path, relative to the output directory.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}
