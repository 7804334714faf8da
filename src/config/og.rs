//! `[og]` section configuration.
//!
//! Controls the social preview image renderer: the `/og` endpoint in serve
//! mode and pre-rendered `og/<slug>.png` files at build time.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[og]` section in inkpress.toml - social preview images.
///
/// # Example
/// ```toml
/// [og]
/// enable = true
/// font = "assets/fonts/kaisei-tokumin-bold.ttf"
/// background = "assets/images/og-background.jpg"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OgConfig {
    /// Enable the `/og` endpoint and build-time pre-rendering.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Title font file. Read on every render; a missing font fails the
    /// render (no fallback font).
    #[serde(default = "defaults::og::font")]
    #[educe(Default = defaults::og::font())]
    pub font: PathBuf,

    /// Background photo scaled center-cover onto the canvas.
    /// When unset, a solid dark fill is used instead.
    #[serde(default = "defaults::og::background")]
    #[educe(Default = defaults::og::background())]
    pub background: Option<PathBuf>,

    /// Pre-render one preview image per post at build time.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub prerender: bool,

    /// Directory for pre-rendered previews, relative to the output directory.
    #[serde(default = "defaults::og::output")]
    #[educe(Default = defaults::og::output())]
    pub output: PathBuf,
}
