//! `[analytics]` section configuration.
//!
//! Passive, fire-and-forget telemetry: when enabled, a deferred beacon
//! script tag is injected into every rendered page. Nothing is collected
//! server-side.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[analytics]` section in inkpress.toml.
///
/// # Example
/// ```toml
/// [analytics]
/// enable = true
/// src = "https://plausible.io/js/script.js"
/// site_id = "myblog.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Inject the beacon script into rendered pages.
    #[serde(default = "defaults::r#false")]
    pub enable: bool,

    /// Script URL of the collector.
    #[serde(default = "defaults::analytics::src")]
    #[educe(Default = defaults::analytics::src())]
    pub src: String,

    /// Optional site identifier passed as a `data-site` attribute.
    #[serde(default = "defaults::analytics::site_id")]
    #[educe(Default = defaults::analytics::site_id())]
    pub site_id: Option<String>,
}
