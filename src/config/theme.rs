//! `[theme]` section configuration.
//!
//! Controls the default display mode and where the preference is persisted.

use super::defaults;
use crate::theme::Theme;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[theme]` section in inkpress.toml - display mode settings.
///
/// # Example
/// ```toml
/// [theme]
/// default = "system"
/// store = ".inkpress/theme.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Mode used when no preference has been persisted yet.
    #[serde(default = "defaults::theme::default_mode")]
    #[educe(Default = defaults::theme::default_mode())]
    pub default: Theme,

    /// Path of the persisted preference file, relative to the site root.
    #[serde(default = "defaults::theme::store")]
    #[educe(Default = defaults::theme::store())]
    pub store: PathBuf,
}
