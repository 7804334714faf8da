//! Display mode state machine and preference persistence.
//!
//! The theme is one of `light`, `dark` or `system`, changed only by an
//! explicit toggle. The persisted preference survives across sessions and is
//! read at render time to set the `data-theme` attribute on the document
//! root. The browser-side counterpart lives in `embed/theme.js`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, str::FromStr};

// ============================================================================
// Theme
// ============================================================================

/// Display mode. `System` defers to the platform preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Advance the state machine by one explicit toggle.
    ///
    /// `system_resolves_to` is the concrete mode the platform currently
    /// reports for `System` (always `Light` or `Dark`). Toggling from
    /// `System` never stays on `System`: it yields the opposite concrete
    /// mode, so the user sees an immediate change.
    pub fn toggle(self, system_resolves_to: Self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
            Self::System => match system_resolves_to {
                Self::Dark => Self::Light,
                _ => Self::Dark,
            },
        }
    }

    /// Concrete mode used for rendering, resolving `System`.
    pub fn resolve(self, system_resolves_to: Self) -> Self {
        match self {
            Self::System => match system_resolves_to {
                Self::System => Self::Light,
                concrete => concrete,
            },
            concrete => concrete,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => anyhow::bail!("unknown theme: {other}"),
        }
    }
}

// ============================================================================
// Preference Store
// ============================================================================

/// Persistence seam for the theme preference.
///
/// Injected into the rendering layer instead of ambient global state, so the
/// storage backend can be swapped out (and faked in tests).
pub trait PreferenceStore {
    /// Read the persisted preference, `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<Theme>>;

    /// Persist a preference, replacing any previous value.
    fn save(&self, theme: Theme) -> Result<()>;
}

/// Resolve the initial theme: persisted preference, else the configured
/// default. Unreadable stores fall back to the default rather than failing
/// the render.
pub fn initial(store: &dyn PreferenceStore, default: Theme) -> Theme {
    store.load().ok().flatten().unwrap_or(default)
}

/// Persisted preference payload, kept as a struct for forward compatibility.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    theme: Theme,
}

/// File-backed preference store (a small JSON file under the site root).
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let stored: StoredPreference = serde_json::from_str(&content)?;
        Ok(Some(stored.theme))
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(&StoredPreference { theme })?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
