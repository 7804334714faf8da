//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `inkpress.toml` during watch mode.
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let c = cfg();
//! build_site(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

// =============================================================================
// Global State
// =============================================================================

/// Global config storage with atomic replacement support.
///
/// Initialized with default config, then replaced with loaded config in main.
/// During watch mode, can be atomically replaced when inkpress.toml changes.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content at the time of the last load.
static CONFIG_HASH: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

// =============================================================================
// Public API
// =============================================================================

/// Get current config as `Arc<SiteConfig>`.
///
/// Returns an `Arc` that keeps the config alive. Thread-safe and wait-free.
/// Lock-free read via atomic load, suitable for hot paths in rayon contexts.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Replace config atomically (called when inkpress.toml changes).
///
/// The old config remains valid for any readers that loaded it before this
/// call. New readers will see the updated config.
///
/// Returns `true` if config was actually updated, `false` if content matches
/// the last load.
pub fn reload_config() -> anyhow::Result<bool> {
    use std::fs;

    let c = cfg();
    let cli = c.get_cli();

    // Read raw content to check for changes. If reading fails, bubble up the
    // error (file might be deleted temporarily).
    let content = fs::read_to_string(&c.config_path)?;

    let new_hash = crate::utils::hash::compute(content.as_bytes());
    let old_hash = CONFIG_HASH.load(std::sync::atomic::Ordering::Relaxed);
    if new_hash == old_hash {
        return Ok(false);
    }

    let mut new_config = SiteConfig::load(cli)?;
    // The server socket is already bound; changing the port in the config
    // file cannot take effect, so keep URLs pointing at the live port
    if cli.is_serve() {
        new_config.serve.port = c.serve.port;
        new_config.base.url = c.base.url.clone();
    }
    new_config.validate()?;

    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, std::sync::atomic::Ordering::Relaxed);

    Ok(true)
}

/// Initialize global config (called once at startup).
///
/// This replaces the default config with the loaded one.
#[inline]
pub fn init_config(config: SiteConfig) {
    use std::fs;

    // Initialize hash if file exists
    if config.config_path.exists()
        && let Ok(content) = fs::read_to_string(&config.config_path)
    {
        let hash = crate::utils::hash::compute(content.as_bytes());
        CONFIG_HASH.store(hash, std::sync::atomic::Ordering::Relaxed);
    }

    CONFIG.store(Arc::new(config));
}
