//! File system watcher for live rebuild.
//!
//! Monitors the content and assets directories plus the config file. Any
//! change triggers a full site rebuild; config changes additionally reload
//! the global config first so the rebuild sees the new settings.
//!
//! # Architecture
//!
//! ```text
//! notify events ──► Debouncer (300ms) ──► handle_changes()
//!                                             ├── config file: reload + rebuild
//!                                             └── content/assets: rebuild
//! ```

use crate::{
    config::{SiteConfig, cfg, reload_config},
    log,
    logger::WatchStatus,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path as relative to root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Process a batch of changes. Returns true if a rebuild ran (for cooldown).
fn handle_changes(paths: &[PathBuf], status: &mut WatchStatus) -> bool {
    if paths.is_empty() {
        return false;
    }

    let config = cfg();
    let root = config.get_root().to_owned();
    let config_changed = paths.iter().any(|p| *p == config.config_path);

    if config_changed {
        match reload_config() {
            Ok(true) => {}
            Ok(false) => {
                // Content hash unchanged, nothing to do for a config-only batch
                if paths.len() == 1 {
                    status.unchanged(&rel_path(&config.config_path, &root));
                    return false;
                }
            }
            Err(e) => {
                status.error("config reload failed", &format!("{e:#}"));
                return false;
            }
        }
    }

    let trigger = paths
        .iter()
        .map(|p| rel_path(p, &root))
        .collect::<Vec<_>>()
        .join(", ");

    // Rebuild against the freshest config (reload may have replaced it)
    match crate::build::build_site(&cfg()) {
        Ok(_) => {
            status.success(&format!("rebuilt: {trigger}"));
            true
        }
        Err(e) => {
            status.error(&format!("failed: {trigger}"), &format!("{e:#}"));
            false
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let watch_dirs = [&config.build.content, &config.build.assets];
    for dir in watch_dirs {
        if dir.exists() {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch {}", dir.display()))?;
        }
    }

    if config.config_path.exists() {
        watcher
            .watch(&config.config_path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", config.config_path.display()))?;
    }

    let root = config.get_root();
    let watched: Vec<_> = watch_dirs
        .into_iter()
        .filter(|p| p.exists())
        .map(|p| format!("{}/", rel_path(p, root)))
        .chain(
            config
                .config_path
                .exists()
                .then(|| rel_path(&config.config_path, root)),
        )
        .collect();
    log!("watch"; "watching: {}", watched.join(", "));
    eprintln!(); // Blank line to separate init logs from change events

    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let config = cfg();
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &config)?;

    let mut debouncer = Debouncer::new();
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut status) {
                    debouncer.mark_rebuild();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without ready, etc.
            _ => {}
        }
    }

    Ok(())
}
