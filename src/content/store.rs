//! Global content snapshot with atomic replacement.
//!
//! The loaded post list is published as an immutable snapshot behind an
//! `ArcSwap`. Renderers and the dev server read whichever snapshot was
//! current when they started; a rebuild publishes a new one without
//! blocking readers.

use super::types::Post;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Immutable view of the loaded content.
#[derive(Debug, Default)]
pub struct ContentSnapshot {
    /// Publishable posts, newest first. Drafts are never included.
    pub posts: Vec<Post>,

    /// Rendered HTML body of `about.md`, when present.
    pub about: Option<String>,
}

impl ContentSnapshot {
    /// Look up a post by slug.
    pub fn post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }
}

static CONTENT: LazyLock<ArcSwap<ContentSnapshot>> =
    LazyLock::new(|| ArcSwap::from_pointee(ContentSnapshot::default()));

/// Get the current content snapshot.
#[inline]
pub fn snapshot() -> Arc<ContentSnapshot> {
    CONTENT.load_full()
}

/// Publish a new snapshot, replacing the current one atomically.
#[inline]
pub fn publish(snapshot: ContentSnapshot) -> Arc<ContentSnapshot> {
    let snapshot = Arc::new(snapshot);
    CONTENT.store(Arc::clone(&snapshot));
    snapshot
}
