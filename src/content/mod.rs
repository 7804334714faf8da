//! Content pipeline: discover markdown sources, parse front matter, render
//! HTML and publish an ordered snapshot.

pub mod frontmatter;
pub mod markdown;
pub mod store;
pub mod types;

pub use store::{ContentSnapshot, publish, snapshot};
pub use types::{FrontMatter, Post};

use crate::{config::SiteConfig, log, utils};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use std::{fs, path::Path};
use walkdir::WalkDir;

/// File stem reserved for the about page, not a post.
const ABOUT_STEM: &str = "about";

/// Load all content under the configured content directory.
///
/// Posts are ordered newest first by date; undated posts sort after dated
/// ones, alphabetically by title. Drafts and untitled files are skipped.
/// Duplicate slugs are an error since both posts would claim the same URL.
pub fn load_content(config: &SiteConfig) -> Result<ContentSnapshot> {
    let content_dir = &config.build.content;
    if !content_dir.is_dir() {
        bail!("content directory not found: {}", content_dir.display());
    }

    let mut sources: Vec<_> = WalkDir::new(content_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    sources.sort();

    let mut posts = Vec::with_capacity(sources.len());
    let mut about = None;

    for path in &sources {
        if path.file_stem().is_some_and(|s| s == ABOUT_STEM) {
            about = Some(load_about(path)?);
            continue;
        }
        if let Some(post) = load_post(path, content_dir)? {
            posts.push(post);
        }
    }

    sort_posts(&mut posts);

    // Slugs map one-to-one onto output directories
    let mut seen = FxHashSet::default();
    for post in &posts {
        if !seen.insert(post.slug.as_str()) {
            bail!("duplicate slug: {}", post.slug);
        }
    }

    Ok(ContentSnapshot { posts, about })
}

/// Load a single post source. Returns `None` for drafts and untitled files.
fn load_post(path: &Path, content_dir: &Path) -> Result<Option<Post>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let (fm, body) = frontmatter::parse(&source)
        .with_context(|| format!("Invalid front matter in {}", path.display()))?;

    if fm.draft {
        return Ok(None);
    }
    if fm.title.is_empty() {
        log!("content"; "skipping untitled file: {}", path.display());
        return Ok(None);
    }

    let slug = match &fm.slug {
        Some(explicit) => utils::slug::slugify(explicit),
        None => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            utils::slug::slugify(stem)
        }
    };
    if slug.is_empty() {
        bail!("empty slug for {}", path.display());
    }

    let relative = path.strip_prefix(content_dir).unwrap_or(path);

    Ok(Some(Post {
        id: utils::hash::content_id(relative),
        title: fm.title,
        description: fm.description,
        slug,
        date: fm.date,
        html: markdown::render(body),
    }))
}

fn load_about(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let (_, body) = frontmatter::parse(&source)?;
    Ok(markdown::render(body))
}

/// Order posts newest first. Undated posts follow dated ones, sorted by
/// title so the listing stays stable across rebuilds.
fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        let by_date = match (&a.date, &b.date) {
            (Some(da), Some(db)) => db.cmp(da),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        by_date.then_with(|| a.title.cmp(&b.title))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn write_content(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn config_with_content(dir: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.content = dir.to_path_buf();
        config
    }

    #[test]
    fn test_load_content_orders_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        write_content(
            tmp.path(),
            "old.md",
            "+++\ntitle = \"Old\"\ndate = 2024-01-01\n+++\nold body\n",
        );
        write_content(
            tmp.path(),
            "new.md",
            "+++\ntitle = \"New\"\ndate = 2025-06-01\n+++\nnew body\n",
        );
        write_content(tmp.path(), "undated.md", "+++\ntitle = \"Undated\"\n+++\nbody\n");

        let snap = load_content(&config_with_content(tmp.path())).unwrap();
        let titles: Vec<_> = snap.posts.iter().map(|p| p.title.as_str()).collect();

        assert_eq!(titles, ["New", "Old", "Undated"]);
    }

    #[test]
    fn test_load_content_skips_drafts() {
        let tmp = tempfile::tempdir().unwrap();
        write_content(
            tmp.path(),
            "wip.md",
            "+++\ntitle = \"WIP\"\ndraft = true\n+++\nnot yet\n",
        );
        write_content(tmp.path(), "done.md", "+++\ntitle = \"Done\"\n+++\nshipped\n");

        let snap = load_content(&config_with_content(tmp.path())).unwrap();

        assert_eq!(snap.posts.len(), 1);
        assert_eq!(snap.posts[0].title, "Done");
    }

    #[test]
    fn test_load_content_skips_untitled() {
        let tmp = tempfile::tempdir().unwrap();
        write_content(tmp.path(), "untitled.md", "+++\ndraft = false\n+++\nbody\n");
        write_content(tmp.path(), "titled.md", "+++\ntitle = \"Titled\"\n+++\nbody\n");

        let snap = load_content(&config_with_content(tmp.path())).unwrap();

        assert_eq!(snap.posts.len(), 1);
        assert_eq!(snap.posts[0].title, "Titled");
    }

    #[test]
    fn test_load_content_about_is_not_a_post() {
        let tmp = tempfile::tempdir().unwrap();
        write_content(tmp.path(), "about.md", "+++\ntitle = \"About\"\n+++\nwho I am\n");
        write_content(tmp.path(), "post.md", "+++\ntitle = \"Post\"\n+++\nbody\n");

        let snap = load_content(&config_with_content(tmp.path())).unwrap();

        assert_eq!(snap.posts.len(), 1);
        assert!(snap.about.is_some());
        assert!(snap.about.unwrap().contains("who I am"));
    }

    #[test]
    fn test_load_content_slug_from_stem_and_front_matter() {
        let tmp = tempfile::tempdir().unwrap();
        write_content(tmp.path(), "My First Post.md", "+++\ntitle = \"First\"\n+++\n\n");
        write_content(
            tmp.path(),
            "second.md",
            "+++\ntitle = \"Second\"\nslug = \"Custom Slug\"\n+++\n\n",
        );

        let snap = load_content(&config_with_content(tmp.path())).unwrap();
        let mut slugs: Vec<_> = snap.posts.iter().map(|p| p.slug.clone()).collect();
        slugs.sort();

        assert_eq!(slugs, ["custom-slug", "my-first-post"]);
    }

    #[test]
    fn test_load_content_duplicate_slug_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_content(
            tmp.path(),
            "a.md",
            "+++\ntitle = \"A\"\nslug = \"same\"\ndate = 2025-01-01\n+++\n\n",
        );
        write_content(
            tmp.path(),
            "b.md",
            "+++\ntitle = \"B\"\nslug = \"same\"\ndate = 2025-01-01\n+++\n\n",
        );

        assert!(load_content(&config_with_content(tmp.path())).is_err());
    }

    #[test]
    fn test_load_content_missing_dir_fails() {
        let config = config_with_content(&PathBuf::from("/nonexistent/content"));
        assert!(load_content(&config).is_err());
    }

    #[test]
    fn test_load_post_renders_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        write_content(
            tmp.path(),
            "post.md",
            "+++\ntitle = \"Post\"\ndate = 2025-02-03\n+++\n# Heading\n",
        );

        let snap = load_content(&config_with_content(tmp.path())).unwrap();
        let post = &snap.posts[0];

        assert!(post.html.contains("<h1>Heading</h1>"));
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2025, 2, 3));
        assert_eq!(post.id.len(), 16);
    }
}
