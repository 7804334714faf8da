//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_content() ──► parse front matter, render markdown, publish snapshot
//!     │
//!     ├── rayon::join
//!     │       ├── render pages (home, about, one per post)
//!     │       └── copy static assets
//!     │
//!     ├── write embedded style.css / theme.js
//!     │
//!     └── prerender og images (when enabled)
//! ```

use crate::{
    config::SiteConfig,
    content::{self, ContentSnapshot},
    log,
    og::OgRenderer,
    render::{self, Page, pages},
    theme::{FilePreferenceStore, Theme, initial},
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::Path, sync::Arc};

/// Stylesheet and theme script shipped with every site.
const STYLE_CSS: &str = include_str!("embed/style.css");
const THEME_JS: &str = include_str!("embed/theme.js");

/// Build the entire site into the output directory.
///
/// Returns the published content snapshot for rss/sitemap generation.
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &SiteConfig) -> Result<Arc<ContentSnapshot>> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let snapshot = content::publish(content::load_content(config)?);
    log!("content"; "found {} posts", snapshot.posts.len());

    let theme = initial(
        &FilePreferenceStore::new(&config.theme.store),
        config.theme.default,
    );

    let (pages_result, assets_result) = rayon::join(
        || render_pages(config, &snapshot, theme),
        || copy_assets(config),
    );
    pages_result?;
    assets_result?;

    fs::write(output.join("style.css"), STYLE_CSS)?;
    fs::write(output.join("theme.js"), THEME_JS)?;

    if config.og.enable && config.og.prerender {
        prerender_og(config, &snapshot)?;
    }

    log!("build"; "done");
    Ok(snapshot)
}

/// Create the output directory, clearing it first when requested.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

/// Render every page of the site in parallel.
fn render_pages(config: &SiteConfig, snapshot: &ContentSnapshot, theme: Theme) -> Result<()> {
    let mut rendered: Vec<Page> = vec![pages::render_home(config, snapshot)];
    if let Some(about) = &snapshot.about {
        rendered.push(pages::render_about(config, about));
    }
    rendered.extend(snapshot.posts.iter().map(|post| pages::render_post(config, post)));

    rendered
        .par_iter()
        .try_for_each(|page| write_page(config, theme, page))
}

/// Render a page's document shell and write it to `<path>/index.html`.
fn write_page(config: &SiteConfig, theme: Theme, page: &Page) -> Result<()> {
    let html = render::render_document(config, theme, page);
    let html = minify(MinifyType::Html(html.as_bytes()), config);

    let dir = config
        .build
        .output
        .join(page.path.trim_matches('/'));
    fs::create_dir_all(&dir)?;

    let file = dir.join("index.html");
    fs::write(&file, &*html).with_context(|| format!("Failed to write {}", file.display()))?;
    Ok(())
}

/// Copy the static assets directory into `<output>/assets/`, preserving
/// the directory structure. A missing assets directory is not an error.
fn copy_assets(config: &SiteConfig) -> Result<()> {
    let assets = &config.build.assets;
    if !assets.is_dir() {
        return Ok(());
    }

    let files: Vec<_> = walkdir::WalkDir::new(assets)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    files.par_iter().try_for_each(|path| {
        let relative = path.strip_prefix(assets)?;
        let dest = config.build.output.join("assets").join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)
            .with_context(|| format!("Failed to copy asset {}", path.display()))?;
        Ok(())
    })
}

/// Pre-render one preview PNG per post, plus the sitewide image used by the
/// home and about pages. A missing font downgrades to a warning so a fresh
/// site without assets still builds.
fn prerender_og(config: &SiteConfig, snapshot: &ContentSnapshot) -> Result<()> {
    let renderer = match OgRenderer::from_config(config) {
        Ok(renderer) => renderer,
        Err(e) => {
            log!("og"; "skipping preview images: {:#}", e);
            return Ok(());
        }
    };

    let og_dir = config.build.output.join(&config.og.output);
    fs::create_dir_all(&og_dir)?;

    let site_png = renderer.render(&config.base.title)?;
    fs::write(og_dir.join(format!("{}.png", pages::SITE_OG_SLUG)), site_png)?;

    snapshot.posts.par_iter().try_for_each(|post| {
        let png = renderer
            .render(&post.title)
            .with_context(|| format!("Failed to render preview for {}", post.slug))?;
        fs::write(og_dir.join(format!("{}.png", post.slug)), png)?;
        Ok::<_, anyhow::Error>(())
    })?;

    log!("og"; "rendered {} preview images", snapshot.posts.len() + 1);
    Ok(())
}
