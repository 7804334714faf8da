//! Site initialization module.
//!
//! Creates new site structure with default configuration and sample content.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default config filename
const CONFIG_FILE: &str = "inkpress.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &["content", "assets/images", "assets/fonts"];

const SAMPLE_POST: &str = r#"+++
title = "Hello World"
description = "The first post on this site."
date = 2025-01-01
+++

Welcome to your new site. Edit or delete this file under `content/`
and run `inkpress serve` to preview changes live.
"#;

const SAMPLE_ABOUT: &str = r#"+++
title = "About"
+++

A few words about yourself. This file renders at `/about/`.
"#;

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name, init targets the current directory, which must be empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `inkpress init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_sample_content(root)?;
    init_ignored_files(root, &["public/", ".inkpress/"])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `inkpress init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write starter content files
fn init_sample_content(root: &Path) -> Result<()> {
    fs::write(root.join("content/hello-world.md"), SAMPLE_POST)?;
    fs::write(root.join("content/about.md"), SAMPLE_ABOUT)?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified patterns
fn init_ignored_files(root: &Path, patterns: &[&str]) -> Result<()> {
    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
