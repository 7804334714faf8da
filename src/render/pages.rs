//! Per-page content rendering.

use super::{Page, escape_html, format_date};
use crate::{
    config::SiteConfig,
    content::{ContentSnapshot, Post},
};

/// Slug used for the sitewide preview image shared by home and about.
pub const SITE_OG_SLUG: &str = "site";

/// Preview image URL for a page.
///
/// When pre-rendering is on, pages point at the static PNG written during
/// the build. Otherwise they point at the dev server's `/og` endpoint.
pub fn og_image_url(config: &SiteConfig, title: &str, slug: &str) -> Option<String> {
    if !config.og.enable {
        return None;
    }
    if config.og.prerender {
        Some(format!("/{}/{slug}.png", config.og.output.display()))
    } else {
        Some(format!("/og?title={}", urlencoding::encode(title)))
    }
}

/// Home page: intro blurb followed by the post listing, newest first.
pub fn render_home(config: &SiteConfig, content: &ContentSnapshot) -> Page {
    let mut body = String::new();

    let intro = config.base.intro_text();
    if !intro.is_empty() {
        body.push_str(&format!(
            "      <section class=\"intro\">\n        <p>{}</p>\n      </section>\n",
            escape_html(intro)
        ));
    }

    body.push_str("      <section class=\"posts\">\n");
    for post in &content.posts {
        body.push_str(&render_listing_entry(post));
    }
    body.push_str("      </section>\n");

    Page {
        title: config.base.title.clone(),
        description: None,
        path: "/".into(),
        og_image: og_image_url(config, &config.base.title, SITE_OG_SLUG),
        body,
    }
}

/// One entry in the home page listing. The description line appears only
/// when the post has one.
fn render_listing_entry(post: &Post) -> String {
    let mut entry = String::new();
    entry.push_str("        <article class=\"post-entry\">\n");
    entry.push_str(&format!(
        "          <h2><a href=\"{}\">{}</a></h2>\n",
        post.url_path(),
        escape_html(&post.title)
    ));
    if let Some(date) = &post.date {
        entry.push_str(&format!(
            "          <time datetime=\"{date}\">{}</time>\n",
            format_date(date)
        ));
    }
    if let Some(description) = &post.description {
        entry.push_str(&format!("          <p>{}</p>\n", escape_html(description)));
    }
    entry.push_str("        </article>\n");
    entry
}

/// Single post page.
pub fn render_post(config: &SiteConfig, post: &Post) -> Page {
    let mut body = String::new();
    body.push_str("      <article class=\"post\">\n");
    body.push_str(&format!("        <h1>{}</h1>\n", escape_html(&post.title)));
    if let Some(date) = &post.date {
        body.push_str(&format!(
            "        <time datetime=\"{date}\">{}</time>\n",
            format_date(date)
        ));
    }
    body.push_str(&post.html);
    body.push_str("      </article>\n");

    Page {
        title: post.title.clone(),
        description: post.description.clone(),
        path: post.url_path(),
        og_image: og_image_url(config, &post.title, &post.slug),
        body,
    }
}

/// About page, rendered from `content/about.md`.
pub fn render_about(config: &SiteConfig, about_html: &str) -> Page {
    let mut body = String::new();
    body.push_str("      <article class=\"about\">\n");
    body.push_str(about_html);
    body.push_str("      </article>\n");

    Page {
        title: "About".into(),
        description: None,
        path: "/about/".into(),
        og_image: og_image_url(config, &config.base.title, SITE_OG_SLUG),
        body,
    }
}
