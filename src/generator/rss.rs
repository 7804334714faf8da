//! rss feed generation.

use super::full_url;
use crate::{
    config::SiteConfig,
    content::{ContentSnapshot, Post},
    log,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Result, anyhow};
use chrono::NaiveTime;
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, sync::LazyLock};

/// Build rss feed if enabled in config.
pub fn build_rss(config: &SiteConfig, content: &ContentSnapshot) -> Result<()> {
    if config.build.rss.enable {
        RssFeed::build(config, content)?.write(config)?;
    }
    Ok(())
}

/// rss feed builder
struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: Vec<&'a Post>,
}

impl<'a> RssFeed<'a> {
    /// Collect feed entries. Undated posts are silently skipped; a feed
    /// item without a publication date fails validation.
    fn build(config: &'a SiteConfig, content: &'a ContentSnapshot) -> Result<Self> {
        let posts: Vec<_> = content.posts.iter().filter(|p| p.date.is_some()).collect();
        Ok(Self { config, posts })
    }

    /// Generate rss xml string
    fn into_xml(self) -> Result<String> {
        let base_url = self.config.base.url.as_deref().unwrap_or_default();

        let items: Vec<_> = self
            .posts
            .iter()
            .filter_map(|post| post_to_rss_item(post, base_url, self.config))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.base.title)
            .link(base_url)
            .description(&self.config.base.description)
            .language(self.config.base.language.clone())
            .generator("inkpress".to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    /// Write rss feed to file
    fn write(self, config: &SiteConfig) -> Result<()> {
        let xml = self.into_xml()?;
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);
        let rss_path = config.build.output.join(&config.build.rss.path);

        if let Some(parent) = rss_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&rss_path, &*xml)?;

        log!("rss"; "{}", rss_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Convert a post to an rss item. Returns None for undated posts.
fn post_to_rss_item(post: &Post, base_url: &str, config: &SiteConfig) -> Option<rss::Item> {
    let date = post.date?;
    let pub_date = date
        .and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc2822();
    let link = full_url(base_url, &post.url_path());

    Some(
        ItemBuilder::default()
            .title(post.title.clone())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(post.description.clone())
            .pub_date(pub_date)
            .author(rss_author(config))
            .build(),
    )
}

/// Author field in rss format: "email@example.com (Name)"
///
/// Uses the configured author verbatim when it already matches the format,
/// otherwise combines the configured email and author name.
fn rss_author(config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    let site_author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(site_author) {
        return Some(site_author.clone());
    }
    Some(format!("{} ({})", config.base.email, site_author))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_config(author: &str, email: &str) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "My Blog".into();
        config.base.description = "A personal blog".into();
        config.base.author = author.to_string();
        config.base.email = email.to_string();
        config.base.url = Some("https://example.com".to_string());
        config
    }

    fn make_post(title: &str, slug: &str, date: Option<NaiveDate>) -> Post {
        Post {
            id: slug.to_owned(),
            title: title.to_owned(),
            description: Some(format!("{title} summary")),
            slug: slug.to_owned(),
            date,
            html: String::new(),
        }
    }

    #[test]
    fn test_rss_author_already_valid() {
        let config = make_config("site@example.com (Site Author)", "");
        assert_eq!(
            rss_author(&config),
            Some("site@example.com (Site Author)".to_string())
        );
    }

    #[test]
    fn test_rss_author_combined() {
        let config = make_config("Site Author", "site@example.com");
        assert_eq!(
            rss_author(&config),
            Some("site@example.com (Site Author)".to_string())
        );
    }

    #[test]
    fn test_post_to_rss_item() {
        let config = make_config("Alice", "alice@example.com");
        let post = make_post("Test Title", "test", NaiveDate::from_ymd_opt(2024, 1, 1));

        let item = post_to_rss_item(&post, "https://example.com", &config).unwrap();
        assert_eq!(item.title(), Some("Test Title"));
        assert_eq!(item.link(), Some("https://example.com/test/"));
        assert_eq!(item.description(), Some("Test Title summary"));
        assert_eq!(item.author(), Some("alice@example.com (Alice)"));
        assert!(item.pub_date().unwrap().contains("Jan 2024"));
    }

    #[test]
    fn test_post_to_rss_item_undated() {
        let config = make_config("Alice", "alice@example.com");
        let post = make_post("Title", "test", None);

        assert!(post_to_rss_item(&post, "https://example.com", &config).is_none());
    }

    #[test]
    fn test_feed_xml_validates() {
        let config = make_config("Alice", "alice@example.com");
        let content = ContentSnapshot {
            posts: vec![
                make_post("New", "new", NaiveDate::from_ymd_opt(2025, 6, 1)),
                make_post("Undated", "undated", None),
                make_post("Old", "old", NaiveDate::from_ymd_opt(2024, 1, 1)),
            ],
            about: None,
        };

        let xml = RssFeed::build(&config, &content).unwrap().into_xml().unwrap();

        assert!(xml.contains("<title>My Blog</title>"));
        assert!(xml.contains("<title>New</title>"));
        assert!(xml.contains("<title>Old</title>"));
        assert!(!xml.contains("<title>Undated</title>"));
        assert_eq!(xml.matches("<item>").count(), 2);
    }
}
