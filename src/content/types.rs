//! Content types shared across the build pipeline.

use chrono::NaiveDate;
use serde::Deserialize;

/// Front matter block parsed from the top of a markdown source file.
///
/// Delimited by `+++` fences and encoded as TOML:
///
/// ```markdown
/// +++
/// title = "Hello World"
/// date = 2025-06-01
/// +++
///
/// Body starts here.
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontMatter {
    /// Post title. Files without one are skipped at load time.
    #[serde(default)]
    pub title: String,

    /// One-line summary shown on the home page and in feed entries.
    #[serde(default)]
    pub description: Option<String>,

    /// Publication date. Undated posts sort after dated ones.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,

    /// Explicit URL slug; defaults to the slugified file stem.
    #[serde(default)]
    pub slug: Option<String>,

    /// Drafts are excluded from listings, feeds and page output.
    #[serde(default)]
    pub draft: bool,
}

/// Accept both TOML-native dates (`date = 2025-06-01`) and quoted strings
/// (`date = "2025-06-01"`).
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let Some(value) = Option::<toml::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let date = match value {
        toml::Value::Datetime(dt) => dt.date.and_then(|d| {
            NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day))
        }),
        toml::Value::String(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok(),
        _ => None,
    };

    date.map(Some)
        .ok_or_else(|| D::Error::custom("invalid date, expected YYYY-MM-DD"))
}

/// A fully loaded post, ready for rendering.
#[derive(Debug, Clone)]
pub struct Post {
    /// Stable identifier derived from the source path.
    pub id: String,

    pub title: String,
    pub description: Option<String>,

    /// URL slug, unique across the site.
    pub slug: String,

    pub date: Option<NaiveDate>,

    /// Rendered HTML body.
    pub html: String,
}

impl Post {
    /// Site-relative URL of the post page.
    pub fn url_path(&self) -> String {
        format!("/{}/", self.slug)
    }
}
