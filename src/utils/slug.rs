//! URL slug generation.
//!
//! Slugs come from the front matter `slug` field when present, otherwise
//! from the source file stem. Either way they pass through `slugify` so the
//! published URL is always lowercase ASCII with `-` separators.

use deunicode::deunicode;

/// Convert arbitrary text to a URL-safe slug.
///
/// Unicode is transliterated to ASCII first, then any run of
/// non-alphanumeric characters collapses to a single `-`.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_sep = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("hello-world"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_separator_runs() {
        assert_eq!(slugify("a -- b ?? c"), "a-b-c");
        assert_eq!(slugify("spaces   and\ttabs"), "spaces-and-tabs");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("!leading and trailing!"), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_transliterates_unicode() {
        assert_eq!(slugify("Grüße aus Köln"), "grusse-aus-koln");
        assert_eq!(slugify("café"), "cafe");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("???"), "");
    }
}
