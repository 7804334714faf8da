//! `+++` front matter extraction.

use super::types::FrontMatter;
use anyhow::{Result, bail};

/// Split a markdown source into front matter and body.
///
/// The file must start with a `+++` fence line; everything up to the next
/// `+++` line is parsed as TOML. A file without a fence has no front matter
/// and the whole input is body.
pub fn parse(source: &str) -> Result<(FrontMatter, &str)> {
    let Some(rest) = strip_fence(source) else {
        return Ok((FrontMatter::default(), source));
    };

    let Some(end) = find_closing_fence(rest) else {
        bail!("front matter opened with +++ but never closed");
    };

    let raw = &rest[..end];
    let front_matter: FrontMatter = toml::from_str(raw)?;

    // Skip the closing fence line itself
    let body = rest[end..]
        .split_once('\n')
        .map_or("", |(_, body)| body);

    Ok((front_matter, body))
}

/// Strip a leading `+++` fence line, tolerating a BOM and trailing spaces.
fn strip_fence(source: &str) -> Option<&str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let (first, rest) = source.split_once('\n')?;
    if first.trim_end() == "+++" {
        Some(rest)
    } else {
        None
    }
}

/// Byte offset of the closing `+++` line within the remainder.
fn find_closing_fence(rest: &str) -> Option<usize> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "+++" {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}
