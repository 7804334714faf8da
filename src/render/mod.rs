//! HTML page rendering.
//!
//! Pages are assembled from plain string templates: `pages` builds the
//! `<main>` content for each page kind, `layout` wraps it in the shared
//! document shell (head metadata, header with theme toggle, footer).

pub mod layout;
pub mod pages;

pub use layout::{Page, render_document};

use chrono::NaiveDate;

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Human-readable date for listings and post headers.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
