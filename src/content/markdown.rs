//! Markdown to HTML rendering via pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Render a markdown body to HTML.
///
/// GitHub-flavored extensions are enabled: tables, strikethrough and task
/// lists. Raw HTML in the source passes through untouched.
pub fn render(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}
