//! Markdown to HTML conversion using pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Extensions enabled for activity bodies. Authors lean on tables for
/// vocabulary lists, task lists for supplies, and custom heading ids for
/// in-page anchors, so the full set stays on.
fn extensions() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render a markdown body to an HTML fragment.
///
/// Activity bodies are instructions written by the site authors, so the
/// output is embedded as-is without sanitization.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, extensions());
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
