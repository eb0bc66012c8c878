//! Markdown to HTML conversion.
//!
//! A thin wrapper around `pulldown-cmark` so every stage converts markdown with
//! the same extensions enabled.

use pulldown_cmark::{Options, Parser, html as md_html};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
}

/// Convert a markdown string to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut out, parser);
    out
}
