//! Placeholder substitution.
//!
//! Templates mark insertion points with `{{ name }}` tokens. Rendering is a
//! single left-to-right pass over the template: each token found is replaced
//! by its value from a [`Values`] map, and inserted values are never scanned
//! again. A value that happens to contain `{{ something }}` comes out
//! literally, so one fill can never trigger another.
//!
//! Tokens without a value are left in the output verbatim and reported in
//! [`Rendered::unresolved`], which makes a forgotten substitution something
//! the caller can detect instead of a silent leftover.

use maud::html;
use std::collections::BTreeMap;

/// Token name → rendered value.
#[derive(Debug, Clone, Default)]
pub struct Values {
    map: BTreeMap<String, String>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.map.insert(token.into(), value.into());
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.map.get(token).map(String::as_str)
    }
}

/// Output of one template fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    /// Tokens present in the template with no value, in order of appearance.
    pub unresolved: Vec<String>,
}

/// HTML-escape plain text for use as a token value.
pub fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

/// Parse a token starting at `{{`. Returns the token name and the byte length
/// of the whole `{{ ... }}` span.
fn parse_token(s: &str) -> Option<(&str, usize)> {
    let inner_start = 2;
    let close = s[inner_start..].find("}}")? + inner_start;
    let name = s[inner_start..close].trim();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some((name, close + 2))
}

/// Fill every `{{ token }}` in `template` from `values` in one pass.
pub fn render(template: &str, values: &Values) -> Rendered {
    let mut output = String::with_capacity(template.len());
    let mut unresolved = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let candidate = &rest[open..];
        match parse_token(candidate) {
            Some((name, len)) => {
                match values.get(name) {
                    Some(value) => output.push_str(value),
                    None => {
                        output.push_str(&candidate[..len]);
                        unresolved.push(name.to_string());
                    }
                }
                rest = &candidate[len..];
            }
            None => {
                output.push('{');
                rest = &candidate[1..];
            }
        }
    }
    output.push_str(rest);

    Rendered { output, unresolved }
}
