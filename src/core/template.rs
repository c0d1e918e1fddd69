//! Path templates for the remote deck service.
//!
//! Templates name the deck with either `{deck}` or the older `<%= deck %>`
//! form, e.g. `/v1/decks/{deck}/cards`.

use regex::Regex;
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\s*deck\s*\}|<%=\s*deck\s*%>").expect("deck placeholder pattern is valid")
    })
}

pub fn has_deck_placeholder(template: &str) -> bool {
    placeholder().is_match(template)
}

/// Substitutes every deck placeholder in `template` with `code`.
pub fn render_deck_path(template: &str, code: &str) -> String {
    placeholder()
        .replace_all(template, regex::NoExpand(code))
        .into_owned()
}
