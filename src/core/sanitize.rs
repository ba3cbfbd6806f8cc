// src/core/sanitize.rs

/// Collapse whitespace runs (including NBSP) into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Fold text into a comparison key: collapsed whitespace, lowercased.
/// Only ever used for matching; display text stays as scraped.
pub fn fold_key(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}

/// Replace non-breaking spaces with plain ones. Date dividers render
/// "Mon,&nbsp;12 Aug" and the report should compare/print them as text.
pub fn flatten_nbsp(s: &str) -> String {
    s.replace('\u{a0}', " ")
}
