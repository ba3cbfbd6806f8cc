// src/report.rs
//
// Output rendering. Formatting never fails: absent or empty inputs
// degrade to omitted sections or empty output.

use serde::Serialize;

use crate::scrape::convo::Conversation;

/// Line-oriented conversation report:
///
///   === PROFILE ===        (only when a non-empty profile was scraped)
///   <profile text>
///
///   === MESSAGES ===
///
///   --- <date> ---         (once per run of consecutive same-date messages)
///   her << hello
///    me >> hi
pub fn to_human_readable(convo: &Conversation) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(profile) = convo.profile.as_deref() {
        if !profile.is_empty() {
            lines.push(s!("=== PROFILE ==="));
            lines.push(s!(profile));
            lines.push(s!());
        }
    }

    if !convo.messages.is_empty() {
        lines.push(s!("=== MESSAGES ==="));
        let mut last_date: Option<&str> = None;
        for msg in &convo.messages {
            if let Some(date) = msg.date.as_deref() {
                if last_date != Some(date) {
                    lines.push(s!());
                    lines.push(format!("--- {date} ---"));
                    last_date = Some(date);
                }
            }
            lines.push(format!("{} {}", msg.kind.prefix(), msg.text));
        }
    }

    lines.join("\n")
}

/// Pretty-printed (2-space) JSON of any scrape result.
pub fn to_json<T: Serialize>(value: &T) -> String {
    // Plain owned data; serialization cannot fail.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Plain-text rendering of a list of titles, one per line.
pub fn lines(items: &[String]) -> String {
    items.join("\n")
}
