// src/scrape/convo.rs
//
// Conversation-view extractor. The snapshot holds a profile pane and a
// message thread; grouped markup interleaves date dividers with messages,
// flat markup has bare message elements only.
//
// Extraction is a pure query: missing elements degrade to absent/empty
// values, nothing in the document is touched.

use serde::{Deserialize, Serialize};

use crate::core::dom::{self, Doc};
use crate::core::sanitize::flatten_nbsp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    In,
    Out,
    Unknown,
}

impl MessageKind {
    /// Report prefix. Widths line up so the thread reads as two columns.
    pub fn prefix(self) -> &'static str {
        match self {
            MessageKind::In => "her <<",
            MessageKind::Out => " me >>",
            MessageKind::Unknown => "??",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub text: String,
    /// Text of the nearest preceding date divider; None before the first.
    pub date: Option<String>,
}

/// Root structure for both JSON and human-readable output.
/// Field order here is the serialized field order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub profile: Option<String>,
    pub messages: Vec<Message>,
}

/// Trimmed text of the profile pane, or None when the snapshot has none.
pub fn extract_profile(doc: &Doc) -> Option<String> {
    doc.first(sel!(".profile")).map(dom::text_of)
}

/// Grouped variant: walk the direct children of the conversation container,
/// carrying the last-seen date divider forward onto each message.
pub fn extract_messages(doc: &Doc) -> Vec<Message> {
    let Some(conv) = doc.first(sel!(".messages-list__conversation")) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut current_date: Option<String> = None;

    for child in dom::element_children(conv) {
        if dom::has_class(child, "message-group-date") {
            // A divider with no inner date element resets the running date.
            current_date = dom::first_text(child, sel!(".p-3"))
                .map(|t| flatten_nbsp(&t));
        } else if dom::has_class(child, "message") {
            out.push(read_message(child, current_date.clone()));
        }
    }
    out
}

/// Flat variant: every message element in the document, no date grouping.
pub fn extract_messages_flat(doc: &Doc) -> Vec<Message> {
    doc.all(sel!(".message"))
        .into_iter()
        .map(|el| read_message(el, None))
        .collect()
}

/// Everything the snapshot has to say, in one record.
pub fn extract(doc: &Doc, flat: bool) -> Conversation {
    let messages = if flat {
        extract_messages_flat(doc)
    } else {
        extract_messages(doc)
    };
    Conversation { profile: extract_profile(doc), messages }
}

fn read_message(el: scraper::ElementRef<'_>, date: Option<String>) -> Message {
    let is_in = dom::has_class(el, "message--in");
    let is_out = dom::has_class(el, "message--out");
    let kind = if is_in {
        MessageKind::In
    } else if is_out {
        MessageKind::Out
    } else {
        MessageKind::Unknown
    };
    let text = dom::first_text(el, sel!("span")).unwrap_or_default();
    Message { kind, text, date }
}
