// src/scrape/board.rs
//
// Kanban board scraper: lists of cards, addressed by list title.
// Titles are matched case- and whitespace-insensitively; card and header
// text is always reported as scraped.

use std::collections::HashSet;

use scraper::ElementRef;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::dom::{self, Doc};
use crate::logw;
use crate::core::sanitize::fold_key;

/// Ordered list-title → card-titles mapping. Keys are unique: duplicate
/// headers get " (2)", " (3)", ... suffixes in first-seen order.
/// Serializes as a JSON object preserving insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardIndex {
    pub lists: Vec<(String, Vec<String>)>,
}

impl Serialize for BoardIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lists.len()))?;
        for (title, cards) in &self.lists {
            map.serialize_entry(title, cards)?;
        }
        map.end()
    }
}

/// Visible header text of a list container, trimmed, un-normalized.
fn header_text(list: ElementRef<'_>) -> String {
    dom::first_text(list, sel!(r#"h2[data-testid="list-name"]"#)).unwrap_or_default()
}

/// First list container (document order) whose header matches `label`.
pub fn find_list_by_label<'a>(doc: &'a Doc, label: &str) -> Option<ElementRef<'a>> {
    let target = fold_key(label);
    doc.all(sel!(r#"li[data-testid="list-wrapper"]"#))
        .into_iter()
        .find(|li| {
            li.select(sel!(r#"h2[data-testid="list-name"]"#))
                .any(|h| fold_key(&dom::text_of(h)) == target)
        })
}

/// Ordered card titles inside one list container. A list without a card
/// sequence yields an empty vec.
pub fn card_names(list: ElementRef<'_>) -> Vec<String> {
    let Some(cards) = list.select(sel!(r#"ol[data-testid="list-cards"]"#)).next() else {
        return Vec::new();
    };
    cards
        .select(sel!(r#"a[data-testid="card-name"]"#))
        .map(dom::text_of)
        .collect()
}

/// Cards in the list titled `label`. Not-found and found-but-empty both
/// return an empty vec; the only distinction is the diagnostic.
pub fn cards_in_list(doc: &Doc, label: &str) -> Vec<String> {
    let Some(list) = find_list_by_label(doc, label) else {
        eprintln!("Warning: list not found for label: {label}");
        logw!("list not found for label: {label}");
        return Vec::new();
    };
    let names = card_names(list);
    if names.is_empty() {
        eprintln!("Warning: no cards found under list: {label}");
        logw!("no cards found under list: {label}");
    }
    names
}

/// Scan every list on the board, skipping unnamed ones, and build the
/// title → cards index with unique keys.
pub fn index_board(doc: &Doc) -> BoardIndex {
    let mut index = BoardIndex::default();
    let mut taken: HashSet<String> = HashSet::new();

    for li in doc.all(sel!(r#"li[data-testid="list-wrapper"]"#)) {
        let header = header_text(li);
        if header.is_empty() {
            continue;
        }
        let key = unique_key(&taken, &header);
        taken.insert(key.clone());
        index.lists.push((key, card_names(li)));
    }
    index
}

/// First occurrence keeps the bare title; later duplicates scan forward
/// from " (2)" until a free suffix is found. A pre-existing literal
/// "X (2)" header therefore pushes a second "X" to "X (3)".
fn unique_key(taken: &HashSet<String>, key: &str) -> String {
    if !taken.contains(key) {
        return s!(key);
    }
    let mut i = 2;
    loop {
        let candidate = format!("{key} ({i})");
        if !taken.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}
