// src/core/dom.rs
//
// Thin typed layer over `scraper`. Every page module talks to a parsed
// snapshot through these helpers (plus the sel! macro) so raw selector
// strings stay confined to the module that owns them.

use scraper::{ElementRef, Html, Selector};

/// A parsed page snapshot.
pub struct Doc {
    html: Html,
}

impl Doc {
    /// Parse a full HTML document. `scraper` recovers from malformed
    /// markup the way a browser does, so this never fails.
    pub fn parse(text: &str) -> Self {
        Self { html: Html::parse_document(text) }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// First element matching `sel`, in document order.
    pub fn first(&self, sel: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(sel).next()
    }

    /// All elements matching `sel`, in document order.
    pub fn all(&self, sel: &Selector) -> Vec<ElementRef<'_>> {
        self.html.select(sel).collect()
    }
}

/// Full inner text of an element, trimmed. Nested tags contribute their
/// text in document order, like `textContent`.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first descendant matching `sel`, if any.
pub fn first_text(el: ElementRef<'_>, sel: &Selector) -> Option<String> {
    el.select(sel).next().map(text_of)
}

/// Does the element carry the given class?
pub fn has_class(el: ElementRef<'_>, name: &str) -> bool {
    el.value().classes().any(|c| c == name)
}

/// Direct element children, skipping text and comment nodes.
pub fn element_children<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_all_respect_document_order() {
        let doc = Doc::parse(r#"<ul><li id="a">x</li><li id="b">y</li></ul>"#);
        let items = doc.all(sel!("li"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value().attr("id"), Some("a"));
        assert_eq!(doc.first(sel!("li")).map(text_of).as_deref(), Some("x"));
    }

    #[test]
    fn text_of_flattens_nested_markup() {
        let doc = Doc::parse("<p> hello <b>bold</b> world </p>");
        let p = doc.first(sel!("p")).unwrap();
        assert_eq!(text_of(p), "hello bold world");
    }

    #[test]
    fn missing_selector_yields_none_not_error() {
        let doc = Doc::parse("<div></div>");
        assert!(doc.first(sel!(".profile")).is_none());
        assert!(doc.all(sel!("li")).is_empty());
    }

    #[test]
    fn element_children_skip_text_nodes() {
        let doc = Doc::parse("<div> stray <span>a</span> text <span>b</span></div>");
        let div = doc.first(sel!("div")).unwrap();
        let kids: Vec<_> = element_children(div).map(text_of).collect();
        assert_eq!(kids, vec!["a", "b"]);
    }
}
