// src/filter/page.rs
//
// Page abstraction for the sub-issue filter. The engine only ever talks
// to `PageOps`, so tests can drive it with a scripted fake; `SnapshotPage`
// is the shipped implementation, an arena of nodes built from a parsed
// snapshot.
//
// Snapshot visibility model: an element is visible when neither it nor
// any ancestor is concealed (the `hidden` attribute: lazily rendered,
// revealed by expanding) or display-suppressed (`display:none` style,
// `d-none` class, or hidden by a filter phase).

use std::mem::take;
use std::time::Duration;

use scraper::ElementRef;

use crate::core::dom::{self, Doc};
use crate::core::sanitize::normalize_ws;

pub type NodeId = usize;

pub trait PageOps {
    /// Visible collapsed-state toggles, document order.
    fn visible_collapsed(&self) -> Vec<NodeId>;
    /// Dispatch a click at the node; expansion lands on the next settle.
    fn click(&mut self, node: NodeId);
    /// Give the page time to react to dispatched clicks.
    fn settle(&mut self, wait: Duration);
    /// Completion check-mark icons, document order.
    fn completed_icons(&self) -> Vec<NodeId>;
    /// Assignee avatar images, document order.
    fn avatars(&self) -> Vec<NodeId>;
    /// Nearest enclosing list-item ancestor, if any.
    fn enclosing_item(&self, node: NodeId) -> Option<NodeId>;
    /// Does the item's serialized markup mention `needle`?
    fn item_contains(&self, item: NodeId, needle: &str) -> bool;
    /// Suppress the item (and everything under it) from display.
    fn hide(&mut self, item: NodeId);
}

struct PageNode {
    parent: Option<NodeId>,
    tag: String,
    classes: Vec<String>,
    aria_label: Option<String>,
    data_component: Option<String>,
    /// `hidden` attribute: lazily rendered region, cleared by expansion.
    concealed: bool,
    /// display:none, whether from the source style or a filter phase.
    display_none: bool,
    /// Serialized markup and flattened text, kept for list items only.
    markup: Option<String>,
    text: String,
}

pub struct SnapshotPage {
    nodes: Vec<PageNode>,
    pending_reveals: Vec<NodeId>,
}

impl SnapshotPage {
    pub fn build(doc: &Doc) -> Self {
        let mut page = Self { nodes: Vec::new(), pending_reveals: Vec::new() };
        page.add_subtree(doc.root(), None);
        page
    }

    fn add_subtree(&mut self, el: ElementRef<'_>, parent: Option<NodeId>) {
        let v = el.value();
        let is_item = v.name().eq_ignore_ascii_case("li");
        let node = PageNode {
            parent,
            tag: v.name().to_ascii_lowercase(),
            classes: v.classes().map(String::from).collect(),
            aria_label: v.attr("aria-label").map(String::from),
            data_component: v.attr("data-component").map(String::from),
            concealed: v.attr("hidden").is_some(),
            display_none: style_suppressed(el),
            markup: is_item.then(|| el.html()),
            text: if is_item { normalize_ws(&el.text().collect::<String>()) } else { s!() },
        };
        let id = self.nodes.len();
        self.nodes.push(node);
        for child in dom::element_children(el) {
            self.add_subtree(child, Some(id));
        }
    }

    fn visible(&self, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if self.nodes[n].concealed || self.nodes[n].display_none {
                return false;
            }
            cur = self.nodes[n].parent;
        }
        true
    }

    fn is_descendant(&self, node: NodeId, root: NodeId) -> bool {
        let mut cur = self.nodes[node].parent;
        while let Some(p) = cur {
            if p == root {
                return true;
            }
            cur = self.nodes[p].parent;
        }
        false
    }

    /// Is there a concealed node strictly between `root` and `node`?
    fn concealed_between(&self, node: NodeId, root: NodeId) -> bool {
        let mut cur = self.nodes[node].parent;
        while let Some(p) = cur {
            if p == root {
                return false;
            }
            if self.nodes[p].concealed {
                return true;
            }
            cur = self.nodes[p].parent;
        }
        false
    }

    fn has_class(&self, node: NodeId, name: &str) -> bool {
        self.nodes[node].classes.iter().any(|c| c == name)
    }

    /// Surviving items after filtering: visible list items with no visible
    /// list item nested inside them, flattened to one line each.
    pub fn visible_leaf_items(&self) -> Vec<String> {
        let items: Vec<NodeId> = (0..self.nodes.len())
            .filter(|&n| self.nodes[n].tag == "li" && self.visible(n))
            .collect();
        items
            .iter()
            .filter(|&&n| {
                !items.iter().any(|&m| m != n && self.is_descendant(m, n))
            })
            .map(|&n| self.nodes[n].text.clone())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl PageOps for SnapshotPage {
    fn visible_collapsed(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&n| {
                self.nodes[n].tag == "svg"
                    && self.has_class(n, "octicon-chevron-right")
                    && self.visible(n)
            })
            .collect()
    }

    fn click(&mut self, node: NodeId) {
        // The toggle flips; its item's lazy content renders on settle.
        for c in self.nodes[node].classes.iter_mut() {
            if c == "octicon-chevron-right" {
                *c = s!("octicon-chevron-down");
            }
        }
        let root = self.enclosing_item(node).unwrap_or(node);
        self.pending_reveals.push(root);
    }

    fn settle(&mut self, _wait: Duration) {
        // A static snapshot settles instantly: reveal the outermost
        // concealed regions under each clicked item. Regions nested
        // inside a still-concealed one stay put until their own toggle
        // becomes visible on a later scan.
        for root in take(&mut self.pending_reveals) {
            let targets: Vec<NodeId> = (0..self.nodes.len())
                .filter(|&n| {
                    self.nodes[n].concealed
                        && self.is_descendant(n, root)
                        && !self.concealed_between(n, root)
                })
                .collect();
            for t in targets {
                self.nodes[t].concealed = false;
            }
        }
    }

    fn completed_icons(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&n| {
                self.nodes[n].tag == "svg"
                    && self.nodes[n].aria_label.as_deref() == Some("Completed")
            })
            .collect()
    }

    fn avatars(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&n| {
                self.nodes[n].tag == "img"
                    && self.nodes[n].data_component.as_deref() == Some("Avatar")
            })
            .collect()
    }

    fn enclosing_item(&self, node: NodeId) -> Option<NodeId> {
        let mut cur = self.nodes[node].parent;
        while let Some(n) = cur {
            if self.nodes[n].tag == "li" {
                return Some(n);
            }
            cur = self.nodes[n].parent;
        }
        None
    }

    fn item_contains(&self, item: NodeId, needle: &str) -> bool {
        self.nodes[item]
            .markup
            .as_deref()
            .is_some_and(|m| m.contains(needle))
    }

    fn hide(&mut self, item: NodeId) {
        self.nodes[item].display_none = true;
    }
}

fn style_suppressed(el: ElementRef<'_>) -> bool {
    if dom::has_class(el, "d-none") {
        return true;
    }
    el.value()
        .attr("style")
        .is_some_and(|s| {
            let folded: String = s
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            folded.contains("display:none")
        })
}
