// src/filter/engine.rs
//
// Sub-issue filter: expand everything, then hide completed items and
// items that don't belong to the configured user. Phases run strictly in
// order within one pass; re-runs are the watcher's business.

use std::time::Duration;

use crate::filter::page::PageOps;
use crate::logd;
use crate::params::{DEFAULT_USERNAME, EXPAND_WAIT_MS, MAX_EXPAND_LOOPS};

#[derive(Clone, Debug)]
pub struct FilterOptions {
    /// Items whose markup doesn't mention this user get hidden.
    pub username: String,
    /// Settle time granted to the page after each round of clicks.
    pub expand_wait: Duration,
    /// Expansion is a convergence loop; cap it rather than trust the page.
    pub max_expand_loops: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            username: s!(DEFAULT_USERNAME),
            expand_wait: Duration::from_millis(EXPAND_WAIT_MS),
            max_expand_loops: MAX_EXPAND_LOOPS,
        }
    }
}

/// What one pass did. Returned for logging and tests; a pass itself
/// cannot fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub scans: usize,
    pub clicks: usize,
    pub expand_capped: bool,
    pub hidden_completed: usize,
    pub hidden_other: usize,
}

/// One full pass: expand, hide completed, hide non-matching.
pub fn run(page: &mut dyn PageOps, opts: &FilterOptions) -> RunStats {
    let mut stats = RunStats::default();
    expand_all(page, opts, &mut stats);
    stats.hidden_completed = hide_completed(page);
    stats.hidden_other = hide_not_matching(page, &opts.username);
    logd!(
        "filter pass: {} scans, {} clicks (capped: {}), hid {} completed / {} other",
        stats.scans, stats.clicks, stats.expand_capped,
        stats.hidden_completed, stats.hidden_other
    );
    stats
}

/// Click every visible collapsed toggle, let the page settle, rescan.
/// Converges when a scan finds nothing; otherwise stops at the cap.
/// With nothing collapsed up front this is one scan, no clicks, no wait.
fn expand_all(page: &mut dyn PageOps, opts: &FilterOptions, stats: &mut RunStats) {
    for _ in 0..opts.max_expand_loops {
        stats.scans += 1;
        let toggles = page.visible_collapsed();
        if toggles.is_empty() {
            return;
        }
        stats.clicks += toggles.len();
        for toggle in toggles {
            page.click(toggle);
        }
        page.settle(opts.expand_wait);
    }
    stats.expand_capped = true;
}

/// Hide the enclosing item of every completion icon. Icons without an
/// enclosing item are skipped.
fn hide_completed(page: &mut dyn PageOps) -> usize {
    let mut hidden = 0;
    for icon in page.completed_icons() {
        if let Some(item) = page.enclosing_item(icon) {
            page.hide(item);
            hidden += 1;
        }
    }
    hidden
}

/// Hide every avatar's enclosing item unless it mentions `username`.
/// Avatars without an enclosing item are skipped.
fn hide_not_matching(page: &mut dyn PageOps, username: &str) -> usize {
    let mut hidden = 0;
    for avatar in page.avatars() {
        let Some(item) = page.enclosing_item(avatar) else { continue };
        if !page.item_contains(item, username) {
            page.hide(item);
            hidden += 1;
        }
    }
    hidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::page::NodeId;

    /// Scripted page: a flat set of items, each optionally completed,
    /// optionally assigned, plus a count of collapse "layers" that each
    /// need one click+settle round to peel.
    struct FakePage {
        collapse_layers: usize,
        completed: Vec<bool>,
        owner: Vec<Option<&'static str>>,
        hidden: Vec<bool>,
        settles: usize,
        clicks: usize,
    }

    impl FakePage {
        fn new(layers: usize, items: &[(bool, Option<&'static str>)]) -> Self {
            Self {
                collapse_layers: layers,
                completed: items.iter().map(|s| s.0).collect(),
                owner: items.iter().map(|s| s.1).collect(),
                hidden: vec![false; items.len()],
                settles: 0,
                clicks: 0,
            }
        }
    }

    impl PageOps for FakePage {
        fn visible_collapsed(&self) -> Vec<NodeId> {
            if self.collapse_layers > 0 { vec![0] } else { Vec::new() }
        }
        fn click(&mut self, _node: NodeId) {
            self.clicks += 1;
        }
        fn settle(&mut self, _wait: Duration) {
            self.settles += 1;
            self.collapse_layers -= 1;
        }
        fn completed_icons(&self) -> Vec<NodeId> {
            (0..self.completed.len()).filter(|&i| self.completed[i]).collect()
        }
        fn avatars(&self) -> Vec<NodeId> {
            (0..self.owner.len()).filter(|&i| self.owner[i].is_some()).collect()
        }
        fn enclosing_item(&self, node: NodeId) -> Option<NodeId> {
            Some(node)
        }
        fn item_contains(&self, item: NodeId, needle: &str) -> bool {
            self.owner[item] == Some(needle)
        }
        fn hide(&mut self, item: NodeId) {
            self.hidden[item] = true;
        }
    }

    fn opts(user: &str) -> FilterOptions {
        FilterOptions { username: s!(user), ..FilterOptions::default() }
    }

    #[test]
    fn nothing_collapsed_means_one_scan_no_clicks_no_wait() {
        let mut page = FakePage::new(0, &[]);
        let stats = run(&mut page, &opts("me"));
        assert_eq!(stats.scans, 1);
        assert_eq!(stats.clicks, 0);
        assert_eq!(page.settles, 0);
        assert!(!stats.expand_capped);
    }

    #[test]
    fn expansion_peels_one_layer_per_round_until_converged() {
        let mut page = FakePage::new(3, &[]);
        let stats = run(&mut page, &opts("me"));
        assert_eq!(stats.scans, 4); // three clicking rounds + the empty one
        assert_eq!(page.settles, 3);
        assert_eq!(page.clicks, 3);
        assert!(!stats.expand_capped);
    }

    #[test]
    fn expansion_stops_at_the_cap_and_says_so() {
        let mut page = FakePage::new(100, &[]);
        let stats = run(&mut page, &opts("me"));
        assert_eq!(stats.scans, MAX_EXPAND_LOOPS);
        assert!(stats.expand_capped);
    }

    #[test]
    fn completed_and_foreign_items_are_hidden_mine_survive() {
        let mut page = FakePage::new(
            0,
            &[
                (true, Some("me")),   // completed: hidden even though mine
                (false, Some("me")),  // mine, open: survives
                (false, Some("you")), // someone else's: hidden
                (false, None),        // no avatar: left alone
            ],
        );
        let stats = run(&mut page, &opts("me"));
        assert_eq!(stats.hidden_completed, 1);
        assert_eq!(stats.hidden_other, 1);
        assert_eq!(page.hidden, vec![true, false, true, false]);
    }
}
