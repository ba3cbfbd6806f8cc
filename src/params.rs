// src/params.rs
use std::path::PathBuf;

// Filter defaults (GitHub sub-issue views)
pub const DEFAULT_USERNAME: &str = "adamsc64";
pub const EXPAND_WAIT_MS: u64 = 300;
pub const MAX_EXPAND_LOOPS: usize = 50;

// Watch loop
pub const DEBOUNCE_MS: u64 = 800;
pub const WATCH_POLL_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    /// Dating-site conversation view: profile + message thread.
    Convo,
    /// Kanban board: lists of cards.
    Board,
    /// Sub-issue list: expand, then filter to one user's open work.
    Issues,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone)]
pub struct Params {
    pub page: PageKind,              // which snapshot layout to process
    pub input: Option<PathBuf>,      // saved page snapshot (required)
    pub out: Option<PathBuf>,        // output file; stdout when None
    pub format: OutputFormat,
    pub flat: bool,                  // convo: flat extractor, no date groups
    pub list_label: Option<String>,  // board: scrape a single list by title
    pub username: String,            // issues: whose work to keep
    pub watch: bool,                 // issues: re-run on snapshot changes
}

impl Params {
    pub fn new() -> Self {
        Self {
            page: PageKind::Convo,
            input: None,
            out: None,
            format: OutputFormat::Text,
            flat: false,
            list_label: None,
            username: s!(DEFAULT_USERNAME),
            watch: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
