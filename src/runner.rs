// src/runner.rs
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::core::dom::Doc;
use crate::filter::engine::{self, FilterOptions};
use crate::filter::page::SnapshotPage;
use crate::filter::watch::Watcher;
use crate::logf;
use crate::params::{OutputFormat, PageKind, Params};
use crate::report;
use crate::scrape::{board, convo};

/// What a run produced. Empty when output went to stdout.
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
}

/// Top-level runner: dispatch on page kind and run.
pub fn run(params: &Params) -> Result<RunSummary, Box<dyn Error>> {
    match params.page {
        PageKind::Convo => run_convo(params),
        PageKind::Board => run_board(params),
        PageKind::Issues => run_issues(params),
    }
}

fn load_doc(params: &Params) -> Result<Doc, Box<dyn Error>> {
    let path = params.input.as_deref().ok_or("No input snapshot given")?;
    let text = fs::read_to_string(path)?;
    logf!("parsed snapshot {} ({} bytes)", path.display(), text.len());
    Ok(Doc::parse(&text))
}

/// Print to stdout, or write to the -o path when given.
fn emit(params: &Params, output: &str) -> Result<RunSummary, Box<dyn Error>> {
    match &params.out {
        None => {
            println!("{output}");
            Ok(RunSummary { files_written: Vec::new() })
        }
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, format!("{output}\n"))?;
            Ok(RunSummary { files_written: vec![path.clone()] })
        }
    }
}

/* ---------------- Conversation ---------------- */

fn run_convo(params: &Params) -> Result<RunSummary, Box<dyn Error>> {
    let doc = load_doc(params)?;
    let convo = convo::extract(&doc, params.flat);
    let output = match params.format {
        OutputFormat::Text => report::to_human_readable(&convo),
        OutputFormat::Json => report::to_json(&convo),
    };
    emit(params, &output)
}

/* ---------------- Board ---------------- */

fn run_board(params: &Params) -> Result<RunSummary, Box<dyn Error>> {
    let doc = load_doc(params)?;
    let output = match &params.list_label {
        Some(label) => {
            let cards = board::cards_in_list(&doc, label);
            match params.format {
                OutputFormat::Text => report::lines(&cards),
                OutputFormat::Json => report::to_json(&cards),
            }
        }
        None => {
            let index = board::index_board(&doc);
            match params.format {
                OutputFormat::Text => render_board_text(&index),
                OutputFormat::Json => report::to_json(&index),
            }
        }
    };
    emit(params, &output)
}

fn render_board_text(index: &board::BoardIndex) -> String {
    let mut lines = Vec::new();
    for (title, cards) in &index.lists {
        lines.push(format!("{title}:"));
        for card in cards {
            lines.push(format!("  - {card}"));
        }
    }
    lines.join("\n")
}

/* ---------------- Issues ---------------- */

fn run_issues(params: &Params) -> Result<RunSummary, Box<dyn Error>> {
    let opts = FilterOptions { username: params.username.clone(), ..FilterOptions::default() };

    if params.watch {
        let inner = params.clone();
        let opts = opts.clone();
        let path = params.input.clone().ok_or("No input snapshot given")?;
        let mut watcher = Watcher::new(path, move || {
            filter_pass(&inner, &opts).map(|_| ())
        });
        watcher.watch();
        // watch() only returns if the loop is broken out of; treat as done.
        return Ok(RunSummary { files_written: Vec::new() });
    }

    filter_pass(params, &opts)
}

/// One read-parse-filter-report pass over the snapshot.
fn filter_pass(params: &Params, opts: &FilterOptions) -> Result<RunSummary, Box<dyn Error>> {
    let doc = load_doc(params)?;
    let mut page = SnapshotPage::build(&doc);
    let stats = engine::run(&mut page, opts);
    if stats.expand_capped {
        eprintln!("Warning: expansion hit the loop cap; some items may remain collapsed");
    }
    let remaining = page.visible_leaf_items();
    let output = match params.format {
        OutputFormat::Text => report::lines(&remaining),
        OutputFormat::Json => report::to_json(&remaining),
    };
    emit(params, &output)
}
