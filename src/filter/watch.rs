// src/filter/watch.rs
//
// Debounced re-run scheduling. The original pages pushed mutation events;
// a snapshot file can't, so the watcher polls its mtime and feeds changes
// through the same debounce window.

use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use crate::params::{DEBOUNCE_MS, WATCH_POLL_MS};
use crate::{logd, loge};

/// Owns the single pending-run flag and its deadline. At most one run is
/// scheduled at a time; the flag resets when the run fires, so the next
/// notification can re-arm it.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window: Duration,
    due: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, due: None }
    }

    /// Report a change. Arms the timer only when idle; returns whether
    /// this notification scheduled a run.
    pub fn notify(&mut self, now: Instant) -> bool {
        if self.due.is_some() {
            return false;
        }
        self.due = Some(now + self.window);
        true
    }

    /// Poll for a due run. Returns true at most once per armed window
    /// and disarms before the caller runs, so a notification arriving
    /// during the run schedules a fresh one.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn idle(&self) -> bool {
        self.due.is_none()
    }
}

/// Re-runs a pipeline whenever the snapshot file changes, debounced.
/// Run errors are logged and swallowed so watching continues.
pub struct Watcher<F> {
    path: PathBuf,
    debounce: Debouncer,
    last_mtime: Option<SystemTime>,
    run: F,
}

impl<F> Watcher<F>
where
    F: FnMut() -> Result<(), Box<dyn Error>>,
{
    pub fn new(path: PathBuf, run: F) -> Self {
        Self {
            path,
            debounce: Debouncer::new(Duration::from_millis(DEBOUNCE_MS)),
            last_mtime: None,
            run,
        }
    }

    /// Initial run, then poll until the process is killed.
    pub fn watch(&mut self) {
        self.last_mtime = self.mtime();
        self.run_once();
        loop {
            self.tick(Instant::now());
            thread::sleep(Duration::from_millis(WATCH_POLL_MS));
        }
    }

    /// One poll step: detect a change, then fire a due run if any.
    /// Split out from the sleep loop so the schedule logic is testable.
    pub fn tick(&mut self, now: Instant) {
        let mtime = self.mtime();
        if mtime != self.last_mtime {
            self.last_mtime = mtime;
            if self.debounce.notify(now) {
                logd!("snapshot changed, run scheduled");
            }
        }
        if self.debounce.fire(now) {
            self.run_once();
        }
    }

    fn mtime(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
    }

    fn run_once(&mut self) {
        if let Err(e) = (self.run)() {
            // Keep watching; a broken run must not kill the loop.
            loge!("watch run failed: {e}");
        }
    }
}
