// src/cli/progress.rs
use std::io::{self, Write};

use crate::progress::Progress;

/// Progress lines on stderr, one per item, so stdout stays clean for tables.
pub struct ConsoleProgress {
    what: &'static str,
    done: usize,
    failed: usize,
    total: usize,
}

impl ConsoleProgress {
    pub fn new(what: &'static str) -> Self {
        Self { what, done: 0, failed: 0, total: 0 }
    }

    fn line(&self, msg: &str) {
        let _ = writeln!(io::stderr().lock(), "{msg}");
    }

    fn counter(&self) -> String {
        format!("[{}/{}]", self.done + self.failed, self.total)
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        if total > 0 {
            self.line(&format!("{} {} ...", self.what, total));
        }
    }
    fn log(&mut self, msg: &str) {
        self.line(msg);
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        self.line(&format!("{} {label}", self.counter()));
    }
    fn item_failed(&mut self, label: &str, reason: &str) {
        self.failed += 1;
        self.line(&format!("{} {label}: {reason}", self.counter()));
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.line(&format!("{}: nothing to do", self.what)); // never began
        } else {
            self.line(&format!("{}: {} ok, {} failed", self.what, self.done, self.failed));
        }
    }
}
