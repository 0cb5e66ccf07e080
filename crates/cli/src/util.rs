//! Shared utilities for CLI commands

use owo_colors::OwoColorize;
use retention::apply::describe;
use retention::{Operation, OperationLog};
use std::io::IsTerminal;

/// Log filter for a `-v` count (0 = terse)
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Where operation lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Prints each operation before it is issued
pub struct ConsoleLog {
    stream: Stream,
    color: bool,
}

impl ConsoleLog {
    pub fn new(stream: Stream) -> Self {
        let color = match stream {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
        };
        Self { stream, color }
    }

    fn render(&self, op: &Operation, dry_run: bool) -> String {
        let line = describe(op, dry_run);
        if !self.color {
            return line;
        }
        match op {
            Operation::Create(_) => line.green().to_string(),
            Operation::Rename { .. } => line.cyan().to_string(),
            Operation::Destroy(_) => line.red().to_string(),
        }
    }
}

impl OperationLog for ConsoleLog {
    fn record(&mut self, op: &Operation, dry_run: bool) {
        let line = self.render(op, dry_run);
        match self.stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }
}
