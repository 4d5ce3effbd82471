//! Terminal output for CLI handlers.
//!
//! Every line goes through [`emit`] so `--json` and `--quiet` behave the
//! same across commands. In JSON mode a line becomes one
//! `{"type": ..., "payload": ...}` object instead of styled text.

use std::fmt::Display;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Output flags taken from the global CLI arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// One JSON object per line instead of styled text.
    pub json: bool,
    /// Only warnings, errors and command results.
    pub quiet: bool,
    /// Count of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT: RwLock<OutputConfig> = RwLock::new(OutputConfig {
    json: false,
    quiet: false,
    verbose: 0,
});

fn current() -> OutputConfig {
    *OUTPUT.read()
}

/// Apply the global CLI flags. Call once, before any handler prints.
pub fn configure(config: OutputConfig) {
    *OUTPUT.write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

/// Number of `-v` flags given.
#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// One unit of CLI output.
enum Line<'a> {
    Header { version: &'a str },
    Field { label: &'a str, value: String },
    Success(&'a str),
    Warning(&'a str),
    Error(&'a str),
    Section(&'a str),
    Event {
        timestamp: &'a str,
        label: &'a str,
        message: &'a str,
    },
    Note(&'a str),
    Hint(&'a str),
    Block(&'a str),
}

impl Line<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Header { .. } => "header",
            Self::Field { .. } => "field",
            Self::Success(_) => "success",
            Self::Warning(_) => "warning",
            Self::Error(_) => "error",
            Self::Section(_) => "section",
            Self::Event { .. } => "event",
            Self::Note(_) => "note",
            Self::Hint(_) => "hint",
            Self::Block(_) => "lines",
        }
    }

    fn payload(&self) -> Value {
        match self {
            Self::Header { version } => json!({ "app": "stockscanner", "version": version }),
            Self::Field { label, value } => json!({ "label": label, "value": value }),
            Self::Success(message)
            | Self::Warning(message)
            | Self::Error(message)
            | Self::Note(message)
            | Self::Hint(message) => json!({ "message": message }),
            Self::Section(title) => json!({ "title": title }),
            Self::Event {
                timestamp,
                label,
                message,
            } => json!({ "timestamp": timestamp, "label": label, "message": message }),
            Self::Block(content) => json!({ "content": content }),
        }
    }

    /// Warnings and errors survive `--quiet`.
    fn survives_quiet(&self) -> bool {
        matches!(self, Self::Warning(_) | Self::Error(_))
    }

    fn print(&self) {
        match self {
            Self::Header { version } => {
                println!("{} {}", "stockscanner".bold(), version.dimmed());
                println!();
            }
            Self::Field { label, value } => println!("  {:<12} {}", label.dimmed(), value),
            Self::Success(message) => println!("  {} {}", "✓".green(), message),
            Self::Warning(message) => println!("  {} {}", "⚠".yellow(), message),
            Self::Error(message) => eprintln!("  {} {}", "×".red(), message),
            Self::Section(title) => {
                println!();
                println!("{}", title.bold());
            }
            Self::Event {
                timestamp,
                label,
                message,
            } => println!("  {} {} {}", timestamp.dimmed(), label.cyan(), message),
            Self::Note(message) => println!("  {}", message.dimmed()),
            Self::Hint(message) => {
                println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
            }
            Self::Block(content) => {
                for line in content.lines() {
                    println!("  {line}");
                }
            }
        }
    }
}

fn emit(line: Line<'_>) {
    let config = current();
    if config.json {
        let value = json!({ "type": line.kind(), "payload": line.payload() });
        // Errors stay on stderr so stdout remains parseable.
        if matches!(line, Line::Error(_)) {
            eprintln!("{value}");
        } else {
            println!("{value}");
        }
        return;
    }
    if config.quiet && !line.survives_quiet() {
        return;
    }
    line.print();
}

/// Application name and version.
pub fn header(version: &str) {
    emit(Line::Header { version });
}

/// A labeled value, e.g. `Days         30`.
pub fn field(label: &str, value: impl Display) {
    emit(Line::Field {
        label,
        value: value.to_string(),
    });
}

pub fn success(message: &str) {
    emit(Line::Success(message));
}

pub fn warning(message: &str) {
    emit(Line::Warning(message));
}

/// Printed to stderr.
pub fn error(message: &str) {
    emit(Line::Error(message));
}

pub fn section(title: &str) {
    emit(Line::Section(title));
}

/// A timestamped line in the `watch` stream.
pub fn event(timestamp: &str, label: &str, message: &str) {
    emit(Line::Event {
        timestamp,
        label,
        message,
    });
}

pub fn note(message: &str) {
    emit(Line::Note(message));
}

pub fn hint(message: &str) {
    emit(Line::Hint(message));
}

/// Multi-line content such as a rendered table, indented.
pub fn lines(content: &str) {
    emit(Line::Block(content));
}

/// Print a command's JSON result as-is.
pub fn json_output(value: Value) {
    println!("{value}");
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a spinner for a request in flight. Hidden in JSON and quiet modes.
pub fn spinner(message: &str) -> ProgressBar {
    let config = current();
    let pb = if config.json || config.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(SPINNER_FRAMES)
                .template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(message.to_string());
    pb
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    finish_spinner(pb, Line::Success(message), "✓".green().to_string());
}

pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    finish_spinner(pb, Line::Error(message), "×".red().to_string());
}

fn finish_spinner(pb: &ProgressBar, line: Line<'_>, mark: String) {
    let config = current();
    if config.json || (config.quiet && !line.survives_quiet()) {
        pb.finish_and_clear();
        if config.json {
            emit(line);
        }
        return;
    }
    let message = match line {
        Line::Success(message) | Line::Error(message) => message,
        _ => "",
    };
    pb.finish_with_message(format!("{mark} {message}"));
}

fn styled(value: impl Display, style: fn(&String) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        style(&value)
    }
}

/// Green, for growth and healthy checks.
pub fn positive(value: impl Display) -> String {
    styled(value, |v| v.green().to_string())
}

pub fn highlight(value: impl Display) -> String {
    styled(value, |v| v.cyan().to_string())
}

pub fn muted(value: impl Display) -> String {
    styled(value, |v| v.dimmed().to_string())
}
