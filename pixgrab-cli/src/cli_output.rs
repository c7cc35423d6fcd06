// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Formats errors, warnings, and the empty-result notice on stderr

use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::constants::messages;

pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal(),
        }
    }

    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render("error:", message, Tone::Error));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.render("warning:", message, Tone::Warning));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", self.render("saved:", message, Tone::Success));
    }

    /// The single message shown when a URL yields nothing
    pub fn no_images(&self) {
        eprintln!(
            "{}",
            self.render("info:", messages::NO_IMAGES_FOUND, Tone::Info)
        );
    }

    fn render(&self, label: &str, message: &str, tone: Tone) -> String {
        if !self.use_color {
            return format!("{} {}", label, message);
        }
        let label = match tone {
            Tone::Error => label.red().bold().to_string(),
            Tone::Warning => label.yellow().bold().to_string(),
            Tone::Info => label.blue().bold().to_string(),
            Tone::Success => label.green().bold().to_string(),
        };
        format!("{} {}", label, message)
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Error,
    Warning,
    Info,
    Success,
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}
