//! Human and JSON rendering for the instance commands.

pub mod json;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

/// Where `status`, `doctor`, `phases` and `config` write their human output.
pub struct OutputContext {
    pub styles: Styles,
    /// Only failed checks and errors are printed.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a terminal, and never with `--no-color` or
    /// `NO_COLOR` set.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let mut styles = Styles::default();
        if !no_color && std::env::var_os("NO_COLOR").is_none() && Term::stdout().is_term() {
            styles.colorize();
        }
        Self { styles, quiet }
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Goes to stderr, even when quiet.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Section title, e.g. the instance name.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// One `key  value` row of an instance listing.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }

    /// One guard check line; a failed check is printed even when quiet.
    pub fn check(&self, passed: bool, msg: &str) {
        if passed {
            self.success(msg);
        } else {
            println!("  {} {msg}", "✗".style(self.styles.error));
        }
    }
}
