//! Stylesheet for status and check output.

use owo_colors::Style;
use polydock_common::Stage;

/// Plain by default; [`Styles::colorize`] switches the colors on.
#[derive(Default, Clone)]
pub struct Styles {
    /// Passed checks, completed statuses.
    pub success: Style,
    /// Failed checks, failed statuses.
    pub error: Style,
    /// Running statuses.
    pub info: Style,
    /// Keys and pending statuses.
    pub dim: Style,
    pub header: Style,
}

impl Styles {
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }

    /// Style for a status in the given stage.
    #[must_use]
    pub fn stage(&self, stage: Stage) -> Style {
        match stage {
            Stage::Pending => self.dim,
            Stage::Running => self.info,
            Stage::Completed => self.success,
            Stage::Failed => self.error,
        }
    }
}
