//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::Theme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        let bar = ProgressBar::hidden();
        Self { bar }
    }

    fn finish(&mut self, text: String) {
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(text);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let text = Theme::new().format_success(msg);
        self.finish(text);
    }

    fn finish_error(&mut self, msg: &str) {
        let text = Theme::new().format_error(msg);
        self.finish(text);
    }

    fn finish_skipped(&mut self, msg: &str) {
        let text = Theme::new().format_skipped(msg);
        self.finish(text);
    }
}

/// Spinner that logs plain finish lines, used by [`NonInteractiveUI`].
///
/// Animated spinners are noisy in log-based environments; the outcome line
/// still has to appear so CI logs show what happened.
///
/// [`NonInteractiveUI`]: super::NonInteractiveUI
pub struct LogSpinner;

impl SpinnerHandle for LogSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        println!("○ {}", msg);
    }
}
