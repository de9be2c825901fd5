//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined confirmation answers.
//!
//! # Example
//!
//! ```
//! use cronsmith::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm_response("install_packages", true);
//!
//! // Use ui in code under test...
//! ui.message("Starting provisioning");
//! ui.success("Done");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Starting provisioning"));
//! assert!(ui.successes().contains(&"Done".to_string()));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured confirm answers.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    progress: Vec<(usize, usize)>,
    spinners: Vec<String>,
    spinner_finishes: Rc<RefCell<Vec<String>>>,
    confirm_responses: HashMap<String, bool>,
    confirms_shown: Vec<String>,
}

/// Spinner handle that records its finish messages in the owning [`MockUI`].
struct RecordingSpinner {
    finishes: Rc<RefCell<Vec<String>>>,
}

impl SpinnerHandle for RecordingSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.finishes.borrow_mut().push(msg.to_string());
    }

    fn finish_error(&mut self, msg: &str) {
        self.finishes.borrow_mut().push(msg.to_string());
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finishes.borrow_mut().push(msg.to_string());
    }
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Set the answer for a confirm key.
    ///
    /// When `confirm()` is called with this key, it returns the configured
    /// answer instead of the default.
    pub fn set_confirm_response(&mut self, key: &str, answer: bool) {
        self.confirm_responses.insert(key.to_string(), answer);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured progress updates.
    pub fn progress(&self) -> &[(usize, usize)] {
        &self.progress
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all spinner finish messages (success, error, and skipped alike).
    pub fn spinner_finishes(&self) -> Vec<String> {
        self.spinner_finishes.borrow().clone()
    }

    /// Check if a spinner finished with a message containing `msg`.
    pub fn has_spinner_finish(&self, msg: &str) -> bool {
        self.spinner_finishes.borrow().iter().any(|m| m.contains(msg))
    }

    /// Get all confirms that were shown (by key).
    pub fn confirms_shown(&self) -> &[String] {
        &self.confirms_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        self.confirms_shown.push(key.to_string());
        Ok(self.confirm_responses.get(key).copied().unwrap_or(default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(RecordingSpinner {
            finishes: Rc::clone(&self.spinner_finishes),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        self.progress.push((current, total));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_all_message_kinds() {
        let mut ui = MockUI::new();
        ui.message("info");
        ui.success("ok");
        ui.warning("careful");
        ui.error("broken");
        ui.show_header("title");
        ui.show_progress(2, 5);

        assert!(ui.has_message("info"));
        assert!(ui.has_success("ok"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert_eq!(ui.headers(), &["title".to_string()]);
        assert_eq!(ui.progress(), &[(2, 5)]);
    }

    #[test]
    fn confirm_uses_configured_answer() {
        let mut ui = MockUI::new();
        ui.set_confirm_response("proceed", false);
        assert!(!ui.confirm("proceed", "Proceed?", true).unwrap());
        assert!(ui.confirms_shown().contains(&"proceed".to_string()));
    }

    #[test]
    fn confirm_falls_back_to_default() {
        let mut ui = MockUI::new();
        assert!(ui.confirm("unconfigured", "Proceed?", true).unwrap());
    }

    #[test]
    fn spinner_messages_and_finishes_recorded() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner("Installing packages");
        spinner.finish_success("done");
        assert_eq!(ui.spinners(), &["Installing packages".to_string()]);
        assert!(ui.has_spinner_finish("done"));
    }
}
