//! Mock UI for testing.
//!
//! `MockUI` records every interaction and answers confirmations from a
//! table of scripted responses.
//!
//! # Example
//!
//! ```
//! use superpip::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm_response("install_missing", true);
//!
//! assert!(ui.confirm("install_missing", "Install 2 packages?", false).unwrap());
//! ui.success("Installed");
//! assert!(ui.has_success("Installed"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

use super::{OutputMode, ProgressHandle, UserInterface};

/// Recorded progress activity, shared between a `MockUI` and its handles.
#[derive(Debug, Default, Clone)]
pub struct ProgressLog {
    pub positions: Vec<u64>,
    pub finished: Vec<(bool, String)>,
}

/// Progress handle that appends to a shared [`ProgressLog`].
pub struct MockProgress {
    log: Rc<RefCell<ProgressLog>>,
}

impl ProgressHandle for MockProgress {
    fn set_position(&mut self, completed: u64) {
        self.log.borrow_mut().positions.push(completed);
    }

    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.log.borrow_mut().finished.push((true, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.log.borrow_mut().finished.push((false, msg.to_string()));
    }
}

/// UI that captures output for assertions.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    rows: Vec<(String, String)>,
    progress_started: Vec<(String, u64)>,
    progress: Rc<RefCell<ProgressLog>>,
    confirm_responses: HashMap<String, bool>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Answer for the confirmation with `key`. Unscripted keys take the
    /// prompt's default.
    pub fn set_confirm_response(&mut self, key: &str, answer: bool) {
        self.confirm_responses.insert(key.to_string(), answer);
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Confirmation keys in the order they were asked.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Progress displays started, as `(message, total)`.
    pub fn progress_started(&self) -> &[(String, u64)] {
        &self.progress_started
    }

    /// Snapshot of every progress update.
    pub fn progress_log(&self) -> ProgressLog {
        self.progress.borrow().clone()
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

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

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_row(&mut self, key: &str, value: &str, _width: usize) {
        self.rows.push((key.to_string(), value.to_string()));
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        self.prompts_shown.push(key.to_string());
        Ok(self.confirm_responses.get(key).copied().unwrap_or(default))
    }

    fn start_progress(&mut self, message: &str, total: u64) -> Box<dyn ProgressHandle> {
        self.progress_started.push((message.to_string(), total));
        Box::new(MockProgress {
            log: self.progress.clone(),
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.message("plain");
        ui.success("good");
        ui.warning("hmm");
        ui.error("bad");
        ui.show_header("Title");
        ui.show_row("3.11", "/usr/bin/python3", 10);

        assert!(ui.has_message("plain"));
        assert!(ui.has_success("good"));
        assert!(ui.has_warning("hmm"));
        assert!(ui.has_error("bad"));
        assert_eq!(ui.headers(), &["Title".to_string()]);
        assert_eq!(ui.rows()[0].1, "/usr/bin/python3");
    }

    #[test]
    fn confirm_uses_scripted_answer_then_default() {
        let mut ui = MockUI::new();
        ui.set_confirm_response("install_missing", false);

        assert!(!ui.confirm("install_missing", "Install?", true).unwrap());
        assert!(ui.confirm("other", "Proceed?", true).unwrap());
        assert_eq!(ui.prompts_shown(), &["install_missing".to_string(), "other".to_string()]);
    }

    #[test]
    fn progress_handles_share_log() {
        let mut ui = MockUI::new();
        {
            let mut progress = ui.start_progress("Installing", 2);
            progress.set_position(1);
            progress.set_position(2);
            progress.finish_success("done");
        }

        let log = ui.progress_log();
        assert_eq!(log.positions, vec![1, 2]);
        assert_eq!(log.finished, vec![(true, "done".to_string())]);
        assert_eq!(ui.progress_started(), &[("Installing".to_string(), 2)]);
    }
}
