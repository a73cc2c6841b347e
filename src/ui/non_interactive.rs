//! UI for pipes, CI and other headless runs.

use crate::error::Result;

use super::{BatchProgress, OutputMode, ProgressHandle, SuperpipTheme, UserInterface};

/// Plain-text UI that never blocks on input.
///
/// Confirmations take their default answer.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: SuperpipTheme,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: SuperpipTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn show_row(&mut self, key: &str, value: &str, width: usize) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_row(key, value, width));
        }
    }

    fn confirm(&mut self, key: &str, question: &str, default: bool) -> Result<bool> {
        tracing::debug!("Non-interactive: '{}' ({}) answered {}", question, key, default);
        Ok(default)
    }

    fn start_progress(&mut self, _message: &str, _total: u64) -> Box<dyn ProgressHandle> {
        Box::new(BatchProgress::hidden())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
