//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::prompts::confirm;
use super::{
    should_use_colors, BatchProgress, NonInteractiveUI, OutputMode, ProgressHandle,
    SuperpipTheme, UserInterface,
};

/// Terminal UI with colors, progress bars and prompts.
pub struct TerminalUI {
    term: Term,
    theme: SuperpipTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode, no_color: bool) -> Self {
        Self {
            term: Term::stdout(),
            theme: SuperpipTheme::for_colors(!no_color && should_use_colors()),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_row(&mut self, key: &str, value: &str, width: usize) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_row(key, value, width)).ok();
        }
    }

    fn confirm(&mut self, _key: &str, question: &str, default: bool) -> Result<bool> {
        confirm(question, default, &self.term)
    }

    fn start_progress(&mut self, message: &str, total: u64) -> Box<dyn ProgressHandle> {
        if self.mode.shows_progress() {
            Box::new(BatchProgress::new(message, total, self.theme.clone()))
        } else {
            Box::new(BatchProgress::hidden())
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Pick the UI for this run.
pub fn create_ui(interactive: bool, mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode, no_color))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet, true);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_non_interactive() {
        let ui = create_ui(false, OutputMode::Normal, false);
        assert!(!ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Silent, true);
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }
}
