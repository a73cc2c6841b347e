//! User interface components.
//!
//! - [`UserInterface`] trait so commands can be tested without a terminal
//! - [`TerminalUI`] for interactive use
//! - [`NonInteractiveUI`] for pipes and CI
//! - [`MockUI`] for tests
//! - [`BatchProgress`] progress bars for batches
//!
//! # Example
//!
//! ```
//! use superpip::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet, false);
//! ui.show_header("Interpreters");
//! ui.success("Done");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::{MockProgress, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{apply_event, BatchProgress};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, SuperpipTheme};

use crate::error::Result;

/// Everything a command prints or asks goes through this trait.
pub trait UserInterface {
    /// Current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Plain line (results, listings).
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Errors are shown in every mode.
    fn error(&mut self, msg: &str);

    fn show_header(&mut self, title: &str);

    /// Aligned `key  value` row.
    fn show_row(&mut self, key: &str, value: &str, width: usize);

    /// Ask a yes/no question. `key` identifies the prompt for scripted
    /// answers.
    fn confirm(&mut self, key: &str, question: &str, default: bool) -> Result<bool>;

    /// Start a progress display for `total` units.
    fn start_progress(&mut self, message: &str, total: u64) -> Box<dyn ProgressHandle>;

    /// Whether a human can answer prompts.
    fn is_interactive(&self) -> bool;
}

/// Handle for a running progress display.
pub trait ProgressHandle {
    fn set_position(&mut self, completed: u64);

    fn set_message(&mut self, msg: &str);

    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);
}
