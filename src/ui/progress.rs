//! Batch progress bars.

use indicatif::{ProgressBar, ProgressStyle};

use crate::orchestrator::ProgressEvent;

use super::theme::SuperpipTheme;
use super::ProgressHandle;

/// An indicatif bar tracking completed units.
pub struct BatchProgress {
    bar: ProgressBar,
    theme: SuperpipTheme,
}

impl BatchProgress {
    /// Visible bar for `total` units.
    pub fn new(message: &str, total: u64, theme: SuperpipTheme) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("=> "),
        );
        bar.set_message(message.to_string());
        Self { bar, theme }
    }

    /// Bar that draws nothing (quiet modes, non-TTY).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: SuperpipTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        self.bar
            .set_style(ProgressStyle::default_bar().template("{msg}").unwrap());
        self.bar.finish_with_message(line);
    }
}

impl ProgressHandle for BatchProgress {
    fn set_position(&mut self, completed: u64) {
        self.bar.set_position(completed);
    }

    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}

/// Move a progress handle according to a batch event.
///
/// Returns the outcome or probe line worth echoing, if any.
pub fn apply_event(progress: &mut dyn ProgressHandle, event: &ProgressEvent) -> Option<String> {
    match event {
        ProgressEvent::Progress { completed, .. } => {
            progress.set_position(*completed as u64);
            None
        }
        ProgressEvent::OperationFinished(outcome) => Some(outcome.summary_line()),
        ProgressEvent::ProbeFinished(result) => {
            progress.set_message(&format!("Checked {}", result.module));
            None
        }
        ProgressEvent::Started { .. } | ProgressEvent::Completed => None,
    }
}
