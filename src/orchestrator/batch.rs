//! Batch progress tracking and worker handles.

use std::sync::mpsc::Receiver;
use std::thread::JoinHandle;

use serde::Serialize;

use crate::error::{Result, SuperpipError};
use crate::probe::ProbeResult;

use super::cancel::CancellationToken;
use super::report::OperationOutcome;

/// Lifecycle of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchState {
    Idle,
    Running,
    Completed,
}

/// Events streamed while a batch runs.
///
/// A batch emits `Started`, then for each unit a `*Finished` event followed
/// by `Progress`, and finally exactly one `Completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started {
        total: usize,
    },
    Progress {
        completed: usize,
        total: usize,
        percent: u8,
    },
    OperationFinished(OperationOutcome),
    ProbeFinished(ProbeResult),
    Completed,
}

/// Counts finished units and forwards events to a sink.
///
/// The counter only moves forward, and [`Self::finish`] consumes the tracker
/// so `Completed` is emitted once.
pub struct ProgressTracker<'s> {
    state: BatchState,
    completed: usize,
    total: usize,
    sink: &'s mut dyn FnMut(ProgressEvent),
}

impl<'s> ProgressTracker<'s> {
    /// Tracker in the `Idle` state.
    pub fn new(total: usize, sink: &'s mut dyn FnMut(ProgressEvent)) -> Self {
        Self {
            state: BatchState::Idle,
            completed: 0,
            total,
            sink,
        }
    }

    /// Enter `Running` and announce the unit count.
    pub fn start(&mut self) {
        if self.state != BatchState::Idle {
            return;
        }
        self.state = BatchState::Running;
        (self.sink)(ProgressEvent::Started { total: self.total });
    }

    /// Forward a unit's event and advance.
    pub fn unit_finished(&mut self, event: ProgressEvent) {
        (self.sink)(event);
        self.advance();
    }

    /// Count one unit as done without a unit event.
    pub fn advance(&mut self) {
        if self.completed < self.total {
            self.completed += 1;
        }
        (self.sink)(ProgressEvent::Progress {
            completed: self.completed,
            total: self.total,
            percent: percent(self.completed, self.total),
        });
    }

    /// Enter `Completed`.
    ///
    /// An empty batch reports 100% here so every batch reaches its total.
    pub fn finish(mut self) -> BatchState {
        if self.total == 0 {
            (self.sink)(ProgressEvent::Progress {
                completed: 0,
                total: 0,
                percent: 100,
            });
        }
        self.state = BatchState::Completed;
        (self.sink)(ProgressEvent::Completed);
        self.state
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn completed(&self) -> usize {
        self.completed
    }
}

/// Integer percentage of `completed` over `total`; 100 for an empty batch.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed.min(total) * 100) / total) as u8
}

/// A batch running on its own worker thread.
pub struct BatchHandle<R> {
    events: Receiver<ProgressEvent>,
    worker: JoinHandle<R>,
    token: CancellationToken,
}

impl<R> BatchHandle<R> {
    pub(crate) fn new(
        events: Receiver<ProgressEvent>,
        worker: JoinHandle<R>,
        token: CancellationToken,
    ) -> Self {
        Self {
            events,
            worker,
            token,
        }
    }

    /// Event stream; ends when the worker finishes.
    pub fn events(&self) -> &Receiver<ProgressEvent> {
        &self.events
    }

    /// Token that cancels this batch.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Ask the worker to stop after the current unit.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the worker and return its report.
    pub fn wait(self) -> Result<R> {
        self.worker
            .join()
            .map_err(|_| SuperpipError::Other(anyhow::anyhow!("batch worker panicked")))
    }
}
