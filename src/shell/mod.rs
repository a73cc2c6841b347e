//! Subprocess execution.

pub mod command;
pub mod mock;

pub use command::{execute, CommandResult, Invocation, ProcessRunner, SystemRunner};
pub use mock::{MockResponse, MockRunner};
