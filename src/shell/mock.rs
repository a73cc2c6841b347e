//! Scripted process runner for testing.
//!
//! `MockRunner` implements [`ProcessRunner`] without starting processes.
//! Responses are chosen by the first rule whose matcher accepts the
//! invocation; every invocation is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use superpip::shell::{Invocation, MockResponse, MockRunner, ProcessRunner};
//!
//! let runner = MockRunner::new()
//!     .when_arg("import numpy", MockResponse::fail(1, "ModuleNotFoundError"))
//!     .otherwise(MockResponse::ok(""));
//!
//! let probe = Invocation::new("/usr/bin/python3").args(["-c", "import numpy"]);
//! assert!(!runner.run(&probe).unwrap().success);
//! assert_eq!(runner.calls().len(), 1);
//! ```

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{Result, SuperpipError};

use super::command::{CommandResult, Invocation, ProcessRunner};

type Matcher = Box<dyn Fn(&Invocation) -> bool + Send + Sync>;

/// Canned response for a matched invocation.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Process exits with the given code and output.
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// Process cannot be launched.
    LaunchFailure,
}

impl MockResponse {
    /// Exit 0 with `stdout`.
    pub fn ok(stdout: &str) -> Self {
        Self::Exit {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// Exit with `code` and `stderr`.
    pub fn fail(code: i32, stderr: &str) -> Self {
        Self::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Process runner that replays scripted responses.
pub struct MockRunner {
    rules: Vec<(Matcher, MockResponse)>,
    fallback: MockResponse,
    calls: Mutex<Vec<Invocation>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Create a runner whose unmatched invocations fail to launch.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: MockResponse::LaunchFailure,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Respond with `response` when `matcher` accepts the invocation.
    pub fn when<F>(mut self, matcher: F, response: MockResponse) -> Self
    where
        F: Fn(&Invocation) -> bool + Send + Sync + 'static,
    {
        self.rules.push((Box::new(matcher), response));
        self
    }

    /// Respond when the invocation's program is `program`.
    pub fn when_program(self, program: impl AsRef<Path>, response: MockResponse) -> Self {
        let program = program.as_ref().to_path_buf();
        self.when(move |inv| inv.program == program, response)
    }

    /// Respond when any argument equals `arg`.
    pub fn when_arg(self, arg: &str, response: MockResponse) -> Self {
        let arg = arg.to_string();
        self.when(move |inv| inv.has_arg(&arg), response)
    }

    /// Response for invocations no rule matched.
    pub fn otherwise(mut self, response: MockResponse) -> Self {
        self.fallback = response;
        self
    }

    /// Every invocation seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(invocation.clone());

        let response = self
            .rules
            .iter()
            .find(|(matcher, _)| matcher(invocation))
            .map(|(_, response)| response)
            .unwrap_or(&self.fallback);

        match response {
            MockResponse::Exit {
                code: 0,
                stdout,
                stderr,
            } => Ok(CommandResult::success(
                stdout.clone(),
                stderr.clone(),
                Duration::ZERO,
            )),
            MockResponse::Exit {
                code,
                stdout,
                stderr,
            } => Ok(CommandResult::failure(
                Some(*code),
                stdout.clone(),
                stderr.clone(),
                Duration::ZERO,
            )),
            MockResponse::LaunchFailure => Err(SuperpipError::CommandFailed {
                command: invocation.display(),
                code: None,
            }),
        }
    }
}
