//! Subprocess execution.
//!
//! Every external process superpip starts (version queries, import probes,
//! pip) goes through a [`ProcessRunner`]. Commands are never routed through
//! a shell: the interpreter path and its arguments are passed to the OS
//! directly.

use crate::error::{Result, SuperpipError};
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Interval between exit checks while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A program plus arguments to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to launch.
    pub program: PathBuf,

    /// Arguments, passed verbatim.
    pub args: Vec<String>,

    /// Kill the process if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl Invocation {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Arm a timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether the argument list contains `needle`.
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }

    /// Human-readable command line, for logs and diagnostics.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Result of running a process to completion.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the process exited with code 0.
    pub success: bool,

    /// Whether the process was killed because its timeout elapsed.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }

    /// Stdout followed by stderr, trimmed.
    pub fn combined_output(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, true) => String::new(),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (false, false) => format!("{}\n{}", stdout, stderr),
        }
    }
}

/// Launches processes and waits for them.
///
/// Implementations must be shareable with the batch worker thread.
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation` to completion.
    ///
    /// Returns `Err` only when the process could not be launched or
    /// waited on. A non-zero exit is an `Ok` result with `success == false`.
    fn run(&self, invocation: &Invocation) -> Result<CommandResult>;
}

/// Runs real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        execute(invocation)
    }
}

/// Execute a process with captured output.
pub fn execute(invocation: &Invocation) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        tracing::debug!("Failed to launch {}: {}", invocation.display(), e);
        launch_error(invocation)
    })?;

    // Drain both pipes on their own threads so a chatty child never blocks
    // on a full pipe while we wait for it. The readers are never joined: a
    // grandchild can keep the pipes open after the child is gone.
    let (tx, rx) = mpsc::channel();
    if let Some(pipe) = child.stdout.take() {
        spawn_reader(pipe, tx.clone(), OutputLine::Stdout);
    }
    if let Some(pipe) = child.stderr.take() {
        spawn_reader(pipe, tx.clone(), OutputLine::Stderr);
    }
    drop(tx);

    let (status, timed_out) = match invocation.timeout {
        Some(limit) => wait_with_timeout(&mut child, limit, invocation)?,
        None => (
            Some(child.wait().map_err(|_| launch_error(invocation))?),
            false,
        ),
    };

    let mut captured = CapturedOutput::default();
    if timed_out {
        captured.drain_ready(&rx);
    } else {
        captured.collect(&rx, invocation.timeout.map(|limit| start + limit));
    }
    let CapturedOutput { stdout, mut stderr } = captured;
    let duration = start.elapsed();

    if timed_out {
        if let Some(limit) = invocation.timeout {
            stderr.push_str(&format!("timed out after {}s", limit.as_secs()));
        }
        let mut result = CommandResult::failure(None, stdout, stderr, duration);
        result.timed_out = true;
        return Ok(result);
    }

    match status {
        Some(status) if status.success() => Ok(CommandResult::success(stdout, stderr, duration)),
        Some(status) => Ok(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        )),
        None => Ok(CommandResult::failure(None, stdout, stderr, duration)),
    }
}

fn wait_with_timeout(
    child: &mut Child,
    limit: Duration,
    invocation: &Invocation,
) -> Result<(Option<std::process::ExitStatus>, bool)> {
    let deadline = Instant::now() + limit;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((Some(status), false)),
            Ok(None) if Instant::now() >= deadline => {
                tracing::warn!(
                    "{} exceeded {}s, killing it",
                    invocation.display(),
                    limit.as_secs()
                );
                let _ = child.kill();
                let _ = child.wait();
                return Ok((None, true));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(_) => return Err(launch_error(invocation)),
        }
    }
}

/// One line read from a child's pipe.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

fn spawn_reader<R: Read + Send + 'static>(
    pipe: R,
    tx: Sender<OutputLine>,
    wrap: fn(String) -> OutputLine,
) {
    thread::spawn(move || {
        let reader = BufReader::new(pipe);
        for line in reader.lines().map_while(std::result::Result::ok) {
            if tx.send(wrap(line)).is_err() {
                break;
            }
        }
    });
}

#[derive(Default)]
struct CapturedOutput {
    stdout: String,
    stderr: String,
}

impl CapturedOutput {
    fn push(&mut self, line: OutputLine) {
        let (buf, text) = match line {
            OutputLine::Stdout(text) => (&mut self.stdout, text),
            OutputLine::Stderr(text) => (&mut self.stderr, text),
        };
        buf.push_str(&text);
        buf.push('\n');
    }

    /// Receive until both pipes close, or until `deadline` passes.
    fn collect(&mut self, rx: &Receiver<OutputLine>, deadline: Option<Instant>) {
        loop {
            let line = match deadline {
                Some(deadline) => {
                    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                        Ok(line) => line,
                        Err(RecvTimeoutError::Timeout) => {
                            tracing::debug!("Output pipes still open at the deadline");
                            return;
                        }
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
                None => match rx.recv() {
                    Ok(line) => line,
                    Err(_) => return,
                },
            };
            self.push(line);
        }
    }

    /// Keep whatever was already read, without waiting.
    fn drain_ready(&mut self, rx: &Receiver<OutputLine>) {
        for line in rx.try_iter() {
            self.push(line);
        }
    }
}

fn launch_error(invocation: &Invocation) -> SuperpipError {
    SuperpipError::CommandFailed {
        command: invocation.display(),
        code: None,
    }
}
