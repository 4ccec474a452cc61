//! External command execution
//!
//! Every tool the pipeline drives (compiler, fuzz binary, LLVM tools, the
//! host interpreter, pkg-config) is described by an [`Invocation`] and run
//! through a [`CommandRunner`]. [`SystemRunner`] spawns real processes,
//! [`RecordingRunner`] only records what would have been run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// A single external command: program, arguments and environment overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Variables added to the inherited environment
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Create an invocation with no arguments
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Override one environment variable
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Program followed by its arguments
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Failure of an external command
#[derive(Debug, Error)]
pub enum ToolError {
    /// The program could not be started
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The program exited with a non-zero status
    #[error("command '{command}' returned non-zero exit status {code}")]
    ExitStatus {
        /// Full command line
        command: String,
        /// Exit code
        code: i32,
    },

    /// The program was killed before it could exit
    #[error("command '{command}' was terminated by a signal")]
    Terminated {
        /// Full command line
        command: String,
    },
}

impl ToolError {
    /// Map an exit status to `Ok` or the matching error
    pub fn check(invocation: &Invocation, status: ExitStatus) -> Result<(), Self> {
        if status.success() {
            return Ok(());
        }
        let command = invocation.to_string();
        match status.code() {
            Some(code) => Err(Self::ExitStatus { command, code }),
            None => Err(Self::Terminated { command }),
        }
    }
}

/// Executes invocations synchronously
pub trait CommandRunner {
    /// Run to completion with stdout and stderr inherited
    fn run(&mut self, invocation: &Invocation) -> Result<(), ToolError>;

    /// Run to completion and return stdout, trimmed
    fn output(&mut self, invocation: &Invocation) -> Result<String, ToolError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, invocation: &Invocation) -> Result<(), ToolError> {
        (**self).run(invocation)
    }

    fn output(&mut self, invocation: &Invocation) -> Result<String, ToolError> {
        (**self).output(invocation)
    }
}

/// Spawns real processes inside a working directory
#[derive(Debug, Clone)]
pub struct SystemRunner {
    workdir: PathBuf,
}

impl SystemRunner {
    /// Create a runner whose children start in `workdir`
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn command(&self, invocation: &Invocation) -> Command {
        // Relative paths such as `./foo` resolve against the workdir, not
        // against the parent's cwd.
        let program = Path::new(&invocation.program);
        let mut cmd = if program.is_relative() && program.components().count() > 1 {
            Command::new(self.workdir.join(program))
        } else {
            Command::new(program)
        };
        cmd.args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .current_dir(&self.workdir);
        cmd
    }

    fn spawn_error(invocation: &Invocation, source: std::io::Error) -> ToolError {
        ToolError::Spawn {
            program: invocation.program.clone(),
            source,
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), ToolError> {
        tracing::debug!(program = %invocation.program, args = ?invocation.args, "running");
        let status = self
            .command(invocation)
            .status()
            .map_err(|e| Self::spawn_error(invocation, e))?;
        tracing::debug!(program = %invocation.program, %status, "finished");
        ToolError::check(invocation, status)
    }

    fn output(&mut self, invocation: &Invocation) -> Result<String, ToolError> {
        tracing::debug!(program = %invocation.program, args = ?invocation.args, "capturing");
        let output = self
            .command(invocation)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Self::spawn_error(invocation, e))?;
        ToolError::check(invocation, output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Records invocations instead of running them
///
/// Programs can be scripted to fail with an exit code or to print a fixed
/// stdout. Everything else succeeds with empty output.
#[derive(Debug, Default, Clone)]
pub struct RecordingRunner {
    /// Every invocation seen, in order
    pub invocations: Vec<Invocation>,
    failures: Vec<(String, i32)>,
    missing: Vec<String>,
    outputs: Vec<(String, String)>,
}

impl RecordingRunner {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` exit with `code`
    #[must_use]
    pub fn fail(mut self, program: impl Into<String>, code: i32) -> Self {
        self.failures.push((program.into(), code));
        self
    }

    /// Make `program` fail to start, as if it were not installed
    #[must_use]
    pub fn missing(mut self, program: impl Into<String>) -> Self {
        self.missing.push(program.into());
        self
    }

    /// Make `program` print `stdout`
    #[must_use]
    pub fn respond(mut self, program: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.outputs.push((program.into(), stdout.into()));
        self
    }

    /// Programs invoked, in order
    #[must_use]
    pub fn programs(&self) -> Vec<&str> {
        self.invocations.iter().map(|i| i.program.as_str()).collect()
    }

    fn record(&mut self, invocation: &Invocation) -> Result<(), ToolError> {
        self.invocations.push(invocation.clone());
        if self.missing.iter().any(|p| *p == invocation.program) {
            return Err(ToolError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        if let Some((_, code)) = self.failures.iter().find(|(p, _)| *p == invocation.program) {
            return Err(ToolError::ExitStatus {
                command: invocation.to_string(),
                code: *code,
            });
        }
        Ok(())
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), ToolError> {
        self.record(invocation)
    }

    fn output(&mut self, invocation: &Invocation) -> Result<String, ToolError> {
        self.record(invocation)?;
        Ok(self
            .outputs
            .iter()
            .find(|(p, _)| *p == invocation.program)
            .map(|(_, out)| out.clone())
            .unwrap_or_default())
    }
}
