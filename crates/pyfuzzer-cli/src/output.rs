//! Command echo and error rendering

use console::{style, Term};
use pyfuzzer::{CommandRunner, Invocation, ToolError};
use std::error::Error;

/// Prints command lines before they run
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Reporter {
    /// Create a new reporter writing to stdout
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Text echoed for `invocation`
    #[must_use]
    pub fn format_command(&self, invocation: &Invocation) -> String {
        if self.use_color {
            style(invocation).bold().to_string()
        } else {
            invocation.to_string()
        }
    }

    /// Echo a command line
    pub fn command(&self, invocation: &Invocation) {
        if self.quiet {
            return;
        }

        let _ = self.term.write_line(&self.format_command(invocation));
    }
}

/// Echoes streamed invocations through a [`Reporter`] before delegating
///
/// Captured queries (`output`) are configuration lookups, not build steps,
/// and stay silent.
#[derive(Debug)]
pub struct EchoRunner<R> {
    inner: R,
    reporter: Reporter,
}

impl<R: CommandRunner> EchoRunner<R> {
    /// Wrap `inner`
    pub const fn new(inner: R, reporter: Reporter) -> Self {
        Self { inner, reporter }
    }

    /// Unwrap the inner runner
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: CommandRunner> CommandRunner for EchoRunner<R> {
    fn run(&mut self, invocation: &Invocation) -> Result<(), ToolError> {
        self.reporter.command(invocation);
        self.inner.run(invocation)
    }

    fn output(&mut self, invocation: &Invocation) -> Result<String, ToolError> {
        self.inner.output(invocation)
    }
}

/// Render a failure for stderr
///
/// Normal mode is one line, `error: <message>`. Debug mode keeps the full
/// structure of the error and every source in its chain.
#[must_use]
pub fn render_error(err: &(dyn Error + 'static), debug: bool) -> String {
    if !debug {
        let message = err.to_string();
        let first_line = message.lines().next().unwrap_or_default();
        return format!("error: {first_line}");
    }

    let mut rendered = format!("Error: {err:?}");
    let mut source = err.source();
    if source.is_some() {
        rendered.push_str("\n\nCaused by:");
    }
    let mut depth = 0;
    while let Some(cause) = source {
        rendered.push_str(&format!("\n    {depth}: {cause}"));
        depth += 1;
        source = cause.source();
    }
    rendered
}
