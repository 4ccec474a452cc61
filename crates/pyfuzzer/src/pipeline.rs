//! Generate, build and run, in that order

use crate::compile::{self, BuildFlags};
use crate::error::PyfuzzerResult;
use crate::exec::CommandRunner;
use crate::generate;
use crate::module_name::ModuleName;
use crate::run;
use crate::sysconfig::{query_build_tool_flags, HostPythonConfig};
use crate::toolchain::Toolchain;
use crate::workspace::Workspace;
use std::path::PathBuf;

/// Default `-max_total_time`, in seconds
pub const DEFAULT_MAXIMUM_EXECUTION_TIME: i64 = 1;

/// What to fuzz and for how long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzOptions {
    /// Extension module name
    pub module_name: ModuleName,
    /// C sources of the extension, in compiler order
    pub csources: Vec<String>,
    /// Python file copied to `mutator.py`
    pub mutator: Option<PathBuf>,
    /// Seconds the fuzz binary may run
    pub maximum_execution_time: i64,
    /// Merge `pkg-config` flags into the build
    pub use_pkg_config: bool,
}

impl FuzzOptions {
    /// Options with defaults for everything but the module and sources
    #[must_use]
    pub fn new(module_name: ModuleName, csources: Vec<String>) -> Self {
        Self {
            module_name,
            csources,
            mutator: None,
            maximum_execution_time: DEFAULT_MAXIMUM_EXECUTION_TIME,
            use_pkg_config: false,
        }
    }

    /// Set the mutator
    #[must_use]
    pub fn with_mutator(mut self, mutator: Option<PathBuf>) -> Self {
        self.mutator = mutator;
        self
    }

    /// Set the execution time bound
    #[must_use]
    pub const fn with_maximum_execution_time(mut self, seconds: i64) -> Self {
        self.maximum_execution_time = seconds;
        self
    }

    /// Enable or disable the `pkg-config` merge
    #[must_use]
    pub const fn with_pkg_config(mut self, enabled: bool) -> Self {
        self.use_pkg_config = enabled;
        self
    }
}

/// One end-to-end run in a workspace
#[derive(Debug)]
pub struct Pipeline<'a, R> {
    runner: R,
    toolchain: &'a Toolchain,
    workspace: &'a Workspace,
}

impl<'a, R: CommandRunner> Pipeline<'a, R> {
    /// Create a pipeline driving tools through `runner`
    pub fn new(runner: R, toolchain: &'a Toolchain, workspace: &'a Workspace) -> Self {
        Self {
            runner,
            toolchain,
            workspace,
        }
    }

    /// Resolve include and link flags for the build
    pub fn resolve_flags(&mut self, use_pkg_config: bool) -> PyfuzzerResult<BuildFlags> {
        let host = HostPythonConfig::query(&mut self.runner, &self.toolchain.python)?;
        let mut flags = BuildFlags {
            compile: host.resolve_compile_flags()?,
            link: host.resolve_link_flags()?,
        };

        if use_pkg_config {
            let pkg_config = &self.toolchain.pkg_config;
            flags
                .compile
                .extend(query_build_tool_flags(&mut self.runner, pkg_config, "--cflags"));
            flags
                .link
                .extend(query_build_tool_flags(&mut self.runner, pkg_config, "--libs"));
        }

        Ok(flags)
    }

    /// Generate sources, build the binary, fuzz it and report coverage
    pub fn execute(&mut self, options: &FuzzOptions) -> PyfuzzerResult<()> {
        let name = &options.module_name;
        tracing::info!(module = %name, sources = options.csources.len(), "starting");

        generate::check_sources(self.workspace, &options.csources)?;
        generate::generate(self.workspace, name, options.mutator.as_deref())?;

        let flags = self.resolve_flags(options.use_pkg_config)?;
        compile::build(
            &mut self.runner,
            &self.toolchain.cc,
            name,
            &options.csources,
            &flags,
        )?;

        run::run(
            &mut self.runner,
            self.toolchain,
            self.workspace,
            name,
            options.maximum_execution_time,
        )
    }

    /// Give the runner back
    pub fn into_runner(self) -> R {
        self.runner
    }
}
