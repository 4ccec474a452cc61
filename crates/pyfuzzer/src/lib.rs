//! pyfuzzer: libFuzzer and source-based coverage for Python C extensions
//!
//! Drives an external toolchain through a fixed pipeline:
//!
//! 1. [`generate`] writes `module.c` (forwards `PyInit_<name>`), the bundled
//!    `pyfuzzer.c` and an optional `mutator.py`
//! 2. [`compile`] builds `./<name>` with clang's fuzzer and coverage flags
//! 3. [`run`] fuzzes it, merges the raw profile and prints `llvm-cov show`
//!
//! ```rust,ignore
//! use pyfuzzer::{FuzzOptions, ModuleName, Pipeline, SystemRunner, Toolchain, Workspace};
//!
//! let workspace = Workspace::current()?;
//! let toolchain = Toolchain::default();
//! let options = FuzzOptions::new(ModuleName::new("hello")?, vec!["hello.c".into()]);
//! Pipeline::new(SystemRunner::new(workspace.root()), &toolchain, &workspace).execute(&options)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod compile;
mod error;
pub mod exec;
pub mod generate;
mod module_name;
pub mod pipeline;
pub mod run;
pub mod sysconfig;
pub mod toolchain;
mod workspace;

pub use compile::{build, compile_command, BuildFlags, INSTRUMENTATION_FLAGS};
pub use error::{ConfigError, PyfuzzerError, PyfuzzerResult};
pub use exec::{CommandRunner, Invocation, RecordingRunner, SystemRunner, ToolError};
pub use generate::{
    check_sources, generate, module_source, MODULE_SOURCE, MUTATOR_SOURCE, SUPPORT_SOURCE,
};
pub use module_name::ModuleName;
pub use pipeline::{FuzzOptions, Pipeline, DEFAULT_MAXIMUM_EXECUTION_TIME};
pub use run::{fuzz_command, merge_command, report_command, run};
pub use sysconfig::{query_build_tool_flags, HostPythonConfig};
pub use toolchain::Toolchain;
pub use workspace::Workspace;
