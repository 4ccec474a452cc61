//! Fuzz run followed by coverage merge and report

use crate::error::PyfuzzerResult;
use crate::exec::{CommandRunner, Invocation};
use crate::generate::{MODULE_SOURCE, SUPPORT_SOURCE};
use crate::module_name::ModuleName;
use crate::toolchain::Toolchain;
use crate::workspace::Workspace;

/// Largest input libFuzzer may generate, in bytes
pub const MAX_LEN: u32 = 4096;

/// Variable telling the instrumented binary where to write its raw profile
pub const PROFILE_FILE_ENV: &str = "LLVM_PROFILE_FILE";

/// Files left out of the coverage report
pub const IGNORED_FILENAMES: [&str; 3] = ["/usr/include", SUPPORT_SOURCE, MODULE_SOURCE];

/// `./<name> -max_total_time=<secs> -max_len=4096`, profiling to `<name>.profraw`
///
/// The time is passed through unchecked.
#[must_use]
pub fn fuzz_command(name: &ModuleName, maximum_execution_time: i64) -> Invocation {
    Invocation::new(format!("./{name}"))
        .arg(format!("-max_total_time={maximum_execution_time}"))
        .arg(format!("-max_len={MAX_LEN}"))
        .env(PROFILE_FILE_ENV, name.profraw())
}

/// `llvm-profdata merge -sparse <name>.profraw -o <name>.profdata`
#[must_use]
pub fn merge_command(llvm_profdata: &str, name: &ModuleName) -> Invocation {
    Invocation::new(llvm_profdata)
        .args(["merge", "-sparse"])
        .arg(name.profraw())
        .arg("-o")
        .arg(name.profdata())
}

/// `llvm-cov show <name> -instr-profile=<name>.profdata -ignore-filename-regex=...`
#[must_use]
pub fn report_command(llvm_cov: &str, name: &ModuleName) -> Invocation {
    Invocation::new(llvm_cov)
        .arg("show")
        .arg(name.as_str())
        .arg(format!("-instr-profile={}", name.profdata()))
        .arg(format!(
            "-ignore-filename-regex={}",
            IGNORED_FILENAMES.join("|")
        ))
}

/// Fuzz `./<name>`, then merge its profile and print the coverage report
///
/// Each step runs once; the first failure stops the rest. A non-zero exit
/// of the fuzz binary usually means it found a crash.
pub fn run<R: CommandRunner>(
    runner: &mut R,
    toolchain: &Toolchain,
    workspace: &Workspace,
    name: &ModuleName,
    maximum_execution_time: i64,
) -> PyfuzzerResult<()> {
    if workspace.remove_if_exists(&name.profraw())? {
        tracing::debug!(file = %name.profraw(), "removed stale raw profile");
    }

    runner.run(&fuzz_command(name, maximum_execution_time))?;
    runner.run(&merge_command(&toolchain.llvm_profdata, name))?;
    runner.run(&report_command(&toolchain.llvm_cov, name))?;
    Ok(())
}
