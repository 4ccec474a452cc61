//! Fuzz command handler

use crate::commands::Cli;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{EchoRunner, Reporter};
use pyfuzzer::{CommandRunner, FuzzOptions, Pipeline, SystemRunner, Toolchain, Workspace};

/// Tools named on the command line or in the environment
#[must_use]
pub fn toolchain(cli: &Cli) -> Toolchain {
    Toolchain::new()
        .with_cc(&cli.cc)
        .with_llvm_profdata(&cli.llvm_profdata)
        .with_llvm_cov(&cli.llvm_cov)
        .with_python(&cli.python)
}

/// Pipeline options from parsed arguments
#[must_use]
pub fn fuzz_options(cli: &Cli) -> FuzzOptions {
    FuzzOptions::new(cli.modulename.clone(), cli.csources.clone())
        .with_mutator(cli.mutator.clone())
        .with_maximum_execution_time(cli.maximum_execution_time)
        .with_pkg_config(cli.pkg_config)
}

/// Run the pipeline in `workspace` through `runner`, echoing commands
pub fn execute_fuzz_with<R: CommandRunner>(
    config: &CliConfig,
    cli: &Cli,
    workspace: &Workspace,
    runner: R,
) -> CliResult<R> {
    let toolchain = toolchain(cli);
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let mut pipeline = Pipeline::new(EchoRunner::new(runner, reporter), &toolchain, workspace);
    pipeline.execute(&fuzz_options(cli))?;
    Ok(pipeline.into_runner().into_inner())
}

/// Execute the fuzz command in the current directory
pub fn execute_fuzz(config: &CliConfig, cli: &Cli) -> CliResult<()> {
    let workspace = Workspace::current()?;
    tracing::debug!(workdir = %workspace.root().display(), "using working directory");
    let runner = SystemRunner::new(workspace.root());
    execute_fuzz_with(config, cli, &workspace, runner)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use crate::error::CliError;
    use clap::Parser;
    use pyfuzzer::{PyfuzzerError, RecordingRunner};
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HOST_JSON: &str =
        r#"{"include": "/usr/include/python3.12", "ldflags": "", "ldversion": "3.12"}"#;

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(Verbosity::Quiet)
    }

    #[test]
    fn test_toolchain_from_args() {
        let cli = Cli::parse_from(["pyfuzzer", "--cc", "clang-17", "--python", "py", "foo", "a.c"]);
        let tc = toolchain(&cli);
        assert_eq!(tc.cc, "clang-17");
        assert_eq!(tc.python, "py");
        assert_eq!(tc.pkg_config, "pkg-config");
    }

    #[test]
    fn test_fuzz_options_from_args() {
        let cli = Cli::parse_from(["pyfuzzer", "-m", "m.py", "-t", "-1", "--pkg-config", "foo", "a.c", "b.c"]);
        let opts = fuzz_options(&cli);
        assert_eq!(opts.module_name.as_str(), "foo");
        assert_eq!(opts.csources, vec!["a.c", "b.c"]);
        assert_eq!(opts.mutator, Some(PathBuf::from("m.py")));
        assert_eq!(opts.maximum_execution_time, -1);
        assert!(opts.use_pkg_config);
    }

    #[test]
    fn test_execute_scenario() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path());
        let cli = Cli::parse_from(["pyfuzzer", "foo", "bar.c"]);
        let runner = RecordingRunner::new().respond("python3", HOST_JSON);

        let runner = execute_fuzz_with(&quiet(), &cli, &ws, runner).unwrap();

        assert_eq!(
            runner.programs(),
            vec!["python3", "clang", "./foo", "llvm-profdata", "llvm-cov"]
        );
        assert!(ws.path("module.c").exists());
        assert!(ws.path("pyfuzzer.c").exists());
        assert!(!ws.path("mutator.py").exists());
    }

    #[test]
    fn test_execute_with_mutator() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path());
        let mutator = temp.path().join("custom.py");
        std::fs::write(&mutator, "def test_one_input(m, d): pass\n").unwrap();
        let cli = Cli::parse_from([
            "pyfuzzer",
            "-m",
            mutator.to_str().unwrap(),
            "foo",
            "bar.c",
        ]);
        let runner = RecordingRunner::new().respond("python3", HOST_JSON);

        execute_fuzz_with(&quiet(), &cli, &ws, runner).unwrap();

        assert_eq!(
            std::fs::read_to_string(ws.path("mutator.py")).unwrap(),
            "def test_one_input(m, d): pass\n"
        );
    }

    #[test]
    fn test_execute_compiler_failure() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path());
        let cli = Cli::parse_from(["pyfuzzer", "--cc", "gcc", "foo", "bar.c"]);
        let runner = RecordingRunner::new()
            .respond("python3", HOST_JSON)
            .fail("gcc", 1);

        let err = execute_fuzz_with(&quiet(), &cli, &ws, runner).unwrap_err();
        assert!(matches!(err, CliError::Pyfuzzer(PyfuzzerError::Tool(_))));
        assert!(err.to_string().starts_with("command 'gcc "));
    }
}
