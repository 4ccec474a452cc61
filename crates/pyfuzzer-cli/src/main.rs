//! pyfuzzer: fuzz a Python C extension module and print its coverage
//!
//! ## Usage
//!
//! ```bash
//! pyfuzzer hello hello.c                  # Fuzz for one second
//! pyfuzzer -t 60 -m mutator.py hello hello.c
//! pyfuzzer -d hello hello.c               # Full error detail on failure
//! ```

use clap::Parser;
use pyfuzzer_cli::{handlers, render_error, Cli, CliConfig, CliError, CliResult, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);

    let result = init_tracing(&config).and_then(|()| handlers::execute_fuzz(&config, &cli));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", render_error(&e, config.debug));
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.clone().into())
        .with_debug(cli.debug)
}

fn init_tracing(config: &CliConfig) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color_stderr())
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}
