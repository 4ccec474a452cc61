//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use pyfuzzer::{ModuleName, DEFAULT_MAXIMUM_EXECUTION_TIME};
use std::path::PathBuf;

/// Fuzz a Python C extension module with libFuzzer and print its coverage
#[derive(Parser, Debug)]
#[command(name = "pyfuzzer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show the full error detail instead of a one-line message
    #[arg(short, long)]
    pub debug: bool,

    /// Mutator module.
    #[arg(short, long)]
    pub mutator: Option<PathBuf>,

    /// Maximum execution time in seconds
    #[arg(
        short = 't',
        long,
        default_value_t = DEFAULT_MAXIMUM_EXECUTION_TIME,
        allow_negative_numbers = true
    )]
    pub maximum_execution_time: i64,

    /// Also use `pkg-config --cflags/--libs python3` flags
    #[arg(long)]
    pub pkg_config: bool,

    /// C compiler with libFuzzer and coverage support
    #[arg(long, env = "PYFUZZER_CC", default_value = pyfuzzer::toolchain::DEFAULT_CC)]
    pub cc: String,

    /// Profile merge tool
    #[arg(
        long,
        env = "PYFUZZER_LLVM_PROFDATA",
        default_value = pyfuzzer::toolchain::DEFAULT_LLVM_PROFDATA
    )]
    pub llvm_profdata: String,

    /// Coverage report tool
    #[arg(long, env = "PYFUZZER_LLVM_COV", default_value = pyfuzzer::toolchain::DEFAULT_LLVM_COV)]
    pub llvm_cov: String,

    /// Interpreter providing include and link flags
    #[arg(long, env = "PYFUZZER_PYTHON", default_value = pyfuzzer::toolchain::DEFAULT_PYTHON)]
    pub python: String,

    /// Log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not echo commands before running them
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorArg,

    /// C extension module name.
    pub modulename: ModuleName,

    /// C extension source files.
    #[arg(required = true, num_args = 1..)]
    pub csources: Vec<String>,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
