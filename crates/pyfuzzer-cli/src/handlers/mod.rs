//! Command handlers - extracted from main.rs for testability

pub mod fuzz;

pub use fuzz::{execute_fuzz, execute_fuzz_with, fuzz_options, toolchain};
