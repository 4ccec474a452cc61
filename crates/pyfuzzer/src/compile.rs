//! Compiler invocation producing the fuzz binary

use crate::error::{PyfuzzerError, PyfuzzerResult};
use crate::exec::{CommandRunner, Invocation};
use crate::generate::{MODULE_SOURCE, SUPPORT_SOURCE};
use crate::module_name::ModuleName;

/// Coverage instrumentation and sanitizer flags, always first
pub const INSTRUMENTATION_FLAGS: [&str; 6] = [
    "-fprofile-instr-generate",
    "-fcoverage-mapping",
    "-g",
    "-fsanitize=fuzzer",
    "-fsanitize=signed-integer-overflow",
    "-fno-sanitize-recover=all",
];

/// Include and link flags resolved from the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFlags {
    /// Flags placed before the sources
    pub compile: Vec<String>,
    /// Flags placed after the sources
    pub link: Vec<String>,
}

/// Assemble the compiler command line
///
/// Order: compiler, instrumentation flags, compile flags, user sources,
/// bridge source, support source, link flags, `-o <module_name>`.
pub fn compile_command(
    cc: &str,
    module_name: &ModuleName,
    csources: &[String],
    flags: &BuildFlags,
) -> PyfuzzerResult<Invocation> {
    if csources.is_empty() {
        return Err(PyfuzzerError::NoSources);
    }

    Ok(Invocation::new(cc)
        .args(INSTRUMENTATION_FLAGS)
        .args(flags.compile.iter().cloned())
        .args(csources.iter().cloned())
        .args([MODULE_SOURCE, SUPPORT_SOURCE])
        .args(flags.link.iter().cloned())
        .args(["-o", module_name.as_str()]))
}

/// Compile `csources` and the glue sources into `./<module_name>`
pub fn build<R: CommandRunner>(
    runner: &mut R,
    cc: &str,
    module_name: &ModuleName,
    csources: &[String],
    flags: &BuildFlags,
) -> PyfuzzerResult<()> {
    let invocation = compile_command(cc, module_name, csources, flags)?;
    runner.run(&invocation)?;
    tracing::info!(module = %module_name, "built fuzz binary");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::exec::{RecordingRunner, ToolError};

    fn flags() -> BuildFlags {
        BuildFlags {
            compile: vec!["-I/usr/include/python3.12".to_string()],
            link: vec!["-L/usr/lib".to_string(), "-lpython3.12".to_string()],
        }
    }

    fn sources(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_argument_order() {
        let name = ModuleName::new("foo").unwrap();
        let inv = compile_command("clang", &name, &sources(&["a.c", "b.c"]), &flags()).unwrap();

        assert_eq!(
            inv.argv(),
            vec![
                "clang",
                "-fprofile-instr-generate",
                "-fcoverage-mapping",
                "-g",
                "-fsanitize=fuzzer",
                "-fsanitize=signed-integer-overflow",
                "-fno-sanitize-recover=all",
                "-I/usr/include/python3.12",
                "a.c",
                "b.c",
                "module.c",
                "pyfuzzer.c",
                "-L/usr/lib",
                "-lpython3.12",
                "-o",
                "foo",
            ]
        );
        assert!(inv.env.is_empty());
    }

    #[test]
    fn test_sources_keep_given_order() {
        let name = ModuleName::new("m").unwrap();
        let inv =
            compile_command("clang", &name, &sources(&["z.c", "a.c", "m.c"]), &flags()).unwrap();
        let pos = |s: &str| inv.args.iter().position(|a| a == s).unwrap();
        assert!(pos("z.c") < pos("a.c"));
        assert!(pos("a.c") < pos("m.c"));
        assert!(pos("m.c") < pos("module.c"));
    }

    #[test]
    fn test_output_flag_is_last() {
        let name = ModuleName::new("spam").unwrap();
        let inv = compile_command("clang", &name, &sources(&["spam.c"]), &flags()).unwrap();
        assert_eq!(&inv.args[inv.args.len() - 2..], ["-o", "spam"]);
    }

    #[test]
    fn test_empty_sources_rejected() {
        let name = ModuleName::new("foo").unwrap();
        assert!(matches!(
            compile_command("clang", &name, &[], &flags()),
            Err(PyfuzzerError::NoSources)
        ));
    }

    #[test]
    fn test_build_runs_compiler_once() {
        let name = ModuleName::new("foo").unwrap();
        let mut runner = RecordingRunner::new();
        build(&mut runner, "clang-18", &name, &sources(&["bar.c"]), &flags()).unwrap();
        assert_eq!(runner.programs(), vec!["clang-18"]);
    }

    #[test]
    fn test_build_failure_propagates() {
        let name = ModuleName::new("foo").unwrap();
        let mut runner = RecordingRunner::new().fail("clang", 1);
        let err = build(&mut runner, "clang", &name, &sources(&["bar.c"]), &flags()).unwrap_err();
        assert!(matches!(
            err,
            PyfuzzerError::Tool(ToolError::ExitStatus { code: 1, .. })
        ));
    }
}
