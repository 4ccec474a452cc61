//! Glue sources written next to the user's C files

use crate::error::{PyfuzzerError, PyfuzzerResult};
use crate::module_name::ModuleName;
use crate::workspace::Workspace;
use std::path::{Component, Path, PathBuf};

/// Generated bridge source
pub const MODULE_SOURCE: &str = "module.c";
/// Destination of the copied mutator
pub const MUTATOR_SOURCE: &str = "mutator.py";
/// Bundled libFuzzer support source
///
/// Written into the working directory on every run, replacing any file of
/// the same name. [`check_sources`] refuses user sources at that path.
pub const SUPPORT_SOURCE: &str = "pyfuzzer.c";

/// Contents of [`SUPPORT_SOURCE`]
pub const SUPPORT_SOURCE_TEXT: &str = include_str!("../support/pyfuzzer.c");

/// Bridge source forwarding `PyInit_<name>` to `pyfuzzer_module_init`
#[must_use]
pub fn module_source(module_name: &ModuleName) -> String {
    format!(
        "#include <Python.h>\n\
         \n\
         extern PyMODINIT_FUNC PyInit_{module_name}(void);\n\
         \n\
         PyMODINIT_FUNC pyfuzzer_module_init(void)\n\
         {{\n\
         \x20   return (PyInit_{module_name}());\n\
         }}\n"
    )
}

/// Refuse user sources that [`generate`] would overwrite
///
/// Relative sources are taken relative to the workspace root.
pub fn check_sources(workspace: &Workspace, csources: &[String]) -> PyfuzzerResult<()> {
    for source in csources {
        let path = lexical(&workspace.root().join(source));
        for generated in [MODULE_SOURCE, SUPPORT_SOURCE] {
            if path == lexical(&workspace.path(generated)) {
                return Err(PyfuzzerError::ReservedSource {
                    source_file: source.clone(),
                    generated,
                });
            }
        }
    }
    Ok(())
}

fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Write the bridge and support sources, and copy the mutator if given
pub fn generate(
    workspace: &Workspace,
    module_name: &ModuleName,
    mutator: Option<&Path>,
) -> PyfuzzerResult<()> {
    workspace.write(MODULE_SOURCE, module_source(module_name))?;
    workspace.write(SUPPORT_SOURCE, SUPPORT_SOURCE_TEXT)?;
    tracing::info!(module = %module_name, "generated {MODULE_SOURCE} and {SUPPORT_SOURCE}");

    if let Some(mutator) = mutator {
        workspace.copy_in(mutator, MUTATOR_SOURCE)?;
        tracing::info!(mutator = %mutator.display(), "copied mutator to {MUTATOR_SOURCE}");
    }

    Ok(())
}
