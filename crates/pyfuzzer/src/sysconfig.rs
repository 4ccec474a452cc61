//! Compiler and linker flags from the host Python installation
//!
//! The interpreter is asked once for its `sysconfig` values, printed as JSON.
//! Flag derivation is then a pure function of [`HostPythonConfig`].

use crate::error::{ConfigError, PyfuzzerResult};
use crate::exec::{CommandRunner, Invocation};
use serde::Deserialize;

/// Prints the `sysconfig` values the build needs as one JSON object
const QUERY_SCRIPT: &str = "import json, sysconfig; print(json.dumps({\
\"include\": sysconfig.get_path(\"include\"), \
\"ldflags\": sysconfig.get_config_var(\"LDFLAGS\"), \
\"ldversion\": sysconfig.get_config_var(\"LDVERSION\")}))";

/// Package queried through `pkg-config`
pub const PKG_CONFIG_PACKAGE: &str = "python3";

/// Build configuration reported by the host interpreter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostPythonConfig {
    /// `sysconfig.get_path('include')`
    pub include: Option<String>,
    /// `LDFLAGS`
    pub ldflags: Option<String>,
    /// `LDVERSION`, e.g. `3.12` or `3.13t`
    pub ldversion: Option<String>,
}

impl HostPythonConfig {
    /// Ask `python` for its configuration
    pub fn query<R: CommandRunner>(runner: &mut R, python: &str) -> PyfuzzerResult<Self> {
        let invocation = Invocation::new(python).args(["-c", QUERY_SCRIPT]);
        let stdout = runner.output(&invocation)?;
        let config = Self::parse(&stdout)?;
        tracing::debug!(?config, "resolved host Python configuration");
        Ok(config)
    }

    /// Parse the query script's output
    pub fn parse(stdout: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(stdout)?)
    }

    /// `-I<include>`
    pub fn resolve_compile_flags(&self) -> Result<Vec<String>, ConfigError> {
        match self.include.as_deref() {
            Some(include) if !include.is_empty() => Ok(vec![format!("-I{include}")]),
            _ => Err(ConfigError::MissingIncludePath),
        }
    }

    /// `LDFLAGS` tokens followed by `-lpython<LDVERSION>`
    pub fn resolve_link_flags(&self) -> Result<Vec<String>, ConfigError> {
        let ldflags = self
            .ldflags
            .as_deref()
            .ok_or(ConfigError::MissingVariable("LDFLAGS"))?;
        let ldversion = self
            .ldversion
            .as_deref()
            .ok_or(ConfigError::MissingVariable("LDVERSION"))?;

        Ok(ldflags
            .split_whitespace()
            .map(str::to_string)
            .chain(std::iter::once(format!("-lpython{ldversion}")))
            .collect())
    }
}

/// Best-effort `pkg-config <option> python3`
///
/// Never fails: a missing tool or a non-zero exit yields an empty list.
pub fn query_build_tool_flags<R: CommandRunner>(
    runner: &mut R,
    pkg_config: &str,
    option: &str,
) -> Vec<String> {
    let invocation = Invocation::new(pkg_config).args([option, PKG_CONFIG_PACKAGE]);
    match runner.output(&invocation) {
        Ok(stdout) => stdout.split_whitespace().map(str::to_string).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "pkg-config probe failed, ignoring");
            Vec::new()
        }
    }
}
