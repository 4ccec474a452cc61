//! External tool configuration

/// Default C compiler
pub const DEFAULT_CC: &str = "clang";
/// Default profile merge tool
pub const DEFAULT_LLVM_PROFDATA: &str = "llvm-profdata";
/// Default coverage report tool
pub const DEFAULT_LLVM_COV: &str = "llvm-cov";
/// Default host interpreter
pub const DEFAULT_PYTHON: &str = "python3";
/// Default package metadata tool
pub const DEFAULT_PKG_CONFIG: &str = "pkg-config";

/// Names of the external programs the pipeline drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Compiler with libFuzzer and source-based coverage support
    pub cc: String,
    /// `llvm-profdata`
    pub llvm_profdata: String,
    /// `llvm-cov`
    pub llvm_cov: String,
    /// Interpreter whose `sysconfig` provides include and link flags
    pub python: String,
    /// `pkg-config`
    pub pkg_config: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            cc: DEFAULT_CC.to_string(),
            llvm_profdata: DEFAULT_LLVM_PROFDATA.to_string(),
            llvm_cov: DEFAULT_LLVM_COV.to_string(),
            python: DEFAULT_PYTHON.to_string(),
            pkg_config: DEFAULT_PKG_CONFIG.to_string(),
        }
    }
}

impl Toolchain {
    /// Create the default toolchain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiler
    #[must_use]
    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = cc.into();
        self
    }

    /// Set `llvm-profdata`
    #[must_use]
    pub fn with_llvm_profdata(mut self, tool: impl Into<String>) -> Self {
        self.llvm_profdata = tool.into();
        self
    }

    /// Set `llvm-cov`
    #[must_use]
    pub fn with_llvm_cov(mut self, tool: impl Into<String>) -> Self {
        self.llvm_cov = tool.into();
        self
    }

    /// Set the interpreter
    #[must_use]
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Set `pkg-config`
    #[must_use]
    pub fn with_pkg_config(mut self, tool: impl Into<String>) -> Self {
        self.pkg_config = tool.into();
        self
    }
}
