//! Runner configuration
//!
//! Built from command-line arguments (see `Cli::to_config`) or directly with the `with_*` builders.

use std::path::PathBuf;
use std::time::Duration;

use assertx_core::conventions::{
    DEFAULT_CFLAGS, DEFAULT_COMPILER, MAX_TEST_FUNCTIONS, SCRATCH_DIR, TEST_FILE_SUFFIX,
};
use assertx_core::harness::HarnessOptions;
use assertx_core::scan::{ScanMode, ScanOptions};

use super::test_interfaces::RunError;

/// Settings for one run over a directory.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Scratch directory for generated harnesses and binaries
    pub build_dir: PathBuf,
    /// Compiler command, possibly several words (`zig cc`)
    pub compiler: String,
    /// Flags placed before the harness path
    pub cflags: Vec<String>,
    /// File-name suffix that marks a test source
    pub suffix: String,
    /// Per-file cap on discovered test functions
    pub max_functions: usize,
    pub scan_mode: ScanMode,
    /// Function the harness calls after the last test (see `HarnessOptions::summary_hook`)
    pub summary_hook: Option<String>,
    /// Upper bound on each test binary's run time; `None` waits forever
    pub timeout: Option<Duration>,
    pub verbose: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from(SCRATCH_DIR),
            compiler: DEFAULT_COMPILER.to_string(),
            cflags: DEFAULT_CFLAGS.iter().map(|f| f.to_string()).collect(),
            suffix: TEST_FILE_SUFFIX.to_string(),
            max_functions: MAX_TEST_FUNCTIONS,
            scan_mode: ScanMode::Lexical,
            summary_hook: None,
            timeout: None,
            verbose: false,
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Replace the default diagnostic flags
    pub fn with_cflags(mut self, flags: Vec<String>) -> Self {
        self.cflags = flags;
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_max_functions(mut self, max: usize) -> Self {
        self.max_functions = max;
        self
    }

    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    pub fn with_summary_hook(mut self, hook: impl Into<String>) -> Self {
        self.summary_hook = Some(hook.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject settings that would make every candidate fail in the same way.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.build_dir.as_os_str().is_empty() {
            return Err(RunError::Config("build directory must not be empty".to_string()));
        }
        if self.suffix.is_empty() {
            return Err(RunError::Config("test file suffix must not be empty".to_string()));
        }
        if self.max_functions == 0 {
            return Err(RunError::Config("maximum test functions per file must be at least 1".to_string()));
        }
        if self.compiler.trim().is_empty() {
            return Err(RunError::Config("compiler must not be empty".to_string()));
        }
        if let Some(hook) = &self.summary_hook {
            let is_ident = !hook.is_empty()
                && !hook.starts_with(|c: char| c.is_ascii_digit())
                && hook.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !is_ident {
                return Err(RunError::Config(format!("summary hook '{}' is not a C identifier", hook)));
            }
        }
        Ok(())
    }

    /// Scanner settings; the summary hook is never collected as a test.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            mode: self.scan_mode,
            max_functions: self.max_functions,
            exclude: self.summary_hook.clone(),
        }
    }

    pub fn harness_options(&self) -> HarnessOptions {
        HarnessOptions {
            summary_hook: self.summary_hook.clone(),
        }
    }
}
