//! CLI module for the assertx test runner
//!
//! `assertx [OPTIONS] [DIR]` compiles and runs every `*_test.c` file directly inside `DIR`.
//!
//! ## Modules
//!
//! - `config` - Runner settings derived from the command line
//! - `test_runner` - Directory aggregation, tally and console reporting
//! - `orchestrator` - Per-file harness generation, compilation and execution
//! - `extract` - Streaming test-function extraction from a source file
//! - `test_interfaces` - Discovery/compiler/executor traits and their defaults
//! - `scratch` - Build directory and include-path helpers
//! - `process` - Bounded waits on child processes
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod extract;
pub mod orchestrator;
pub mod process;
pub mod scratch;
pub mod test_interfaces;
pub mod test_runner;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use assertx_core::conventions::{DEFAULT_COMPILER, MAX_TEST_FUNCTIONS, SCRATCH_DIR, TEST_FILE_SUFFIX};
use assertx_core::scan::ScanMode;
use clap::{CommandFactory, Parser};

use crate::version::ASSERTX_VERSION;
use config::RunnerConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Discover, compile and run C test functions
#[derive(Parser, Debug)]
#[command(name = "assertx")]
#[command(version = ASSERTX_VERSION)]
#[command(about = "Discover, compile and run `void test_*()` functions in *_test.c files", long_about = None)]
pub struct Cli {
    /// Directory containing the test files (not searched recursively)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// C compiler to invoke; may include leading arguments, e.g. "zig cc"
    #[arg(long = "cc", value_name = "COMPILER", env = "CC", default_value = DEFAULT_COMPILER)]
    pub compiler: String,

    /// Compiler flag (repeatable); replaces the default -Wall -Wextra
    #[arg(long = "cflag", value_name = "FLAG", allow_hyphen_values = true)]
    pub cflags: Vec<String>,

    /// Scratch directory for generated harnesses and binaries
    #[arg(long = "build-dir", value_name = "DIR", default_value = SCRATCH_DIR)]
    pub build_dir: PathBuf,

    /// File-name suffix that marks a test file
    #[arg(long, value_name = "SUFFIX", default_value = TEST_FILE_SUFFIX)]
    pub suffix: String,

    /// Maximum number of test functions run per file
    #[arg(long = "max-tests", value_name = "N", default_value_t = MAX_TEST_FUNCTIONS)]
    pub max_tests: usize,

    /// Kill a test binary that runs longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Function the harness calls after the last test (should exit nonzero on failures)
    #[arg(long = "summary-hook", value_name = "FN")]
    pub summary_hook: Option<String>,

    /// Ignore test declarations inside comments and string literals
    #[arg(long = "skip-comments")]
    pub skip_comments: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Translate parsed arguments into runner settings.
    pub fn to_config(&self) -> RunnerConfig {
        let mut config = RunnerConfig::new()
            .with_build_dir(&self.build_dir)
            .with_compiler(&self.compiler)
            .with_suffix(&self.suffix)
            .with_max_functions(self.max_tests)
            .with_verbose(self.verbose);

        if !self.cflags.is_empty() {
            config = config.with_cflags(self.cflags.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(hook) = &self.summary_hook {
            config = config.with_summary_hook(hook);
        }
        if self.skip_comments {
            config = config.with_scan_mode(ScanMode::CommentAware);
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                std::process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            std::process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let Some(dir) = cli.dir.as_deref() else {
        // No directory - show help, which is not an error
        Cli::command()
            .print_help()
            .map_err(|e| CliError::failure(format!("Error printing help: {}", e)))?;
        println!();
        return Ok(ExitCode::SUCCESS);
    };

    let config = cli.to_config();
    tracing::debug!(?config, "starting run");
    test_runner::run_tests(dir, &config)
}

// ============================================================================
// Tests
// ============================================================================
