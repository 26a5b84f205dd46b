//! Test runner I/O boundary interfaces
//!
//! This module defines trait-based abstractions for the operations that touch the host:
//! - Test discovery (directory listing)
//! - Compilation (external C compiler invocation)
//! - Test execution (running the produced binary and reading its exit status)
//!
//! The pipeline in `orchestrator.rs` only talks to these traits, so tests can substitute a fake
//! toolchain and a fixed directory listing. Default implementations use `std::fs` and
//! `std::process`.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;

use super::process::wait_with_timeout;

// ============================================================================
// Errors
// ============================================================================

/// Failures that end the processing of a single candidate file.
///
/// None of these abort the run; the candidate is counted but not passed.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("cannot create harness '{}': {source}", .path.display())]
    CreateHarness {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write harness '{}': {source}", .path.display())]
    WriteHarness {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no test functions found in '{}'", .0.display())]
    NoTests(PathBuf),

    #[error("invalid compiler command line: {0}")]
    CommandLine(String),

    #[error("failed to start compiler '{program}': {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("compilation failed ({status})")]
    CompileFailed { status: RunStatus },

    #[error("failed to run test binary '{}': {source}", .path.display())]
    ExecutorSpawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("test binary failed ({status})")]
    TestFailed { status: RunStatus },
}

impl HarnessError {
    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        HarnessError::WriteHarness {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to open directory '{}': {source}", .path.display())]
    OpenDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

// ============================================================================
// Process status
// ============================================================================

/// How a child process (compiler or test binary) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Exited(i32),
    /// Terminated without an exit code (signal on Unix).
    Signaled,
    /// Killed after exceeding the configured timeout.
    TimedOut,
}

impl RunStatus {
    /// Only a clean `exit(0)` counts as success.
    pub fn success(&self) -> bool {
        matches!(self, RunStatus::Exited(0))
    }
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => RunStatus::Exited(code),
            None => RunStatus::Signaled,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Exited(code) => write!(f, "exit code {}", code),
            RunStatus::Signaled => write!(f, "terminated by signal"),
            RunStatus::TimedOut => write!(f, "timed out"),
        }
    }
}

// ============================================================================
// Compiler command
// ============================================================================

/// A fully resolved compiler invocation: `<compiler> <flags> <harness> -o <binary>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl CompileCommand {
    /// Build the invocation.
    ///
    /// `compiler` may hold several words (`zig cc`); the first is the program and the rest become
    /// leading arguments. An empty `compiler` is rejected.
    pub fn new(compiler: &str, flags: &[String], harness: &Path, binary: &Path) -> Result<Self, HarnessError> {
        let mut words = compiler.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| HarnessError::CommandLine("compiler name is empty".to_string()))?
            .to_string();

        let mut args: Vec<OsString> = words.map(OsString::from).collect();
        args.extend(flags.iter().map(OsString::from));
        args.push(harness.as_os_str().to_os_string());
        args.push(OsString::from("-o"));
        args.push(binary.as_os_str().to_os_string());

        Ok(Self { program, args })
    }

    /// Printable command line, allocated once at its exact length.
    pub fn command_line(&self) -> String {
        let args: Vec<_> = self.args.iter().map(|a| a.to_string_lossy()).collect();
        let len = self.program.len() + args.iter().map(|a| a.len() + 1).sum::<usize>();

        let mut line = String::with_capacity(len);
        line.push_str(&self.program);
        for arg in &args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for CompileCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

// ============================================================================
// Test Discovery Interface
// ============================================================================

/// Enumerate the entries of the target directory.
pub trait TestDiscovery {
    /// Names of the non-directory entries directly inside `dir`, sorted by name.
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, RunError>;
}

// ============================================================================
// Compiler Interface
// ============================================================================

/// Run the external compiler.
pub trait Compiler {
    fn compile(&self, command: &CompileCommand) -> Result<RunStatus, HarnessError>;
}

// ============================================================================
// Test Executor Interface
// ============================================================================

/// Run a compiled test binary without arguments.
///
/// Only the exit status is reported; output belongs to the user.
pub trait TestExecutor {
    fn execute(&self, binary: &Path, timeout: Option<Duration>) -> Result<RunStatus, HarnessError>;
}

// ============================================================================
// Default Implementations
// ============================================================================

/// `std::fs::read_dir` listing (non-recursive).
pub struct DefaultTestDiscovery;

impl TestDiscovery for DefaultTestDiscovery {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, RunError> {
        let entries = fs::read_dir(dir).map_err(|source| RunError::OpenDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            // Follows symlinks, so a link to a directory is skipped too.
            if entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::debug!("skipping non UTF-8 entry {:?}", raw),
            }
        }

        names.sort();
        Ok(names)
    }
}

/// Invoke the compiler with inherited stdio so diagnostics reach the terminal.
pub struct DefaultCompiler;

impl Compiler for DefaultCompiler {
    fn compile(&self, command: &CompileCommand) -> Result<RunStatus, HarnessError> {
        let status = command
            .to_command()
            .stdin(Stdio::null())
            .status()
            .map_err(|source| HarnessError::CompilerSpawn {
                program: command.program.clone(),
                source,
            })?;
        Ok(RunStatus::from(status))
    }
}

/// Spawn the binary and wait for it, bounded by the timeout when one is set.
pub struct DefaultTestExecutor;

impl TestExecutor for DefaultTestExecutor {
    fn execute(&self, binary: &Path, timeout: Option<Duration>) -> Result<RunStatus, HarnessError> {
        let spawn_error = |source| HarnessError::ExecutorSpawn {
            path: binary.to_path_buf(),
            source,
        };

        let mut child = Command::new(binary)
            .stdin(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        wait_with_timeout(&mut child, timeout).map_err(spawn_error)
    }
}
