#![forbid(unsafe_code)]
//! assertx: a minimal C test runner
//!
//! Given a directory, assertx finds every `*_test.c` file, collects its `void test_*()` functions,
//! generates a driver (`build/runner_<name>.c`) that includes the file and calls them in order,
//! compiles it with the system C compiler, runs it, and reports pass/fail from the exit status.
//!
//! The pure pieces (naming conventions, the scanner, harness text) live in the `assertx_core` crate;
//! this crate owns everything that touches the filesystem and child processes.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod version;

pub use assertx_core::{HarnessOptions, ScanMode, ScanOptions, ScanOutcome, TestFunction};
pub use cli::config::RunnerConfig;
pub use cli::orchestrator::{Candidate, CandidateOutcome, HarnessArtifacts, Pipeline};
pub use cli::test_interfaces::{
    CompileCommand, Compiler, DefaultCompiler, DefaultTestDiscovery, DefaultTestExecutor, HarnessError, RunError,
    RunStatus, TestDiscovery, TestExecutor,
};
pub use cli::test_runner::{ConsoleReporter, RunTally, TestReporter, run_directory, run_tests};
