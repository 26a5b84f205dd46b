//! Test runner implementation
//!
//! ## TestReporter Trait
//!
//! The test runner uses a `TestReporter` trait to separate reporting from
//! execution. `ConsoleReporter` prints one symbol-prefixed line per event and
//! the final summary.
//!
//! ## I/O Boundaries
//!
//! Directory listing, compilation and execution are abstracted via traits in
//! `test_interfaces.rs`; `run_tests` wires in the default implementations.

use std::io::{self, Write};
use std::path::Path;

use assertx_core::scan::TestFunction;

use super::config::RunnerConfig;
use super::orchestrator::{Candidate, CandidateOutcome, Pipeline};
use super::scratch::ensure_output_area;
use super::test_interfaces::{
    CompileCommand, DefaultCompiler, DefaultTestDiscovery, DefaultTestExecutor, HarnessError, RunError,
    TestDiscovery,
};
use super::{CliError, CliResult, ExitCode};

// ============================================================================
// Run tally
// ============================================================================

/// Counts for one run over a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    /// Files whose name matched the test suffix
    pub total: usize,
    /// Files whose binary exited with status 0
    pub passed: usize,
}

impl RunTally {
    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Test Reporter Trait
// ============================================================================

/// Trait for reporting test execution progress and results.
pub trait TestReporter {
    /// Called once before the directory is listed
    fn on_discovery_start(&mut self, _dir: &Path) {}

    /// Called right before the compiler runs
    fn on_compile_start(&mut self, candidate: &Candidate<'_>, command: &CompileCommand);

    /// Called with the functions the harness will call, in order
    fn on_functions_discovered(&mut self, _candidate: &Candidate<'_>, _functions: &[TestFunction]) {}

    /// Called when a file declares more test functions than the configured cap
    fn on_functions_truncated(&mut self, _candidate: &Candidate<'_>, _kept: usize, _dropped: usize) {}

    /// Called once per test file, after its artifacts are gone
    fn on_candidate_complete(&mut self, candidate: &Candidate<'_>, outcome: &CandidateOutcome);

    /// Called after every entry has been processed
    fn on_run_complete(&mut self, tally: &RunTally);
}

/// Default console reporter
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self::with_writer(io::stdout(), verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Console output is best effort; a closed stdout must not fail the run.
    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        let _ = self.out.write_fmt(text);
        let _ = self.out.write_all(b"\n");
        let _ = self.out.flush();
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_discovery_start(&mut self, dir: &Path) {
        self.line(format_args!("🔎 Searching tests in {}\n", dir.display()));
    }

    fn on_compile_start(&mut self, candidate: &Candidate<'_>, command: &CompileCommand) {
        self.line(format_args!("🔨 Compiling {}...", candidate.name));
        if self.verbose {
            self.line(format_args!("   $ {}", command));
        }
    }

    fn on_functions_discovered(&mut self, _candidate: &Candidate<'_>, functions: &[TestFunction]) {
        if self.verbose {
            for function in functions {
                self.line(format_args!("   • {} (line {})", function.name, function.line));
            }
        }
    }

    fn on_functions_truncated(&mut self, candidate: &Candidate<'_>, kept: usize, dropped: usize) {
        self.line(format_args!(
            "⚠️  {}: only the first {} test functions will run ({} ignored)",
            candidate.name, kept, dropped
        ));
    }

    fn on_candidate_complete(&mut self, candidate: &Candidate<'_>, outcome: &CandidateOutcome) {
        match outcome {
            CandidateOutcome::Skipped => {}
            CandidateOutcome::Passed(count) => {
                if self.verbose {
                    self.line(format_args!("✅ {} passed ({} test functions)\n", candidate.name, count));
                } else {
                    self.line(format_args!("✅ {} passed\n", candidate.name));
                }
            }
            CandidateOutcome::Failed(HarnessError::NoTests(_)) => {
                self.line(format_args!("⚠️  No test functions found in {}\n", candidate.name));
            }
            CandidateOutcome::Failed(HarnessError::CompileFailed { status }) => {
                self.line(format_args!("💥 Failed to compile {} ({})\n", candidate.name, status));
            }
            CandidateOutcome::Failed(HarnessError::TestFailed { status }) => {
                self.line(format_args!("❌ {} failed ({})\n", candidate.name, status));
            }
            CandidateOutcome::Failed(error) => {
                self.line(format_args!("🚫 {}: {}\n", candidate.name, error));
            }
        }
    }

    fn on_run_complete(&mut self, tally: &RunTally) {
        self.line(format_args!("===================================="));
        self.line(format_args!(
            "Tests: {} | Passed: {} | Failed: {}",
            tally.total,
            tally.passed,
            tally.failed()
        ));
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Run every test file directly inside `dir`.
///
/// Entries are processed one at a time in name order. Only a directory that cannot be listed aborts the
/// run; every per-file failure is folded into the tally.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn run_directory(
    dir: &Path,
    discovery: &dyn TestDiscovery,
    pipeline: &Pipeline<'_>,
    reporter: &mut dyn TestReporter,
) -> Result<RunTally, RunError> {
    let config = pipeline.config();
    config.validate()?;

    // A refused scratch directory shows up again as a harness-creation error per file.
    if let Err(e) = ensure_output_area(&config.build_dir) {
        tracing::warn!("cannot create build directory {}: {}", config.build_dir.display(), e);
    }

    reporter.on_discovery_start(dir);
    let entries = discovery.list_entries(dir)?;
    tracing::debug!(entries = entries.len(), "listed directory");

    let mut tally = RunTally::default();
    for name in &entries {
        pipeline.process_entry(dir, name, &mut tally, reporter);
    }

    reporter.on_run_complete(&tally);
    Ok(tally)
}

/// Run all test files in `dir` with the system compiler, printing to stdout.
pub fn run_tests(dir: &Path, config: &RunnerConfig) -> CliResult<ExitCode> {
    let pipeline = Pipeline::new(config, &DefaultCompiler, &DefaultTestExecutor);
    let mut reporter = ConsoleReporter::new(config.verbose);

    let tally = run_directory(dir, &DefaultTestDiscovery, &pipeline, &mut reporter)
        .map_err(|e| CliError::failure(format!("❌ {}", e)))?;

    match tally.exit_code() {
        ExitCode::SUCCESS => Ok(ExitCode::SUCCESS),
        // Summary already printed
        code => Err(CliError::new("", code)),
    }
}
