//! Per-candidate pipeline: harness generation, compilation and execution.
//!
//! ```text
//! entry ──suffix?──no──▶ Skipped
//!   │ yes (total += 1)
//!   ▼
//! write prologue ─▶ extract + stream declarations ─▶ 0 found ─▶ NoTests
//!   │
//!   ▼
//! write main ─▶ compile ─▶ nonzero ─▶ CompileFailed
//!   │
//!   ▼
//! run binary ─▶ exit 0 ─▶ Passed (passed += 1)
//!           └─▶ other ─▶ TestFailed
//! ```
//!
//! Every path past the suffix check removes the harness and the binary through [`HarnessArtifacts`].

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use assertx_core::conventions::{RUNNER_PREFIX, SOURCE_EXTENSION};
use assertx_core::harness;
use assertx_core::suffix::matches_suffix;

use super::config::RunnerConfig;
use super::extract::extract_test_functions;
use super::scratch::include_path_for;
use super::test_interfaces::{CompileCommand, Compiler, HarnessError, TestExecutor};
use super::test_runner::{RunTally, TestReporter};

/// A directory entry being considered as a test file.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub dir: &'a Path,
    pub name: &'a str,
}

impl<'a> Candidate<'a> {
    pub fn new(dir: &'a Path, name: &'a str) -> Self {
        Self { dir, name }
    }

    pub fn source_path(&self) -> PathBuf {
        self.dir.join(self.name)
    }

    /// File name without its final extension (`math_test.c` -> `math_test`).
    pub fn case_name(&self) -> &'a str {
        Path::new(self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(self.name)
    }
}

/// Final state of one directory entry.
#[derive(Debug)]
pub enum CandidateOutcome {
    /// Name does not carry the test suffix; not counted.
    Skipped,
    /// Binary exited 0 after running this many test functions.
    Passed(usize),
    Failed(HarnessError),
}

impl CandidateOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CandidateOutcome::Passed(_))
    }
}

/// Generated files for one candidate, removed when dropped.
#[derive(Debug)]
pub struct HarnessArtifacts {
    pub harness: PathBuf,
    pub binary: PathBuf,
}

impl HarnessArtifacts {
    /// `<scratch>/runner_<case>.c` and `<scratch>/<case><EXE_SUFFIX>`.
    pub fn new(scratch_dir: &Path, case_name: &str) -> Self {
        Self {
            harness: scratch_dir.join(format!("{RUNNER_PREFIX}{case_name}{SOURCE_EXTENSION}")),
            binary: scratch_dir.join(format!("{case_name}{}", std::env::consts::EXE_SUFFIX)),
        }
    }
}

impl Drop for HarnessArtifacts {
    fn drop(&mut self) {
        for path in [&self.harness, &self.binary] {
            match fs::remove_file(path) {
                Ok(()) => tracing::trace!("removed {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!("failed to remove {}: {}", path.display(), e),
            }
        }
    }
}

/// Drives candidates through the pipeline using the given toolchain.
pub struct Pipeline<'a> {
    config: &'a RunnerConfig,
    compiler: &'a dyn Compiler,
    executor: &'a dyn TestExecutor,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RunnerConfig, compiler: &'a dyn Compiler, executor: &'a dyn TestExecutor) -> Self {
        Self {
            config,
            compiler,
            executor,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        self.config
    }

    /// Process one directory entry and record it in `tally`.
    ///
    /// Candidate failures never escape: they are reported and returned as [`CandidateOutcome::Failed`].
    pub fn process_entry(
        &self,
        dir: &Path,
        name: &str,
        tally: &mut RunTally,
        reporter: &mut dyn TestReporter,
    ) -> CandidateOutcome {
        if !matches_suffix(name, &self.config.suffix) {
            tracing::trace!(name, "not a test file");
            return CandidateOutcome::Skipped;
        }

        let candidate = Candidate::new(dir, name);
        tally.total += 1;

        let outcome = match self.build_and_run(&candidate, reporter) {
            Ok(count) => CandidateOutcome::Passed(count),
            Err(e) => CandidateOutcome::Failed(e),
        };
        if outcome.is_passed() {
            tally.passed += 1;
        }

        reporter.on_candidate_complete(&candidate, &outcome);
        outcome
    }

    #[tracing::instrument(skip_all, fields(candidate = candidate.name))]
    fn build_and_run(&self, candidate: &Candidate<'_>, reporter: &mut dyn TestReporter) -> Result<usize, HarnessError> {
        let artifacts = HarnessArtifacts::new(&self.config.build_dir, candidate.case_name());

        let count = self.write_harness(candidate, &artifacts, reporter)?;

        let command = CompileCommand::new(
            &self.config.compiler,
            &self.config.cflags,
            &artifacts.harness,
            &artifacts.binary,
        )?;
        reporter.on_compile_start(candidate, &command);
        tracing::debug!(command = %command, "compiling");

        let status = self.compiler.compile(&command)?;
        if !status.success() {
            return Err(HarnessError::CompileFailed { status });
        }

        let status = self.executor.execute(&artifacts.binary, self.config.timeout)?;
        tracing::debug!(%status, "test binary finished");
        if !status.success() {
            return Err(HarnessError::TestFailed { status });
        }

        Ok(count)
    }

    /// Write the complete harness and close it. Returns the number of test functions it calls.
    fn write_harness(
        &self,
        candidate: &Candidate<'_>,
        artifacts: &HarnessArtifacts,
        reporter: &mut dyn TestReporter,
    ) -> Result<usize, HarnessError> {
        let path = &artifacts.harness;
        let file = File::create(path).map_err(|source| HarnessError::CreateHarness {
            path: path.clone(),
            source,
        })?;
        let mut out = BufWriter::new(file);

        let source_path = candidate.source_path();
        let include = include_path_for(&self.config.build_dir, &source_path);
        out.write_all(harness::prologue(&include).as_bytes())
            .map_err(|e| HarnessError::write(path, e))?;

        let outcome = extract_test_functions(&source_path, &mut out, &self.config.scan_options())
            .map_err(|e| HarnessError::write(path, e))?;
        if outcome.is_empty() {
            return Err(HarnessError::NoTests(source_path));
        }
        if outcome.truncated > 0 {
            reporter.on_functions_truncated(candidate, outcome.functions.len(), outcome.truncated);
        }
        reporter.on_functions_discovered(candidate, &outcome.functions);

        let main = harness::entry_point(&outcome.functions, &self.config.harness_options());
        out.write_all(main.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| HarnessError::write(path, e))?;

        Ok(outcome.functions.len())
    }
}
