//! File-level test-function extraction.
//!
//! Reads a candidate source line by line, feeds the scanner and streams a forward declaration into the
//! harness for every function it accepts.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use assertx_core::harness::forward_declaration;
use assertx_core::scan::{ScanOptions, ScanOutcome, Scanner};

/// Scan `source_path` and write `void <name>();` to `sink` for each discovered test.
///
/// ## Returns
/// - (`ScanOutcome`): discovered functions in file order. An unreadable source yields an empty outcome,
///   which callers treat as "no tests found".
///
/// ## Errors
/// - Only failures writing to `sink` are returned.
///
/// ## Notes
/// - Lines are decoded lossily, so stray Latin-1 bytes in comments do not stop the scan.
#[tracing::instrument(skip_all, fields(source = %source_path.display()))]
pub fn extract_test_functions<W: Write>(
    source_path: &Path,
    sink: &mut W,
    options: &ScanOptions,
) -> io::Result<ScanOutcome> {
    let file = match File::open(source_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!("cannot open source: {}", e);
            return Ok(ScanOutcome::default());
        }
    };

    let mut scanner = Scanner::new(options.clone());
    for raw in BufReader::new(file).split(b'\n') {
        let raw = match raw {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("read error, scan stopped early: {}", e);
                break;
            }
        };
        let line = String::from_utf8_lossy(&raw);
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if let Some(function) = scanner.feed_line(line) {
            sink.write_all(forward_declaration(&function.name).as_bytes())?;
        }
    }

    let outcome = scanner.finish();
    if outcome.truncated > 0 {
        tracing::warn!(
            kept = outcome.functions.len(),
            dropped = outcome.truncated,
            "test function limit reached; remaining functions ignored"
        );
    }
    Ok(outcome)
}
