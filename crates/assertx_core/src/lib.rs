//! Pure helpers shared by the assertx runner: naming conventions, the test-file predicate, the
//! `void test_*` scanner and C harness synthesis.
//!
//! ## Notes
//!
//! - No filesystem or process access happens here, and there is no global state. Everything that touches
//!   the host lives in the `assertx` crate.

pub mod conventions;
pub mod harness;
pub mod scan;
pub mod suffix;

pub use harness::{HarnessOptions, synthesize};
pub use scan::{ScanMode, ScanOptions, ScanOutcome, Scanner, TestFunction, scan_source};
pub use suffix::matches_suffix;
