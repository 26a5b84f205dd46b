//! assertx version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time, so the CLI and any
//! other consumer agree on one constant.

/// The assertx version string (for example, `0.1.0`).
pub const ASSERTX_VERSION: &str = env!("CARGO_PKG_VERSION");
