//! Layering guardrails to keep `assertx_core` free of I/O and third-party dependencies.
//!
//! The core crate holds the pure scanner and harness text; anything that touches the filesystem or spawns
//! processes belongs in the `assertx` crate. This test scans the core `Cargo.toml` and fails if any
//! `[dependencies]` entry appears, and checks the core sources for `std::fs`/`std::process` use.

#[test]
fn core_has_no_dependencies() {
    let manifest = include_str!("../crates/assertx_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        panic!("`assertx_core` must stay dependency-free, found: {}", line);
    }
}

#[test]
fn core_does_not_touch_the_host() {
    let sources = [
        ("lib.rs", include_str!("../crates/assertx_core/src/lib.rs")),
        ("conventions.rs", include_str!("../crates/assertx_core/src/conventions.rs")),
        ("harness.rs", include_str!("../crates/assertx_core/src/harness.rs")),
        ("scan.rs", include_str!("../crates/assertx_core/src/scan.rs")),
        ("suffix.rs", include_str!("../crates/assertx_core/src/suffix.rs")),
    ];

    for (name, text) in sources {
        for forbidden in ["std::fs", "std::process", "std::env"] {
            assert!(
                !text.contains(forbidden),
                "{} uses {}; host access belongs in the assertx crate",
                name,
                forbidden
            );
        }
    }
}
