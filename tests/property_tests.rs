//! Property-based tests for the assertx scanner and harness synthesis
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use assertx_core::scan::declared_test_name;
use assertx_core::{HarnessOptions, ScanMode, ScanOptions, matches_suffix, scan_source, synthesize};
use proptest::prelude::*;

/// Identifier tails for generated test names (`test_<tail>`)
fn tail() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}"
}

/// Lines that never look like a test declaration
fn noise_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("#include <assert.h>".to_string()),
        Just("static int helper(void) { return 1; }".to_string()),
        Just("    assert(1 == 1);".to_string()),
        Just("}".to_string()),
        "int [a-z]{1,8} = [0-9]{1,4};",
    ]
}

fn unique_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(tail(), 0..max).prop_map(|set| set.into_iter().map(|t| format!("test_{t}")).collect())
}

/// Source with one definition per name, in order, separated by noise
fn source_for(names: &[String], noise: &[String]) -> String {
    let mut out = String::new();
    for (i, name) in names.iter().enumerate() {
        if let Some(line) = noise.get(i) {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("void {name}(void)\n{{\n}}\n"));
    }
    out
}

// =============================================================================
// Suffix Properties
// =============================================================================

#[cfg(test)]
mod suffix_tests {
    use super::*;

    proptest! {
        /// Property: any stem followed by the suffix matches
        #[test]
        fn appended_suffix_matches(stem in "[a-zA-Z0-9_.]{0,20}", suffix in "[a-z_.]{1,10}") {
            let name = format!("{stem}{suffix}");
            prop_assert!(matches_suffix(&name, &suffix));
        }

        /// Property: a suffix longer than the name never matches
        #[test]
        fn longer_suffix_never_matches(name in "[a-z]{0,8}", extra in "[a-z]{1,8}") {
            let suffix = format!("{extra}{name}");
            prop_assume!(suffix.len() > name.len());
            prop_assert!(!matches_suffix(&name, &suffix));
        }

        /// Property: the matcher agrees with `str::ends_with` for non-empty inputs
        #[test]
        fn agrees_with_ends_with(name in "[a-c_.]{1,12}", suffix in "[a-c_.]{1,4}") {
            prop_assert_eq!(matches_suffix(&name, &suffix), name.ends_with(&suffix));
        }
    }
}

// =============================================================================
// Scanner Properties
// =============================================================================

#[cfg(test)]
mod scanner_tests {
    use super::*;

    proptest! {
        /// Property: every declared name is found once, in file order
        #[test]
        fn finds_names_in_order(names in unique_names(30), noise in proptest::collection::vec(noise_line(), 0..30)) {
            let source = source_for(&names, &noise);
            let outcome = scan_source(&source, &ScanOptions::default());
            let found: Vec<String> = outcome.names().map(str::to_string).collect();
            prop_assert_eq!(found, names);
            prop_assert_eq!(outcome.truncated, 0);
        }

        /// Property: the cap keeps a prefix and counts the rest
        #[test]
        fn cap_keeps_prefix(names in unique_names(20), cap in 1usize..10) {
            let source = source_for(&names, &[]);
            let outcome = scan_source(&source, &ScanOptions::default().with_max_functions(cap));
            let kept = names.len().min(cap);
            let found: Vec<String> = outcome.names().map(str::to_string).collect();
            prop_assert_eq!(&found[..], &names[..kept]);
            prop_assert_eq!(outcome.truncated, names.len() - kept);
        }

        /// Property: both scan modes agree on sources without comments or literals
        #[test]
        fn modes_agree_on_plain_sources(names in unique_names(15), noise in proptest::collection::vec(noise_line(), 0..15)) {
            let source = source_for(&names, &noise);
            let lexical = scan_source(&source, &ScanOptions::default());
            let aware = scan_source(&source, &ScanOptions::default().with_mode(ScanMode::CommentAware));
            prop_assert_eq!(lexical, aware);
        }

        /// Property: extracted names are bounded identifiers
        #[test]
        fn declared_names_are_identifiers(line in "\\PC{0,300}") {
            if let Some(name) = declared_test_name(&line) {
                prop_assert!(name.len() <= 255);
                prop_assert!(name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'));
                prop_assert!(name.starts_with("test_"));
            }
        }
    }
}

// =============================================================================
// Harness Properties
// =============================================================================

#[cfg(test)]
mod harness_tests {
    use super::*;

    proptest! {
        /// Property: main calls every function exactly once, in discovery order, before returning
        #[test]
        fn calls_follow_discovery_order(names in unique_names(20)) {
            prop_assume!(!names.is_empty());
            let source = source_for(&names, &[]);
            let outcome = scan_source(&source, &ScanOptions::default());
            let harness = synthesize("x_test.c", &outcome.functions, &HarnessOptions::default());

            let calls: Vec<&str> = harness
                .lines()
                .filter_map(|l| l.strip_prefix("    ").and_then(|l| l.strip_suffix("();")))
                .collect();
            let expected: Vec<&str> = names.iter().map(String::as_str).collect();
            prop_assert_eq!(calls, expected);

            let ret = harness.find("return 0;").unwrap();
            let main = harness.find("int main(void)").unwrap();
            prop_assert!(main < ret);
            prop_assert_eq!(harness.matches("Running ").count(), names.len());
        }
    }
}
