//! Shared runner conventions (well-known names, flags and limits).

/// File-name suffix that marks a test source file.
pub const TEST_FILE_SUFFIX: &str = "_test.c";

/// Extension of C source files, including the leading dot.
pub const SOURCE_EXTENSION: &str = ".c";

/// Return type that opens a test declaration.
pub const DECL_RETURN_TYPE: &str = "void";

/// Name prefix every test function carries.
pub const TEST_FUNCTION_PREFIX: &str = "test_";

/// Textual marker a line must contain to be read as a test declaration.
pub const DECL_MARKER: &str = "void test_";

/// Default scratch directory for generated harnesses and binaries.
pub const SCRATCH_DIR: &str = "build";

/// Prefix of generated harness source files (`runner_<case>.c`).
pub const RUNNER_PREFIX: &str = "runner_";

/// Compiler used when neither `--cc` nor `CC` is given.
pub const DEFAULT_COMPILER: &str = "gcc";

/// Diagnostic flags passed to the compiler unless overridden.
pub const DEFAULT_CFLAGS: &[&str] = &["-Wall", "-Wextra"];

/// Upper bound on test functions collected from a single file.
pub const MAX_TEST_FUNCTIONS: usize = 100;

/// Upper bound on the byte length of a captured function name.
pub const MAX_FUNCTION_NAME_LEN: usize = 255;

/// Entry point emitted into every harness.
pub const ENTRYPOINT_NAME: &str = "main";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_is_return_type_then_prefix() {
        assert_eq!(DECL_MARKER, format!("{DECL_RETURN_TYPE} {TEST_FUNCTION_PREFIX}"));
    }

    #[test]
    fn test_suffix_is_a_source_file() {
        assert!(TEST_FILE_SUFFIX.ends_with(SOURCE_EXTENSION));
    }
}
