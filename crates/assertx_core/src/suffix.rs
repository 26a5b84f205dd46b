//! Test-file naming predicate.

/// Check whether `name` ends with `suffix`.
///
/// ## Returns
/// - (`bool`): `true` only for a non-empty `name` whose trailing bytes equal a non-empty `suffix`.
///
/// ## Notes
/// - Case-sensitive; compares bytes and never allocates.
/// - A suffix longer than the name never matches.
///
/// ## Examples
/// ```rust
/// use assertx_core::suffix::matches_suffix;
/// assert!(matches_suffix("math_test.c", "_test.c"));
/// assert!(!matches_suffix("math.c", "_test.c"));
/// assert!(!matches_suffix("", "_test.c"));
/// ```
pub fn matches_suffix(name: &str, suffix: &str) -> bool {
    if name.is_empty() || suffix.is_empty() || suffix.len() > name.len() {
        return false;
    }
    name.as_bytes().ends_with(suffix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_suffix() {
        assert!(matches_suffix("math_test.c", "_test.c"));
        assert!(matches_suffix("_test.c", "_test.c"));
    }

    #[test]
    fn test_non_matching_suffix() {
        assert!(!matches_suffix("math.c", "_test.c"));
        assert!(!matches_suffix("math_test.h", "_test.c"));
        assert!(!matches_suffix("math_test.c.bak", "_test.c"));
    }

    #[test]
    fn test_empty_inputs_never_match() {
        assert!(!matches_suffix("", "_test.c"));
        assert!(!matches_suffix("math_test.c", ""));
        assert!(!matches_suffix("", ""));
    }

    #[test]
    fn test_suffix_longer_than_name() {
        assert!(!matches_suffix("t.c", "_test.c"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matches_suffix("math_TEST.c", "_test.c"));
        assert!(!matches_suffix("math_test.C", "_test.c"));
    }
}
