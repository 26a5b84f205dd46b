//! Line-oriented discovery of `void test_*` declarations.
//!
//! The scanner is a lexical heuristic, not a C parser. A line counts as a test declaration when it
//! contains [`DECL_MARKER`]; the name is whatever identifier follows the return type up to the
//! opening parenthesis. Two modes exist:
//!
//! - [`ScanMode::Lexical`] takes every line that superficially matches, including lines inside comments
//!   or string literals.
//! - [`ScanMode::CommentAware`] blanks out comments and string/char literals first. For well-formed
//!   sources both modes discover the same names in the same order.
//!
//! ## Capacity
//!
//! At most [`ScanOptions::max_functions`] names are kept per file. Later names are dropped, each distinct
//! name counted once in [`ScanOutcome::truncated`]; nothing past the cap is ever declared or invoked.

use std::collections::HashSet;

use crate::conventions::{DECL_MARKER, DECL_RETURN_TYPE, MAX_FUNCTION_NAME_LEN, MAX_TEST_FUNCTIONS};

/// How much of C's lexical structure the scanner respects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Plain substring match on each line.
    #[default]
    Lexical,
    /// Ignore matches inside `//`, `/* */` comments and string/char literals.
    CommentAware,
}

/// Scanner settings.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub mode: ScanMode,
    /// Maximum number of functions kept per file.
    pub max_functions: usize,
    /// Name never treated as a test even when it matches (the summary hook).
    pub exclude: Option<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mode: ScanMode::Lexical,
            max_functions: MAX_TEST_FUNCTIONS,
            exclude: None,
        }
    }
}

impl ScanOptions {
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_functions(mut self, max: usize) -> Self {
        self.max_functions = max;
        self
    }

    pub fn with_exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude = Some(name.into());
        self
    }
}

/// A discovered test function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFunction {
    pub name: String,
    /// 1-based line of the declaration.
    pub line: usize,
}

/// Everything a scan produced, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub functions: Vec<TestFunction>,
    /// Distinct names dropped because the cap was reached.
    pub truncated: usize,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.name.as_str())
    }
}

/// Extract the declared test name from one line, if the line carries the marker.
///
/// ## Returns
/// - (`Option<&str>`): the identifier after `void`, cut at the first non-identifier character and at
///   [`MAX_FUNCTION_NAME_LEN`] bytes.
///
/// ## Examples
/// ```rust
/// use assertx_core::scan::declared_test_name;
/// assert_eq!(declared_test_name("void test_sum() {"), Some("test_sum"));
/// assert_eq!(declared_test_name("static void test_div (void)"), Some("test_div"));
/// assert_eq!(declared_test_name("void helper(void)"), None);
/// ```
pub fn declared_test_name(line: &str) -> Option<&str> {
    let marker_at = line.find(DECL_MARKER)?;
    let after_type = &line[marker_at + DECL_RETURN_TYPE.len()..];
    let until_paren = match after_type.find('(') {
        Some(end) => &after_type[..end],
        None => after_type,
    };
    let trimmed = until_paren.trim();
    let ident_len = trimmed
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
        .min(MAX_FUNCTION_NAME_LEN);
    let name = &trimmed[..ident_len];
    (!name.is_empty()).then_some(name)
}

/// Incremental scanner fed one line at a time.
///
/// Used directly when declarations must be streamed somewhere as they are found; otherwise see
/// [`scan_source`].
#[derive(Debug)]
pub struct Scanner {
    options: ScanOptions,
    line_no: usize,
    in_block_comment: bool,
    outcome: ScanOutcome,
    /// Names dropped at the cap, so a prototype and its definition count once.
    dropped: HashSet<String>,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            line_no: 0,
            in_block_comment: false,
            outcome: ScanOutcome::default(),
            dropped: HashSet::new(),
        }
    }

    /// Scan the next line; returns the function it declared, if one was accepted.
    pub fn feed_line(&mut self, line: &str) -> Option<&TestFunction> {
        self.line_no += 1;

        let name = match self.options.mode {
            ScanMode::Lexical => declared_test_name(line).map(str::to_string),
            ScanMode::CommentAware => {
                let code = self.blank_comments_and_literals(line);
                declared_test_name(&code).map(str::to_string)
            }
        }?;

        if self.options.exclude.as_deref() == Some(name.as_str()) {
            return None;
        }
        // A prototype followed by its definition is one test.
        if self.outcome.functions.iter().any(|f| f.name == name) {
            return None;
        }
        if self.outcome.functions.len() >= self.options.max_functions {
            if self.dropped.insert(name) {
                self.outcome.truncated += 1;
            }
            return None;
        }

        self.outcome.functions.push(TestFunction {
            name,
            line: self.line_no,
        });
        self.outcome.functions.last()
    }

    pub fn finish(self) -> ScanOutcome {
        self.outcome
    }

    /// Replace comment and literal contents with spaces, keeping column positions.
    fn blank_comments_and_literals(&mut self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut chars = line.chars().peekable();
        let mut quote: Option<char> = None;

        while let Some(c) = chars.next() {
            if self.in_block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_block_comment = false;
                    out.push_str("  ");
                } else {
                    out.push(' ');
                }
                continue;
            }

            if let Some(q) = quote {
                if c == '\\' {
                    out.push(' ');
                    if chars.next().is_some() {
                        out.push(' ');
                    }
                } else if c == q {
                    quote = None;
                    out.push(c);
                } else {
                    out.push(' ');
                }
                continue;
            }

            match c {
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    self.in_block_comment = true;
                    out.push_str("  ");
                }
                '"' | '\'' => {
                    quote = Some(c);
                    out.push(c);
                }
                _ => out.push(c),
            }
        }

        out
    }
}

/// Scan a whole source text.
pub fn scan_source(source: &str, options: &ScanOptions) -> ScanOutcome {
    let mut scanner = Scanner::new(options.clone());
    for line in source.lines() {
        scanner.feed_line(line);
    }
    scanner.finish()
}
