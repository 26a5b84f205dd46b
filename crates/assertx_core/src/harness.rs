//! C harness synthesis.
//!
//! A harness textually includes the test source, re-declares every discovered test function and
//! defines a `main` that calls them in discovery order. The text is produced in three pieces so a
//! caller can stream forward declarations while scanning:
//!
//! 1. [`prologue`] - banner, `<stdio.h>`, and the include of the test source
//! 2. [`forward_declaration`] - one line per function
//! 3. [`entry_point`] - `main` with one progress line and one call per function
//!
//! [`synthesize`] joins the pieces for callers that already hold the full function list.

use crate::conventions::ENTRYPOINT_NAME;
use crate::scan::TestFunction;

/// Harness settings.
#[derive(Debug, Clone, Default)]
pub struct HarnessOptions {
    /// Function called after the last test, before `main` returns.
    ///
    /// The hook is expected to terminate the process with a nonzero status when assertions failed,
    /// since the test runner only looks at the exit status.
    pub summary_hook: Option<String>,
}

impl HarnessOptions {
    pub fn with_summary_hook(mut self, hook: impl Into<String>) -> Self {
        self.summary_hook = Some(hook.into());
        self
    }
}

/// Banner and include directives. `include_path` is used verbatim and should already use `/`.
pub fn prologue(include_path: &str) -> String {
    format!(
        "/* Generated by assertx. Do not edit; this file is removed after the run. */\n\
         #include <stdio.h>\n\
         #include \"{include_path}\"\n\n"
    )
}

/// Declaration of one test function.
pub fn forward_declaration(name: &str) -> String {
    format!("void {name}();\n")
}

/// `main` calling every function once, in the given order.
pub fn entry_point(functions: &[TestFunction], options: &HarnessOptions) -> String {
    let mut out = format!("\nint {ENTRYPOINT_NAME}(void)\n{{\n");
    for function in functions {
        out.push_str(&format!("    printf(\"\\n\u{25b6} Running {}\\n\");\n", function.name));
        out.push_str(&format!("    {}();\n", function.name));
    }
    if let Some(hook) = &options.summary_hook {
        out.push_str(&format!("    {hook}();\n"));
    }
    out.push_str("    return 0;\n}\n");
    out
}

/// Full harness text.
///
/// ## Notes
/// - Callers must not pass an empty list; a file without tests is skipped before synthesis.
pub fn synthesize(include_path: &str, functions: &[TestFunction], options: &HarnessOptions) -> String {
    debug_assert!(!functions.is_empty(), "harness requested without test functions");

    let mut out = prologue(include_path);
    for function in functions {
        out.push_str(&forward_declaration(&function.name));
    }
    out.push_str(&entry_point(functions, options));
    out
}
