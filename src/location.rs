//! Source positions carried on spec and report nodes.
//!
//! A [`SourceLocation`] is captured at the call site via `#[track_caller]`,
//! so expectations and examples remember where in the spec source they were
//! declared. It renders as `file:line` for failure summaries.

use std::fmt;

use serde::Serialize;

/// A captured `file:line` position from the spec source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Captures the caller's source position.
    #[track_caller]
    pub fn capture() -> Self {
        let caller = std::panic::Location::caller();
        Self {
            file: caller.file(),
            line: caller.line(),
            column: caller.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
