//! Unified error type for everything that is *not* a test outcome.
//!
//! Assertion failures, captured panics, and pending examples are data: they
//! live in the [`Report`](crate::report::Report) tree and never surface as a
//! `SpecError`. This type covers the remaining failure modes: structural
//! misuse of the framework itself, I/O at the formatter boundary, and
//! serialization of a finished report.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SpecError {
    /// `Runner::run` was invoked before any spec tree was added. The suite
    /// itself is malformed, so this aborts before any execution begins.
    #[error("spec suite is empty: no descriptions were added before run()")]
    #[diagnostic(help("add at least one root with `Runner::add_spec` before running"))]
    EmptySuite,

    /// A `match_regex`/`match_partial` matcher was given a pattern that does
    /// not compile. Surfaced in the failing expectation's message.
    #[error("invalid pattern /{pattern}/ given to a match matcher")]
    #[diagnostic(help("the pattern must be valid regex syntax"))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to write report output")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report")]
    Serialize(#[from] serde_json::Error),
}
