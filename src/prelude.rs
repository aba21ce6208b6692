//! One-stop import for spec authors.
//!
//! ```rust
//! use respec::prelude::*;
//!
//! let spec = describe("arithmetic", |ctx| {
//!     ctx.it("adds", |scope| {
//!         scope.expect(2 + 2).to(equal(4));
//!     });
//! });
//! let mut runner = Runner::new();
//! runner.add_spec(&spec);
//! assert!(runner.run().is_ok());
//! assert!(runner.succeeded());
//! ```

pub use crate::errors::SpecError;
pub use crate::expectation::{BlockExpectation, Expectation};
pub use crate::format::{
    print_failure_summary, write_failure_summary, write_outline, FailureSummary, Formatter,
    OutputBuffer, OutputSink, StdoutSink,
};
pub use crate::location::SourceLocation;
pub use crate::matchers::{
    be_between, be_greater_than, be_less_than, be_none, be_within, contain, end_with, equal, fail,
    fail_with, have_error, have_error_equal_to, have_value, have_value_equal_to, match_partial,
    match_regex, satisfy, start_with, Matcher, RangeMode,
};
pub use crate::report::{Counts, NodeKind, Report, Status};
pub use crate::runner::{RunState, Runner};
pub use crate::spec::{describe, describe_subject, Context, Description, Let, Scope, SubjectContext};
