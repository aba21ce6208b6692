pub use crate::errors::SpecError;
pub use crate::report::{Counts, NodeKind, Report, Status};
pub use crate::runner::{RunState, Runner};
pub use crate::spec::{describe, describe_subject, Description};

pub mod errors;
pub mod expectation;
pub mod format;
pub mod location;
pub mod matchers;
pub mod prelude;
pub mod pretty;
pub mod report;
pub mod runner;
pub mod spec;
