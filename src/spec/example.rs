//! Example leaves and the per-example execution scope.
//!
//! An example's block runs under panic capture: an escaping panic terminates
//! only that example, is recorded as an errored leaf, and traversal moves on
//! to the next sibling. The scope owns everything example-local (recorded
//! expectation reports and the fixture memo store) and is discarded when the
//! example ends.

use std::panic::{self, AssertUnwindSafe};

use crate::expectation::{BlockExpectation, Expectation};
use crate::location::SourceLocation;
use crate::matchers::panics::PanicPayload;
use crate::report::{aggregate_status, NodeKind, Report, Status};
use crate::spec::fixture::MemoStore;

/// Execution context handed to an example's block.
pub struct Scope {
    pub(crate) results: Vec<Report>,
    pub(crate) memo: MemoStore,
    generated_label: Option<String>,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self {
            results: Vec::new(),
            memo: MemoStore::new(),
            generated_label: None,
        }
    }

    /// Binds a direct value to the evaluation machinery.
    #[track_caller]
    pub fn expect<A>(&mut self, actual: A) -> Expectation<'_, A> {
        let location = SourceLocation::capture();
        Expectation::new(self, actual, location)
    }

    /// Binds a deferred thunk; it runs at assertion time under panic
    /// capture.
    #[track_caller]
    pub fn expect_fn<F, R>(&mut self, thunk: F) -> BlockExpectation<'_, F, R>
    where
        F: FnOnce() -> R,
    {
        let location = SourceLocation::capture();
        BlockExpectation::new(self, thunk, location)
    }

    /// Remembers the first expectation's sentence so unlabeled examples can
    /// describe themselves.
    pub(crate) fn note_description(&mut self, sentence: &str) {
        if self.generated_label.is_none() {
            self.generated_label = Some(sentence.to_string());
        }
    }

    pub(crate) fn push(&mut self, report: Report) {
        self.results.push(report);
    }
}

/// A leaf spec-tree node: one user block containing expectations.
pub(crate) struct It {
    pub(crate) label: Option<String>,
    pub(crate) location: SourceLocation,
    pub(crate) block: Box<dyn Fn(&mut Scope)>,
}

impl It {
    pub(crate) fn run(&self) -> Report {
        let mut scope = Scope::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.block)(&mut scope)));

        let Scope {
            mut results,
            generated_label,
            ..
        } = scope;

        if let Err(raw) = outcome {
            let payload = PanicPayload::new(raw);
            results.push(Report::leaf(
                NodeKind::Expectation,
                Status::Errored,
                "run without panicking".to_string(),
                Some(format!("panicked: {}", payload.describe())),
                Some(self.location),
            ));
        }

        let description = self
            .label
            .clone()
            .or(generated_label)
            .unwrap_or_else(|| "(unnamed example)".to_string());
        let status = example_status(&results);
        let message = if results.is_empty() {
            Some("no expectations were evaluated".to_string())
        } else {
            None
        };

        Report {
            kind: NodeKind::Example,
            status,
            description,
            message,
            location: Some(self.location),
            children: results,
        }
    }

    /// Report for an example that was never executed (fail-fast).
    pub(crate) fn skipped(&self, reason: &str) -> Report {
        Report::leaf(
            NodeKind::Example,
            Status::Pending,
            self.label
                .clone()
                .unwrap_or_else(|| "(unnamed example)".to_string()),
            Some(reason.to_string()),
            Some(self.location),
        )
    }
}

/// An example with zero evaluated expectations is pending, not vacuously
/// passed; a captured panic takes precedence over everything else.
fn example_status(results: &[Report]) -> Status {
    if results.iter().any(|r| r.status == Status::Errored) {
        Status::Errored
    } else if results.is_empty() {
        Status::Pending
    } else {
        aggregate_status(results)
    }
}
