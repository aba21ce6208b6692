//! The report tree: structured outcomes mirroring the spec tree.
//!
//! Every run of a description tree produces a fresh `Report` tree. Reports
//! are immutable once returned to their parent and are consumed read-only by
//! formatters, so concurrent re-runs against the same frozen spec tree never
//! share outcome state.

use serde::Serialize;

use crate::errors::SpecError;
use crate::location::SourceLocation;

/// Outcome of a single node.
///
/// `Errored` is reserved for examples whose block panicked (and for the leaf
/// recording the panic itself); containers fold it into `Failed` so that the
/// aggregation rule stays two-valued above example granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
    Pending,
    Errored,
}

/// What kind of spec-tree node a report mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A description/context container, or the suite root.
    Group,
    /// An `it` example; the unit counted by [`Counts`].
    Example,
    /// One evaluated expectation inside an example.
    Expectation,
}

/// A single node in the report tree.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kind: NodeKind,
    pub status: Status,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub children: Vec<Report>,
}

impl Report {
    pub(crate) fn leaf(
        kind: NodeKind,
        status: Status,
        description: String,
        message: Option<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        Self {
            kind,
            status,
            description,
            message,
            location,
            children: Vec::new(),
        }
    }

    /// Builds a container node, deriving its status from its children.
    pub(crate) fn group(
        description: String,
        location: Option<SourceLocation>,
        children: Vec<Report>,
    ) -> Self {
        let status = aggregate_status(&children);
        Self {
            kind: NodeKind::Group,
            status,
            description,
            message: None,
            location,
            children,
        }
    }

    /// Flattened example counts for the subtree rooted here.
    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        counts.absorb(self);
        counts
    }

    /// All failed or errored leaves in declaration order, for summaries.
    pub fn failures(&self) -> Vec<&Report> {
        let mut found = Vec::new();
        self.collect_failures(&mut found);
        found
    }

    fn collect_failures<'r>(&'r self, found: &mut Vec<&'r Report>) {
        if self.children.is_empty() && matches!(self.status, Status::Failed | Status::Errored) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_failures(found);
        }
    }

    /// Serializes the tree for machine-readable hand-off to formatters.
    pub fn to_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Container aggregation rule: failed (or errored) descendants win, then
/// pending, then passed. A container with no children passes vacuously;
/// examples get the distinct pending-when-empty treatment before this rule
/// applies.
pub(crate) fn aggregate_status(children: &[Report]) -> Status {
    let mut any_pending = false;
    for child in children {
        match child.status {
            Status::Failed | Status::Errored => return Status::Failed,
            Status::Pending => any_pending = true,
            Status::Passed => {}
        }
    }
    if any_pending {
        Status::Pending
    } else {
        Status::Passed
    }
}

/// Flattened per-example tallies, used for the process-boundary pass/fail
/// signal. Only [`NodeKind::Example`] nodes are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub examples: usize,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
    pub errored: usize,
}

impl Counts {
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.errored > 0
    }

    fn absorb(&mut self, report: &Report) {
        if report.kind == NodeKind::Example {
            self.examples += 1;
            match report.status {
                Status::Passed => self.passed += 1,
                Status::Failed => self.failed += 1,
                Status::Pending => self.pending += 1,
                Status::Errored => self.errored += 1,
            }
        }
        for child in &report.children {
            self.absorb(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(status: Status) -> Report {
        Report::leaf(NodeKind::Example, status, "ex".into(), None, None)
    }

    #[test]
    fn failed_descendant_fails_the_container() {
        let group = Report::group(
            "g".into(),
            None,
            vec![example(Status::Passed), example(Status::Failed)],
        );
        assert_eq!(group.status, Status::Failed);
    }

    #[test]
    fn errored_descendant_folds_to_failed_in_containers() {
        let group = Report::group("g".into(), None, vec![example(Status::Errored)]);
        assert_eq!(group.status, Status::Failed);
    }

    #[test]
    fn pending_propagates_distinctly_from_failure() {
        let group = Report::group(
            "g".into(),
            None,
            vec![example(Status::Passed), example(Status::Pending)],
        );
        assert_eq!(group.status, Status::Pending);
    }

    #[test]
    fn counts_tally_examples_by_status() {
        let group = Report::group(
            "g".into(),
            None,
            vec![
                example(Status::Passed),
                example(Status::Failed),
                example(Status::Pending),
                example(Status::Errored),
            ],
        );
        let counts = group.counts();
        assert_eq!(counts.examples, 4);
        assert_eq!(counts.passed, 1);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.errored, 1);
        assert!(counts.has_failures());
    }
}
