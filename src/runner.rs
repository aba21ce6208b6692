//! The traversal driver.
//!
//! A runner borrows one or more frozen description trees, walks them
//! depth-first in declaration order, and keeps the finished report around
//! for querying. It carries no cross-run state: running the same trees from
//! two independent runners produces independent reports.

use crate::errors::SpecError;
use crate::report::{Counts, Report};
use crate::spec::{Description, RunContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
}

pub struct Runner<'a> {
    specs: Vec<&'a Description>,
    state: RunState,
    fail_fast: bool,
    report: Option<Report>,
}

impl<'a> Runner<'a> {
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            state: RunState::NotStarted,
            fail_fast: false,
            report: None,
        }
    }

    /// Adds a root description to the suite. Order of addition is execution
    /// order.
    pub fn add_spec(&mut self, spec: &'a Description) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// Stops executing further examples after the first failure or error.
    /// Skipped examples still appear in the report, as pending.
    pub fn fail_fast(&mut self, enabled: bool) -> &mut Self {
        self.fail_fast = enabled;
        self
    }

    /// Walks every added spec and produces the suite report. Running an
    /// empty suite is a structural error; re-running a completed runner
    /// starts an independent traversal.
    pub fn run(&mut self) -> Result<&Report, SpecError> {
        if self.specs.is_empty() {
            return Err(SpecError::EmptySuite);
        }
        self.state = RunState::Running;

        let mut ctx = RunContext {
            fail_fast: self.fail_fast,
            halted: false,
        };
        let children: Vec<Report> = self
            .specs
            .iter()
            .map(|spec| spec.run_inner(&mut ctx, &Default::default()))
            .collect();

        self.state = RunState::Completed;
        Ok(&*self
            .report
            .insert(Report::group("suite".to_string(), None, children)))
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The finished report, once a run has completed.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Flattened example counts for the last run.
    pub fn counts(&self) -> Counts {
        self.report
            .as_ref()
            .map(Report::counts)
            .unwrap_or_default()
    }

    /// The aggregate pass/fail signal: true once a run completed with no
    /// failed or errored examples. Exit-code mapping is the caller's
    /// concern.
    pub fn succeeded(&self) -> bool {
        self.report.is_some() && !self.counts().has_failures()
    }
}

impl<'a> Default for Runner<'a> {
    fn default() -> Self {
        Self::new()
    }
}
