//! Shared helpers for the integration suites.
#![allow(dead_code)] // each suite uses a different subset

use respec::prelude::*;

/// Builds and runs a single description tree, returning its report.
pub fn run_described(label: &str, body: impl FnOnce(&mut Context)) -> Report {
    describe(label, body).run()
}

/// Statuses of the example nodes in declaration order.
pub fn example_statuses(report: &Report) -> Vec<Status> {
    let mut statuses = Vec::new();
    collect_example_statuses(report, &mut statuses);
    statuses
}

fn collect_example_statuses(report: &Report, statuses: &mut Vec<Status>) {
    if report.kind == NodeKind::Example {
        statuses.push(report.status);
    }
    for child in &report.children {
        collect_example_statuses(child, statuses);
    }
}

/// The first failure message found anywhere in the tree.
pub fn first_failure_message(report: &Report) -> Option<String> {
    report
        .failures()
        .first()
        .and_then(|failure| failure.message.clone())
}
