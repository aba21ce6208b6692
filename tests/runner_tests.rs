//! Runner behavior: state machine, suite aggregation, fail-fast, and the
//! formatter boundary.

mod common;

use common::example_statuses;
use respec::prelude::*;

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn running_an_empty_suite_is_a_structural_error() {
        let mut runner = Runner::new();
        let result = runner.run();
        assert!(matches!(result, Err(SpecError::EmptySuite)));
        assert_eq!(runner.state(), RunState::NotStarted);
        assert!(runner.report().is_none());
    }

    #[test]
    fn run_transitions_to_completed_and_is_queryable() {
        let spec = describe("one", |ctx| {
            ctx.it("passes", |scope| scope.expect(1).to(equal(1)));
        });

        let mut runner = Runner::new();
        assert_eq!(runner.state(), RunState::NotStarted);
        runner.add_spec(&spec);
        runner.run().expect("non-empty suite");
        assert_eq!(runner.state(), RunState::Completed);
        assert!(runner.report().is_some());
        assert!(runner.succeeded());
    }

    #[test]
    fn succeeded_is_false_before_any_run() {
        let runner = Runner::new();
        assert!(!runner.succeeded());
    }

    #[test]
    fn reruns_are_independent() {
        let spec = describe("stable", |ctx| {
            ctx.it("passes", |scope| scope.expect(1).to(equal(1)));
        });

        let mut runner = Runner::new();
        runner.add_spec(&spec);
        let first = runner.run().expect("run").to_json().expect("json");
        let second = runner.run().expect("run").to_json().expect("json");
        assert_eq!(first, second);
        assert_eq!(runner.counts().examples, 1);
    }
}

#[cfg(test)]
mod suite_tests {
    use super::*;

    #[test]
    fn multiple_specs_fold_into_one_suite_report() {
        let passing = describe("passing", |ctx| {
            ctx.it("ok", |scope| scope.expect(1).to(equal(1)));
        });
        let failing = describe("failing", |ctx| {
            ctx.it("bad", |scope| scope.expect(1).to(equal(2)));
        });

        let mut runner = Runner::new();
        runner.add_spec(&passing).add_spec(&failing);
        let report = runner.run().expect("non-empty suite");

        assert_eq!(report.description, "suite");
        assert_eq!(report.status, Status::Failed);
        assert_eq!(report.children.len(), 2);

        let counts = runner.counts();
        assert_eq!(counts.examples, 2);
        assert_eq!(counts.passed, 1);
        assert_eq!(counts.failed, 1);
        assert!(counts.has_failures());
        assert!(!runner.succeeded());
    }

    #[test]
    fn fail_fast_skips_later_examples_but_keeps_the_tree_complete() {
        let spec = describe("halting", |ctx| {
            ctx.it("fails first", |scope| scope.expect(1).to(equal(2)));
            ctx.it("never runs", |scope| scope.expect(1).to(equal(1)));
            ctx.it("never runs either", |scope| scope.expect(2).to(equal(2)));
        });

        let mut runner = Runner::new();
        runner.add_spec(&spec).fail_fast(true);
        let report = runner.run().expect("non-empty suite");

        assert_eq!(
            example_statuses(report),
            vec![Status::Failed, Status::Pending, Status::Pending]
        );
        let skipped = &report.children[0].children[1];
        assert_eq!(skipped.message.as_deref(), Some("not run (fail-fast)"));
    }

    #[test]
    fn fail_fast_halts_across_spec_roots() {
        let failing = describe("first root", |ctx| {
            ctx.it("fails", |scope| scope.expect(1).to(equal(2)));
        });
        let skipped = describe("second root", |ctx| {
            ctx.it("skipped", |scope| scope.expect(1).to(equal(1)));
        });

        let mut runner = Runner::new();
        runner.add_spec(&failing).add_spec(&skipped).fail_fast(true);
        let report = runner.run().expect("non-empty suite");
        assert_eq!(
            example_statuses(report),
            vec![Status::Failed, Status::Pending]
        );
    }
}

#[cfg(test)]
mod formatter_tests {
    use super::*;

    fn failing_suite_report() -> Report {
        describe("math", |ctx| {
            ctx.it("adds", |scope| scope.expect(2 + 2).to(equal(5)));
            ctx.it("still adds", |scope| scope.expect(2 + 2).to(equal(4)));
        })
        .run()
    }

    #[test]
    fn failure_summary_writes_into_a_capture_buffer() {
        let report = failing_suite_report();
        let mut formatter = FailureSummary::new(OutputBuffer::new());
        formatter.format(&report).expect("buffer writes cannot fail");

        let output = formatter.sink.as_str();
        assert!(output.contains("expected 4 to equal 5"));
        assert!(output.contains("2 examples, 1 failures, 0 errors, 0 pending"));
        assert!(output.contains("runner_tests.rs"));
    }

    #[test]
    fn outline_renders_the_whole_tree() {
        let report = failing_suite_report();
        let mut buffer = OutputBuffer::new();
        write_outline(&report, &mut buffer);

        let output = buffer.as_str();
        assert!(output.contains("math [FAILED]"));
        assert!(output.contains("adds [FAILED]"));
        assert!(output.contains("still adds [ok]"));
    }

    #[test]
    fn reports_serialize_for_machine_consumption() {
        let report = failing_suite_report();
        let json = report.to_json().expect("serializable report");
        assert!(json.contains("\"status\": \"failed\""));
        assert!(json.contains("\"kind\": \"example\""));
        assert!(json.contains("expected 4 to equal 5"));
    }

    #[test]
    fn expectation_locations_point_at_the_spec_source() {
        let report = failing_suite_report();
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        let location = failures[0].location.expect("a captured location");
        assert!(location.file.ends_with("runner_tests.rs"));
    }
}
