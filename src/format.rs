//! The formatter boundary.
//!
//! Formatters consume a finished report tree read-only; they cannot mutate
//! it or re-invoke any user block. Concrete renderers (TAP, JUnit, progress
//! consoles) live outside this crate; what is provided here is the
//! [`Formatter`] contract, the output sinks, and the failure summary the
//! runner-facing tooling shares.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::SpecError;
use crate::report::{Counts, Report, Status};

/// Consumes a finished report tree.
pub trait Formatter {
    fn format(&mut self, report: &Report) -> Result<(), SpecError>;
}

/// Line-oriented output destination.
pub trait OutputSink {
    fn emit(&mut self, line: &str);
}

/// Collects output into a string, for tests and programmatic capture.
pub struct OutputBuffer {
    buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, line: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(line);
    }
}

/// Writes each line to stdout.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// A formatter that writes every failed or errored leaf, then a tally line,
/// into its sink.
pub struct FailureSummary<S: OutputSink> {
    pub sink: S,
}

impl<S: OutputSink> FailureSummary<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: OutputSink> Formatter for FailureSummary<S> {
    fn format(&mut self, report: &Report) -> Result<(), SpecError> {
        write_failure_summary(report, &mut self.sink);
        Ok(())
    }
}

/// Emits one block per failed/errored leaf plus a final tally line.
pub fn write_failure_summary(report: &Report, sink: &mut dyn OutputSink) {
    for failure in report.failures() {
        let position = failure
            .location
            .map(|loc| loc.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        sink.emit(&format!("{position}: {}", failure.description));
        if let Some(message) = &failure.message {
            sink.emit(&format!("  {message}"));
        }
    }
    sink.emit(&tally_line(&report.counts()));
}

/// Prints the failure summary to stdout, failures in red, the way the
/// terse console output does.
pub fn print_failure_summary(report: &Report) -> Result<(), SpecError> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    for failure in report.failures() {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let position = failure
            .location
            .map(|loc| loc.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        writeln!(stdout, "{position}: {}", failure.description)?;
        if let Some(message) = &failure.message {
            writeln!(stdout, "  {message}")?;
        }
        let _ = stdout.reset();
    }

    let counts = report.counts();
    let color = if counts.has_failures() {
        Color::Red
    } else if counts.pending > 0 {
        Color::Yellow
    } else {
        Color::Green
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    writeln!(stdout, "{}", tally_line(&counts))?;
    let _ = stdout.reset();
    Ok(())
}

fn tally_line(counts: &Counts) -> String {
    format!(
        "{} examples, {} failures, {} errors, {} pending",
        counts.examples, counts.failed, counts.errored, counts.pending
    )
}

/// Emits the whole tree indented by depth, one line per node. Useful as a
/// plain-text rendering for capture buffers.
pub fn write_outline(report: &Report, sink: &mut dyn OutputSink) {
    write_outline_at(report, sink, 0);
}

fn write_outline_at(report: &Report, sink: &mut dyn OutputSink, depth: usize) {
    let marker = match report.status {
        Status::Passed => "ok",
        Status::Failed => "FAILED",
        Status::Pending => "pending",
        Status::Errored => "ERRORED",
    };
    sink.emit(&format!(
        "{:indent$}{} [{marker}]",
        "",
        report.description,
        indent = depth * 2
    ));
    for child in &report.children {
        write_outline_at(child, sink, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NodeKind;

    fn failed_example() -> Report {
        Report::group(
            "math".to_string(),
            None,
            vec![Report {
                kind: NodeKind::Example,
                status: Status::Failed,
                description: "adds".to_string(),
                message: None,
                location: None,
                children: vec![Report::leaf(
                    NodeKind::Expectation,
                    Status::Failed,
                    "should equal 5".to_string(),
                    Some("expected 4 to equal 5".to_string()),
                    None,
                )],
            }],
        )
    }

    #[test]
    fn summary_lists_failures_and_tallies() {
        let mut buffer = OutputBuffer::new();
        write_failure_summary(&failed_example(), &mut buffer);
        let output = buffer.as_str();
        assert!(output.contains("should equal 5"));
        assert!(output.contains("expected 4 to equal 5"));
        assert!(output.contains("1 examples, 1 failures, 0 errors, 0 pending"));
    }

    #[test]
    fn outline_indents_by_depth() {
        let mut buffer = OutputBuffer::new();
        write_outline(&failed_example(), &mut buffer);
        let output = buffer.as_str();
        assert!(output.contains("math [FAILED]"));
        assert!(output.contains("  adds [FAILED]"));
        assert!(output.contains("    should equal 5 [FAILED]"));
    }
}
