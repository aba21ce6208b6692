//! Binding an actual value to a matcher and asserting on the outcome.
//!
//! An expectation wraps either a direct value or a deferred thunk whose
//! panic, if any, is captured rather than propagated. The `to`/`to_not`
//! entry points consume the expectation, so each one yields at most one
//! report. Interpretation of the matcher's boolean is delegated to the
//! positive/negative handler strategies, which also select which failure
//! message to surface.

use std::marker::PhantomData;

use crate::location::SourceLocation;
use crate::matchers::panics::{capture, PanicOutcome, Panics, PanicsOf, PanicsWith};
use crate::matchers::Matcher;
use crate::report::{NodeKind, Report, Status};
use crate::spec::example::Scope;

/// Strategy interpreting a matcher's boolean into success/failure and
/// choosing the failure message.
pub trait Handler {
    fn verb() -> &'static str;

    /// `None` on success, `Some(message)` on failure.
    fn handle<A, M: Matcher<A>>(matcher: &M, actual: &A) -> Option<String>;
}

pub struct PositiveHandler;

impl Handler for PositiveHandler {
    fn verb() -> &'static str {
        "should"
    }

    fn handle<A, M: Matcher<A>>(matcher: &M, actual: &A) -> Option<String> {
        if matcher.matches(actual) {
            None
        } else {
            Some(matcher.failure_message(actual))
        }
    }
}

pub struct NegativeHandler;

impl Handler for NegativeHandler {
    fn verb() -> &'static str {
        "should not"
    }

    fn handle<A, M: Matcher<A>>(matcher: &M, actual: &A) -> Option<String> {
        if !matcher.matches(actual) {
            None
        } else {
            Some(matcher.failure_message_negated(actual))
        }
    }
}

/// Evaluates one matcher against one actual and records the leaf report.
pub(crate) fn apply<H, A, M>(
    scope: &mut Scope,
    location: SourceLocation,
    actual: &A,
    matcher: &M,
    override_message: Option<&str>,
) where
    H: Handler,
    M: Matcher<A>,
{
    let sentence = format!("{} {}", H::verb(), matcher.description());
    scope.note_description(&sentence);
    let report = match H::handle(matcher, actual) {
        None => Report::leaf(
            NodeKind::Expectation,
            Status::Passed,
            sentence,
            None,
            Some(location),
        ),
        Some(message) => {
            let message = override_message.map_or(message, str::to_string);
            Report::leaf(
                NodeKind::Expectation,
                Status::Failed,
                sentence,
                Some(message),
                Some(location),
            )
        }
    };
    scope.push(report);
}

/// Records a leaf for a panic that no panic matcher asked for.
pub(crate) fn record_unexpected_panic(scope: &mut Scope, location: SourceLocation, detail: String) {
    scope.push(Report::leaf(
        NodeKind::Expectation,
        Status::Errored,
        "evaluate without panicking".to_string(),
        Some(detail),
        Some(location),
    ));
}

/// An expectation over a direct value.
pub struct Expectation<'s, A> {
    scope: &'s mut Scope,
    actual: A,
    location: SourceLocation,
    override_message: Option<String>,
}

impl<'s, A> Expectation<'s, A> {
    pub(crate) fn new(scope: &'s mut Scope, actual: A, location: SourceLocation) -> Self {
        Self {
            scope,
            actual,
            location,
            override_message: None,
        }
    }

    /// Replaces the matcher-supplied failure message.
    pub fn msg(mut self, message: impl Into<String>) -> Self {
        self.override_message = Some(message.into());
        self
    }

    /// Asserts positively: the matcher must match.
    pub fn to<M: Matcher<A>>(self, matcher: M) {
        apply::<PositiveHandler, A, M>(
            self.scope,
            self.location,
            &self.actual,
            &matcher,
            self.override_message.as_deref(),
        );
    }

    /// Asserts negatively: the matcher must not match.
    pub fn to_not<M: Matcher<A>>(self, matcher: M) {
        apply::<NegativeHandler, A, M>(
            self.scope,
            self.location,
            &self.actual,
            &matcher,
            self.override_message.as_deref(),
        );
    }
}

/// An expectation over a deferred thunk. The thunk runs once, at assertion
/// time, under panic capture.
pub struct BlockExpectation<'s, F, R> {
    scope: &'s mut Scope,
    thunk: F,
    location: SourceLocation,
    override_message: Option<String>,
    _returns: PhantomData<fn() -> R>,
}

impl<'s, F, R> BlockExpectation<'s, F, R>
where
    F: FnOnce() -> R,
{
    pub(crate) fn new(scope: &'s mut Scope, thunk: F, location: SourceLocation) -> Self {
        Self {
            scope,
            thunk,
            location,
            override_message: None,
            _returns: PhantomData,
        }
    }

    /// Replaces the matcher-supplied failure message.
    pub fn msg(mut self, message: impl Into<String>) -> Self {
        self.override_message = Some(message.into());
        self
    }

    /// Asserts positively against the thunk's returned value. A panic here
    /// was not asked for, so it is recorded as an errored outcome.
    pub fn to<M: Matcher<R>>(self, matcher: M) {
        self.eval_value::<PositiveHandler, M>(matcher);
    }

    /// Asserts negatively against the thunk's returned value.
    pub fn to_not<M: Matcher<R>>(self, matcher: M) {
        self.eval_value::<NegativeHandler, M>(matcher);
    }

    /// Asserts that invoking the thunk panics, with any payload.
    pub fn to_panic(self) {
        self.eval_outcome::<PositiveHandler, Panics>(Panics);
    }

    /// Asserts that invoking the thunk does not panic.
    pub fn to_not_panic(self) {
        self.eval_outcome::<NegativeHandler, Panics>(Panics);
    }

    /// Asserts that invoking the thunk panics with a payload whose text
    /// equals `expected`.
    pub fn to_panic_with(self, expected: impl Into<String>) {
        self.eval_outcome::<PositiveHandler, PanicsWith>(PanicsWith::new(expected));
    }

    /// Asserts that invoking the thunk panics with a payload of type `T`.
    pub fn to_panic_of<T: 'static>(self) {
        self.eval_outcome::<PositiveHandler, PanicsOf<T>>(PanicsOf::new());
    }

    fn eval_value<H: Handler, M: Matcher<R>>(self, matcher: M) {
        let Self {
            scope,
            thunk,
            location,
            override_message,
            ..
        } = self;
        match capture(thunk) {
            PanicOutcome::Returned(value) => {
                apply::<H, R, M>(scope, location, &value, &matcher, override_message.as_deref());
            }
            PanicOutcome::Panicked(payload) => {
                record_unexpected_panic(
                    scope,
                    location,
                    format!("unexpectedly panicked: {}", payload.describe()),
                );
            }
        }
    }

    fn eval_outcome<H: Handler, M: Matcher<PanicOutcome<R>>>(self, matcher: M) {
        let Self {
            scope,
            thunk,
            location,
            override_message,
            ..
        } = self;
        let outcome = capture(thunk);
        apply::<H, PanicOutcome<R>, M>(
            scope,
            location,
            &outcome,
            &matcher,
            override_message.as_deref(),
        );
    }
}
