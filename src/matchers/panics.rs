//! Panic matchers.
//!
//! Invoking the expectation's thunk is modeled explicitly: the call is made
//! under `catch_unwind` and any raised condition becomes a tagged
//! [`PanicOutcome`], so matching never depends on ambient unwinding. The
//! matchers here consume that outcome like any other actual value.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use super::Matcher;

/// What happened when the thunk was invoked.
pub enum PanicOutcome<R> {
    Returned(R),
    Panicked(PanicPayload),
}

/// The payload carried out of a captured panic.
pub struct PanicPayload {
    inner: Box<dyn Any + Send>,
}

impl PanicPayload {
    pub(crate) fn new(inner: Box<dyn Any + Send>) -> Self {
        Self { inner }
    }

    /// The payload as text, when it is one of the two string payload shapes
    /// produced by `panic!`.
    pub fn text(&self) -> Option<&str> {
        self.inner
            .downcast_ref::<&'static str>()
            .copied()
            .or_else(|| self.inner.downcast_ref::<String>().map(String::as_str))
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Human-readable rendering for messages and error reports.
    pub fn describe(&self) -> String {
        match self.text() {
            Some(text) => text.to_string(),
            None => "<non-string panic payload>".to_string(),
        }
    }
}

/// Invokes the thunk, capturing any panic as a tagged outcome.
pub(crate) fn capture<R>(thunk: impl FnOnce() -> R) -> PanicOutcome<R> {
    match panic::catch_unwind(AssertUnwindSafe(thunk)) {
        Ok(value) => PanicOutcome::Returned(value),
        Err(payload) => PanicOutcome::Panicked(PanicPayload::new(payload)),
    }
}

fn inspect_outcome<R>(_outcome: &PanicOutcome<R>) -> String {
    "the given closure".to_string()
}

pub struct Panics;

impl<R> Matcher<PanicOutcome<R>> for Panics {
    fn matches(&self, actual: &PanicOutcome<R>) -> bool {
        matches!(actual, PanicOutcome::Panicked(_))
    }

    fn description(&self) -> String {
        "panic".to_string()
    }

    fn inspect_actual(&self, actual: &PanicOutcome<R>) -> String {
        inspect_outcome(actual)
    }
}

pub struct PanicsWith {
    expected: String,
}

impl PanicsWith {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl<R> Matcher<PanicOutcome<R>> for PanicsWith {
    fn matches(&self, actual: &PanicOutcome<R>) -> bool {
        match actual {
            PanicOutcome::Panicked(payload) => payload.text() == Some(self.expected.as_str()),
            PanicOutcome::Returned(_) => false,
        }
    }

    fn description(&self) -> String {
        format!("panic with {:?}", self.expected)
    }

    fn inspect_actual(&self, actual: &PanicOutcome<R>) -> String {
        inspect_outcome(actual)
    }

    fn failure_message(&self, actual: &PanicOutcome<R>) -> String {
        match actual {
            PanicOutcome::Panicked(payload) => format!(
                "expected {} to {}, but it panicked with {:?}",
                self.inspect_actual(actual),
                Matcher::<PanicOutcome<R>>::description(self),
                payload.describe()
            ),
            PanicOutcome::Returned(_) => format!(
                "expected {} to {}, but it returned normally",
                self.inspect_actual(actual),
                Matcher::<PanicOutcome<R>>::description(self)
            ),
        }
    }
}

pub struct PanicsOf<T> {
    _payload: PhantomData<fn() -> T>,
}

impl<T> PanicsOf<T> {
    pub fn new() -> Self {
        Self {
            _payload: PhantomData,
        }
    }
}

impl<T> Default for PanicsOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, T: 'static> Matcher<PanicOutcome<R>> for PanicsOf<T> {
    fn matches(&self, actual: &PanicOutcome<R>) -> bool {
        match actual {
            PanicOutcome::Panicked(payload) => payload.downcast_ref::<T>().is_some(),
            PanicOutcome::Returned(_) => false,
        }
    }

    fn description(&self) -> String {
        format!("panic with a payload of type {}", std::any::type_name::<T>())
    }

    fn inspect_actual(&self, actual: &PanicOutcome<R>) -> String {
        inspect_outcome(actual)
    }
}

impl<R> fmt::Debug for PanicOutcome<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanicOutcome::Returned(_) => write!(f, "PanicOutcome::Returned(..)"),
            PanicOutcome::Panicked(payload) => {
                write!(f, "PanicOutcome::Panicked({:?})", payload.describe())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_tags_a_normal_return() {
        match capture(|| 42) {
            PanicOutcome::Returned(v) => assert_eq!(v, 42),
            PanicOutcome::Panicked(_) => panic!("expected a normal return"),
        }
    }

    #[test]
    fn capture_tags_a_panic_with_its_payload() {
        let outcome = capture(|| -> i32 { panic!("boom") });
        assert!(Panics.matches(&outcome));
        assert!(PanicsWith::new("boom").matches(&outcome));
        assert!(!PanicsWith::new("other").matches(&outcome));
    }

    #[test]
    fn string_and_str_payloads_both_read_as_text() {
        let from_str = capture(|| -> () { panic!("literal") });
        let from_string = capture(|| -> () { panic!("{}", "formatted") });
        assert!(PanicsWith::new("literal").matches(&from_str));
        assert!(PanicsWith::new("formatted").matches(&from_string));
    }

    #[test]
    fn typed_payload_detection() {
        let outcome = capture(|| -> () { std::panic::panic_any(7_i32) });
        assert!(PanicsOf::<i32>::new().matches(&outcome));
        assert!(!PanicsOf::<String>::new().matches(&outcome));
    }

    #[test]
    fn no_panic_fails_the_panic_matchers() {
        let outcome = capture(|| 1);
        assert!(!Panics.matches(&outcome));
        assert!(!PanicsWith::new("boom").matches(&outcome));
    }
}
