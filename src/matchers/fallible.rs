//! Matchers over fallible values.
//!
//! The success-or-failure sum type is consumed through the [`Optional`] and
//! [`Fallible`] capability traits rather than any concrete type, so the
//! matchers work for `Result`, `Option`, and any user type that exposes the
//! same accessors.

use std::fmt;

use super::{inspect, Matcher};

/// Capability: may hold a success payload.
pub trait Optional {
    type Value;

    fn value(&self) -> Option<&Self::Value>;
}

/// Capability: may hold a failure payload.
pub trait Fallible: Optional {
    type Error;

    fn error(&self) -> Option<&Self::Error>;

    fn is_failure(&self) -> bool {
        self.error().is_some()
    }
}

impl<T> Optional for Option<T> {
    type Value = T;

    fn value(&self) -> Option<&T> {
        self.as_ref()
    }
}

impl<T, E> Optional for Result<T, E> {
    type Value = T;

    fn value(&self) -> Option<&T> {
        self.as_ref().ok()
    }
}

impl<T, E> Fallible for Result<T, E> {
    type Error = E;

    fn error(&self) -> Option<&E> {
        self.as_ref().err()
    }
}

pub struct Fail;

/// Matches when the fallible actual is in its failure state.
pub fn fail() -> Fail {
    Fail
}

impl<A> Matcher<A> for Fail
where
    A: Fallible + fmt::Debug,
{
    fn matches(&self, actual: &A) -> bool {
        actual.is_failure()
    }

    fn description(&self) -> String {
        "fail".to_string()
    }

    fn inspect_actual(&self, actual: &A) -> String {
        inspect(actual)
    }
}

pub struct FailWith<E> {
    expected: E,
}

/// Matches when the actual failed with an error equal to `expected`.
pub fn fail_with<E>(expected: E) -> FailWith<E> {
    FailWith { expected }
}

impl<A, E> Matcher<A> for FailWith<E>
where
    A: Fallible + fmt::Debug,
    A::Error: PartialEq<E>,
    E: fmt::Debug,
{
    fn matches(&self, actual: &A) -> bool {
        actual.error().is_some_and(|error| *error == self.expected)
    }

    fn description(&self) -> String {
        format!("fail with {}", inspect(&self.expected))
    }

    fn inspect_actual(&self, actual: &A) -> String {
        inspect(actual)
    }
}

pub struct HaveValue;

/// Matches when the actual holds a success payload.
pub fn have_value() -> HaveValue {
    HaveValue
}

impl<A> Matcher<A> for HaveValue
where
    A: Optional + fmt::Debug,
{
    fn matches(&self, actual: &A) -> bool {
        actual.value().is_some()
    }

    fn description(&self) -> String {
        "have a value".to_string()
    }

    fn inspect_actual(&self, actual: &A) -> String {
        inspect(actual)
    }
}

pub struct HaveValueEqualTo<E> {
    expected: E,
}

/// Matches when the actual holds a success payload equal to `expected`.
pub fn have_value_equal_to<E>(expected: E) -> HaveValueEqualTo<E> {
    HaveValueEqualTo { expected }
}

impl<A, E> Matcher<A> for HaveValueEqualTo<E>
where
    A: Optional + fmt::Debug,
    A::Value: PartialEq<E>,
    E: fmt::Debug,
{
    fn matches(&self, actual: &A) -> bool {
        actual.value().is_some_and(|value| *value == self.expected)
    }

    fn description(&self) -> String {
        format!("have a value equal to {}", inspect(&self.expected))
    }

    fn inspect_actual(&self, actual: &A) -> String {
        inspect(actual)
    }
}

pub struct HaveError;

/// Matches when the actual holds a failure payload.
pub fn have_error() -> HaveError {
    HaveError
}

impl<A> Matcher<A> for HaveError
where
    A: Fallible + fmt::Debug,
{
    fn matches(&self, actual: &A) -> bool {
        actual.error().is_some()
    }

    fn description(&self) -> String {
        "have an error".to_string()
    }

    fn inspect_actual(&self, actual: &A) -> String {
        inspect(actual)
    }
}

pub struct HaveErrorEqualTo<E> {
    expected: E,
}

/// Matches when the actual holds a failure payload equal to `expected`.
pub fn have_error_equal_to<E>(expected: E) -> HaveErrorEqualTo<E> {
    HaveErrorEqualTo { expected }
}

impl<A, E> Matcher<A> for HaveErrorEqualTo<E>
where
    A: Fallible + fmt::Debug,
    A::Error: PartialEq<E>,
    E: fmt::Debug,
{
    fn matches(&self, actual: &A) -> bool {
        actual.error().is_some_and(|error| *error == self.expected)
    }

    fn description(&self) -> String {
        format!("have an error equal to {}", inspect(&self.expected))
    }

    fn inspect_actual(&self, actual: &A) -> String {
        inspect(actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_state_detection() {
        let err: Result<i32, &str> = Err("boom");
        let ok: Result<i32, &str> = Ok(3);
        assert!(fail().matches(&err));
        assert!(!fail().matches(&ok));
        assert!(fail_with("boom").matches(&err));
        assert!(!fail_with("other").matches(&err));
    }

    #[test]
    fn success_payload_detection() {
        let ok: Result<i32, &str> = Ok(3);
        assert!(have_value().matches(&ok));
        assert!(have_value_equal_to(3).matches(&ok));
        assert!(!have_value_equal_to(4).matches(&ok));
        assert!(have_value().matches(&Some(1)));
        assert!(!have_value().matches(&None::<i32>));
    }

    #[test]
    fn error_payload_detection() {
        let err: Result<i32, String> = Err("bad".to_string());
        assert!(have_error().matches(&err));
        assert!(have_error_equal_to("bad").matches(&err));
        assert!(!have_error_equal_to("good").matches(&err));
    }
}
