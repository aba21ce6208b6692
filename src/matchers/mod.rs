//! The matcher library.
//!
//! Every matcher implements the one narrow [`Matcher`] contract: a pure
//! predicate over a borrowed actual value plus affirmative and negated
//! failure messages. Concrete matchers are independent implementations, not
//! a hierarchy; which one applies to which actual type is decided by trait
//! bounds at the call site that constructs the matcher.

use std::fmt;

use crate::pretty;

pub mod equal;
pub mod fallible;
pub mod numeric;
pub mod panics;
pub mod pattern;
pub mod satisfy;
pub mod sequence;

pub use equal::{equal, Equal};
pub use fallible::{
    fail, fail_with, have_error, have_error_equal_to, have_value, have_value_equal_to, Fail,
    FailWith, Fallible, HaveError, HaveErrorEqualTo, HaveValue, HaveValueEqualTo, Optional,
};
pub use numeric::{
    be_between, be_greater_than, be_less_than, be_within, BeBetween, BeGreaterThan, BeLessThan,
    BeWithin, BeWithinBuilder, RangeMode,
};
pub use panics::{PanicOutcome, PanicPayload, Panics, PanicsOf, PanicsWith};
pub use pattern::{match_partial, match_regex, MatchRegex};
pub use satisfy::{be_none, satisfy, BeNone, Satisfy};
pub use sequence::{
    contain, end_with, start_with, Contain, Containable, EndWith, HasPrefix, HasSuffix, StartWith,
};

/// A comparison/predicate strategy with affirmative and negated failure
/// messages.
///
/// `matches` must be pure with respect to the matcher's stored operands so
/// that repeated evaluation is deterministic. The actual value is only ever
/// borrowed, never mutated.
pub trait Matcher<A> {
    /// The success predicate.
    fn matches(&self, actual: &A) -> bool;

    /// A verb phrase describing the success condition, e.g. `equal 5`. Used
    /// in generated example descriptions and the default messages.
    fn description(&self) -> String;

    /// How the actual value reads inside a failure message.
    fn inspect_actual(&self, actual: &A) -> String;

    /// Message used when a positive expectation fails.
    fn failure_message(&self, actual: &A) -> String {
        format!(
            "expected {} to {}",
            self.inspect_actual(actual),
            self.description()
        )
    }

    /// Message used when a negative expectation unexpectedly succeeds.
    fn failure_message_negated(&self, actual: &A) -> String {
        format!(
            "expected {} to not {}",
            self.inspect_actual(actual),
            self.description()
        )
    }
}

/// Default actual-value rendering shared by matchers over `Debug` actuals.
pub(crate) fn inspect<T: fmt::Debug + ?Sized>(value: &T) -> String {
    pretty::inspect(value)
}
