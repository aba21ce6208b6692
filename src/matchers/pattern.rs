//! Regex pattern matchers.
//!
//! `match_regex` requires the whole actual string to match; `match_partial`
//! accepts any match anywhere in it. Matcher construction happens inside
//! example execution, so an invalid pattern is a test outcome: the matcher
//! never matches and its failure message carries the compile error.

use std::fmt;

use regex::Regex;

use super::{inspect, Matcher};
use crate::errors::SpecError;

pub struct MatchRegex {
    pattern: String,
    compiled: Result<Regex, regex::Error>,
    partial: bool,
}

/// Matches when the pattern matches the entire actual string.
pub fn match_regex(pattern: &str) -> MatchRegex {
    MatchRegex {
        pattern: pattern.to_string(),
        compiled: Regex::new(&format!("^(?:{pattern})$")),
        partial: false,
    }
}

/// Matches when the pattern matches anywhere in the actual string.
pub fn match_partial(pattern: &str) -> MatchRegex {
    MatchRegex {
        pattern: pattern.to_string(),
        compiled: Regex::new(pattern),
        partial: true,
    }
}

impl MatchRegex {
    fn compile_failure(&self) -> Option<String> {
        self.compiled.as_ref().err().map(|err| {
            SpecError::InvalidPattern {
                pattern: self.pattern.clone(),
                source: err.clone(),
            }
            .to_string()
        })
    }
}

impl<A> Matcher<A> for MatchRegex
where
    A: AsRef<str> + fmt::Debug,
{
    fn matches(&self, actual: &A) -> bool {
        match &self.compiled {
            Ok(regex) => regex.is_match(actual.as_ref()),
            Err(_) => false,
        }
    }

    fn description(&self) -> String {
        let verb = if self.partial {
            "partially match"
        } else {
            "match"
        };
        format!("{verb} /{}/", self.pattern)
    }

    fn inspect_actual(&self, actual: &A) -> String {
        inspect(actual)
    }

    fn failure_message(&self, actual: &A) -> String {
        match self.compile_failure() {
            Some(compile_error) => compile_error,
            None => format!(
                "expected {} to {}",
                self.inspect_actual(actual),
                Matcher::<A>::description(self)
            ),
        }
    }

    fn failure_message_negated(&self, actual: &A) -> String {
        match self.compile_failure() {
            Some(compile_error) => compile_error,
            None => format!(
                "expected {} to not {}",
                self.inspect_actual(actual),
                Matcher::<A>::description(self)
            ),
        }
    }
}
