//! Value inspection for failure messages.
//!
//! Matchers render actual and expected operands through this module so that
//! every message formats values the same way. Rendering is independent of
//! evaluation logic and can be swapped without touching any matcher.

use std::fmt;

/// Longest rendering embedded in a failure message before truncation.
const MAX_RENDERED_LEN: usize = 120;

/// Renders a value for inclusion in a failure message.
pub fn inspect<T: fmt::Debug + ?Sized>(value: &T) -> String {
    truncate(format!("{value:?}"))
}

fn truncate(rendered: String) -> String {
    if rendered.chars().count() <= MAX_RENDERED_LEN {
        return rendered;
    }
    let mut shortened: String = rendered.chars().take(MAX_RENDERED_LEN).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_uses_debug_formatting() {
        assert_eq!(inspect(&5), "5");
        assert_eq!(inspect("hello"), "\"hello\"");
        assert_eq!(inspect(&vec![1, 2, 3]), "[1, 2, 3]");
    }

    #[test]
    fn long_values_are_truncated() {
        let long = "x".repeat(500);
        let rendered = inspect(&long);
        assert!(rendered.chars().count() <= MAX_RENDERED_LEN + 1);
        assert!(rendered.ends_with('…'));
    }
}
