//! String checks for any `AsRef<str>` subject.

use crate::error::ConditionError;
use crate::subject::Subject;
use attest_kernel::{Condition, Expression, Rationale};
use regex::Regex;
use std::fmt;

/// A single text property.
#[derive(Debug, Clone)]
pub enum TextCheck {
    Empty,
    Blank,
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    /// Length in characters, not bytes.
    Length(usize),
    Matches(Regex),
}

impl TextCheck {
    pub fn test_str(&self, text: &str) -> bool {
        match self {
            TextCheck::Empty => text.is_empty(),
            TextCheck::Blank => text.trim().is_empty(),
            TextCheck::StartsWith(prefix) => text.starts_with(prefix.as_str()),
            TextCheck::EndsWith(suffix) => text.ends_with(suffix.as_str()),
            TextCheck::Contains(needle) => text.contains(needle.as_str()),
            TextCheck::Length(expected) => text.chars().count() == *expected,
            TextCheck::Matches(pattern) => pattern.is_match(text),
        }
    }

    fn expectation(&self) -> String {
        match self {
            TextCheck::Empty => "is empty".to_string(),
            TextCheck::Blank => "is blank".to_string(),
            TextCheck::StartsWith(prefix) => format!("starts with {prefix:?}"),
            TextCheck::EndsWith(suffix) => format!("ends with {suffix:?}"),
            TextCheck::Contains(needle) => format!("contains {needle:?}"),
            TextCheck::Length(expected) => format!("has {expected} characters"),
            TextCheck::Matches(pattern) => format!("matches /{}/", pattern.as_str()),
        }
    }

    fn hint(&self, text: &str) -> Option<String> {
        let folded = text.to_lowercase();
        let case_only = match self {
            TextCheck::StartsWith(prefix) => folded.starts_with(&prefix.to_lowercase()),
            TextCheck::EndsWith(suffix) => folded.ends_with(&suffix.to_lowercase()),
            TextCheck::Contains(needle) => folded.contains(&needle.to_lowercase()),
            _ => false,
        };
        if case_only {
            return Some("matches when case is ignored".to_string());
        }
        match self {
            TextCheck::Length(_) => Some(format!("actual length is {}", text.chars().count())),
            TextCheck::Empty | TextCheck::Blank if !text.is_empty() => {
                Some(format!("{} characters present", text.chars().count()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for TextCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expectation())
    }
}

impl<T> Condition<T> for TextCheck
where
    T: AsRef<str>,
{
    fn test(&self, subject: &T) -> bool {
        self.test_str(subject.as_ref())
    }

    fn rationale(&self, subject: &T, passed: bool) -> Rationale {
        let text = subject.as_ref();
        let rationale = Rationale::new(self.expectation(), format!("{text:?}"));
        match self.hint(text) {
            Some(hint) if !passed => rationale.with_hint(hint),
            _ => rationale,
        }
    }
}

impl<T> Subject<T>
where
    T: AsRef<str> + Clone + Send + Sync + 'static,
{
    pub fn is_empty_string(&self) -> Expression {
        self.text(TextCheck::Empty)
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> Expression {
        self.text(TextCheck::Blank)
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Expression {
        self.text(TextCheck::StartsWith(prefix.into()))
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Expression {
        self.text(TextCheck::EndsWith(suffix.into()))
    }

    pub fn contains_str(&self, needle: impl Into<String>) -> Expression {
        self.text(TextCheck::Contains(needle.into()))
    }

    pub fn has_length(&self, chars: usize) -> Expression {
        self.text(TextCheck::Length(chars))
    }

    /// Fails to build if `pattern` is not a valid regular expression.
    pub fn matches(&self, pattern: &str) -> Result<Expression, ConditionError> {
        let regex = Regex::new(pattern).map_err(|source| ConditionError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.text(TextCheck::Matches(regex)))
    }

    pub fn text(&self, check: TextCheck) -> Expression {
        let relation = check.to_string();
        self.bind(relation, check)
    }
}
