//! `Option` and `bool` subjects.

use crate::subject::Subject;
use attest_kernel::{Condition, Expression, Rationale};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionCheck {
    Some,
    None,
}

impl<E: fmt::Debug> Condition<Option<E>> for OptionCheck {
    fn test(&self, subject: &Option<E>) -> bool {
        match self {
            OptionCheck::Some => subject.is_some(),
            OptionCheck::None => subject.is_none(),
        }
    }

    fn rationale(&self, subject: &Option<E>, _passed: bool) -> Rationale {
        let expected = match self {
            OptionCheck::Some => "is present",
            OptionCheck::None => "is absent",
        };
        Rationale::new(expected, format!("{subject:?}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagCheck {
    True,
    False,
}

impl Condition<bool> for FlagCheck {
    fn test(&self, subject: &bool) -> bool {
        *subject == (*self == FlagCheck::True)
    }

    fn rationale(&self, subject: &bool, _passed: bool) -> Rationale {
        let expected = match self {
            FlagCheck::True => "true",
            FlagCheck::False => "false",
        };
        Rationale::new(expected, subject.to_string())
    }
}

impl<E> Subject<Option<E>>
where
    E: fmt::Debug + Clone + Send + Sync + 'static,
{
    pub fn is_some(&self) -> Expression {
        self.bind("is present", OptionCheck::Some)
    }

    pub fn is_none(&self) -> Expression {
        self.bind("is absent", OptionCheck::None)
    }
}

impl Subject<bool> {
    pub fn is_true(&self) -> Expression {
        self.bind("is true", FlagCheck::True)
    }

    pub fn is_false(&self) -> Expression {
        self.bind("is false", FlagCheck::False)
    }
}
