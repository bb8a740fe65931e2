//! Condition factories for the Attest kernel.
//!
//! Every check starts from a [`Subject`], created with [`that`] or
//! [`that_named`], and ends in a terminal [`Expression`]:
//!
//! ```
//! use attest_conditions::that_named;
//! use attest_kernel::{Expression, Outcome};
//!
//! let age = that_named("age", 17);
//! let adult = Expression::all("adult")
//!     .append(age.is_greater_than_or_equal_to(18))
//!     .append(age.is_less_than(130))
//!     .build()
//!     .unwrap();
//!
//! let evaluation = adult.evaluate();
//! assert_eq!(evaluation.outcome(), Outcome::False);
//! assert_eq!(evaluation.root_cause().unwrap().name(), "age >= 18");
//! ```
//!
//! One generic value wrapper covers every ordered type; strings, collections,
//! options and booleans get their own method sets.

mod collection;
mod error;
mod ordered;
mod presence;
mod subject;
mod text;

pub use collection::CollectionCheck;
pub use error::ConditionError;
pub use ordered::{Between, Compare, Relation};
pub use presence::{FlagCheck, OptionCheck};
pub use subject::{DEFAULT_SUBJECT_NAME, Satisfies, Subject, that, that_named};
pub use text::TextCheck;

#[doc(no_inline)]
pub use attest_kernel::Expression;
