//! Contract entry points over Attest expressions.
//!
//! ```
//! use attest_conditions::that_named;
//! use attest_contract::{ContractKind, require};
//!
//! let order_total = that_named("total", 0u32).is_greater_than(0);
//! let violation = require(&order_total).unwrap_err();
//! assert_eq!(violation.kind(), ContractKind::Precondition);
//! assert_eq!(violation.to_string(), "precondition failed: total > 0");
//! ```

pub mod config;
pub mod contract;
pub mod format;
pub mod violation;

pub use config::{ConfigError, FormatConfig};
pub use contract::{confirm, confirm_with, ensure, ensure_with, require, require_with};
pub use format::{Formatter, TextFormatter, format_cause};
pub use violation::{ContractKind, ContractViolation, Failure};
