//! Field checks against a JSON subject.

use attest_kernel::{Condition, Rationale};
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum FieldOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    In,
    Contains,
    Matches(Regex),
    Exists,
}

impl FieldOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            FieldOp::Eq => "==",
            FieldOp::Ne => "!=",
            FieldOp::Gt => ">",
            FieldOp::Ge => ">=",
            FieldOp::Lt => "<",
            FieldOp::Le => "<=",
            FieldOp::In => "in",
            FieldOp::Contains => "contains",
            FieldOp::Matches(_) => "matches",
            FieldOp::Exists => "exists",
        }
    }

    /// Ops other than `matches`, whose pattern is compiled by the caller.
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "==" | "eq" => Some(FieldOp::Eq),
            "!=" | "ne" => Some(FieldOp::Ne),
            ">" | "gt" => Some(FieldOp::Gt),
            ">=" | "gte" => Some(FieldOp::Ge),
            "<" | "lt" => Some(FieldOp::Lt),
            "<=" | "lte" => Some(FieldOp::Le),
            "in" => Some(FieldOp::In),
            "contains" => Some(FieldOp::Contains),
            "exists" => Some(FieldOp::Exists),
            _ => None,
        }
    }
}

impl fmt::Display for FieldOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `<field> <op> <operand>` where `field` is a dot path into the subject.
#[derive(Debug, Clone)]
pub struct FieldCheck {
    field: String,
    op: FieldOp,
    operand: Value,
}

impl FieldCheck {
    pub fn new(field: impl Into<String>, op: FieldOp, operand: Value) -> Self {
        Self {
            field: field.into(),
            op,
            operand,
        }
    }

    /// Terminal name, e.g. `user.age >= 18` or `user.email exists`.
    pub fn label(&self) -> String {
        match self.op {
            FieldOp::Exists => format!("{} exists", self.field),
            _ => format!("{} {} {}", self.field, self.op, self.operand),
        }
    }

    fn holds(&self, actual: Option<&Value>) -> bool {
        let Some(actual) = actual else {
            return matches!(self.op, FieldOp::Ne);
        };
        match &self.op {
            FieldOp::Eq => json_eq(actual, &self.operand),
            FieldOp::Ne => !json_eq(actual, &self.operand),
            FieldOp::Gt => json_cmp(actual, &self.operand) == Some(Ordering::Greater),
            FieldOp::Ge => matches!(
                json_cmp(actual, &self.operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FieldOp::Lt => json_cmp(actual, &self.operand) == Some(Ordering::Less),
            FieldOp::Le => matches!(
                json_cmp(actual, &self.operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FieldOp::In => self
                .operand
                .as_array()
                .is_some_and(|items| items.iter().any(|item| json_eq(actual, item))),
            FieldOp::Contains => match (actual, &self.operand) {
                (Value::String(text), Value::String(needle)) => text.contains(needle.as_str()),
                (Value::Array(items), needle) => items.iter().any(|item| json_eq(item, needle)),
                _ => false,
            },
            FieldOp::Matches(pattern) => actual.as_str().is_some_and(|text| pattern.is_match(text)),
            FieldOp::Exists => !actual.is_null(),
        }
    }

    fn expectation(&self) -> String {
        match self.op {
            FieldOp::Exists => "present and not null".to_string(),
            _ => format!("{} {}", self.op, self.operand),
        }
    }
}

impl Condition<Arc<Value>> for FieldCheck {
    fn test(&self, subject: &Arc<Value>) -> bool {
        self.holds(resolve(subject, &self.field))
    }

    fn rationale(&self, subject: &Arc<Value>, passed: bool) -> Rationale {
        let actual = resolve(subject, &self.field);
        let rendered = actual.map_or_else(|| "<missing>".to_string(), Value::to_string);
        let rationale = Rationale::new(self.expectation(), rendered);
        if passed {
            return rationale;
        }
        match actual {
            None => rationale.with_hint(format!("field {:?} not found in subject", self.field)),
            Some(value) if type_mismatch(&self.op, value, &self.operand) => rationale.with_hint(
                format!("cannot compare {} with {}", kind(value), kind(&self.operand)),
            ),
            Some(_) => rationale,
        }
    }
}

/// Walk a dot path: object keys by name, array elements by numeric index.
fn resolve<'a>(subject: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(subject, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn json_eq(left: &Value, right: &Value) -> bool {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) if left.is_number() && right.is_number() => l == r,
        _ => left == right,
    }
}

fn json_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.as_f64()?.partial_cmp(&r.as_f64()?),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => None,
    }
}

fn type_mismatch(op: &FieldOp, actual: &Value, operand: &Value) -> bool {
    matches!(op, FieldOp::Gt | FieldOp::Ge | FieldOp::Lt | FieldOp::Le)
        && json_cmp(actual, operand).is_none()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
