//! Rule documents: JSON that compiles to an expression over a JSON subject.
//!
//! supports:
//! - compound nodes: `all`, `any`, `nand`, `nor`, each with an optional `name`
//! - negation: `{"not": rule}`
//! - explicit field checks: `{"field": "a.b", "op": ">=", "value": 3}`
//! - implicit AND when several fields share one object: `{"a": 1, "b": {">": 2}}`
//! - `true` / `false` literals

mod field;

pub use field::{FieldCheck, FieldOp};

use attest_kernel::{Combinator, CompoundBuilder, Expression};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct RuleError {
    pub message: String,
    pub path: String,
}

impl RuleError {
    pub fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }
}

const ROOT: &str = "$";

/// Compile `rules` into an expression bound to `subject`.
pub fn compile(rules: &Value, subject: Arc<Value>) -> Result<Expression, RuleError> {
    Compiler { subject }.rule(rules, ROOT)
}

struct Compiler {
    subject: Arc<Value>,
}

impl Compiler {
    fn rule(&self, json: &Value, path: &str) -> Result<Expression, RuleError> {
        match json {
            Value::Object(object) => self.object(object, path),
            // empty AND is true, empty NAND is false
            Value::Bool(true) => self.compound(Combinator::And, "true", Vec::new(), path),
            Value::Bool(false) => self.compound(Combinator::Nand, "false", Vec::new(), path),
            other => Err(RuleError::new(
                format!("expected object or boolean, got {other}"),
                path,
            )),
        }
    }

    fn object(&self, object: &Map<String, Value>, path: &str) -> Result<Expression, RuleError> {
        for combinator in Combinator::ALL {
            let key = keyword(combinator);
            if let Some(children) = object.get(key) {
                allow_only(object, &[key, "name"], path)?;
                return self.compound_node(combinator, object, children, path);
            }
        }
        if let Some(inner) = object.get("not") {
            allow_only(object, &["not"], path)?;
            return Ok(self.rule(inner, &format!("{path}.not"))?.negate());
        }
        if object.contains_key("field") {
            allow_only(object, &["field", "op", "value"], path)?;
            return self.explicit_field(object, path);
        }
        self.implicit_fields(object, path)
    }

    fn compound_node(
        &self,
        combinator: Combinator,
        object: &Map<String, Value>,
        children: &Value,
        path: &str,
    ) -> Result<Expression, RuleError> {
        let key = keyword(combinator);
        let items = children
            .as_array()
            .ok_or_else(|| RuleError::new(format!("'{key}' must be an array"), path))?;
        let name = match object.get("name") {
            None => key.to_string(),
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(RuleError::new("'name' must be a string", path)),
        };
        let children = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.rule(item, &format!("{path}.{key}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;
        self.compound(combinator, &name, children, path)
    }

    fn compound(
        &self,
        combinator: Combinator,
        name: &str,
        children: Vec<Expression>,
        path: &str,
    ) -> Result<Expression, RuleError> {
        CompoundBuilder::new(combinator, name)
            .extend(children)
            .build()
            .map_err(|err| RuleError::new(err.to_string(), path))
    }

    fn explicit_field(
        &self,
        object: &Map<String, Value>,
        path: &str,
    ) -> Result<Expression, RuleError> {
        let field = object
            .get("field")
            .and_then(Value::as_str)
            .filter(|field| !field.trim().is_empty())
            .ok_or_else(|| RuleError::new("'field' must be a non-empty string", path))?;
        let op = match object.get("op") {
            None => "==",
            Some(Value::String(op)) => op.as_str(),
            Some(_) => return Err(RuleError::new("'op' must be a string", path)),
        };
        let operand = object.get("value");
        if operand.is_none() && op != "exists" {
            return Err(RuleError::new(format!("'{op}' requires a 'value'"), path));
        }
        let check = field_check(field, op, operand.cloned().unwrap_or(Value::Null), path)?;
        Ok(self.bind(check))
    }

    fn implicit_fields(
        &self,
        object: &Map<String, Value>,
        path: &str,
    ) -> Result<Expression, RuleError> {
        let mut checks = Vec::new();
        for (field, value) in object {
            let field_path = format!("{path}.{field}");
            match value {
                // { "age": { ">=": 18, "<": 65 } }
                Value::Object(ops) => {
                    if ops.is_empty() {
                        return Err(RuleError::new("empty operator object", field_path));
                    }
                    for (op, operand) in ops {
                        let check = field_check(field, op, operand.clone(), &field_path)?;
                        checks.push(self.bind(check));
                    }
                }
                other => {
                    let check = FieldCheck::new(field.as_str(), FieldOp::Eq, other.clone());
                    checks.push(self.bind(check));
                }
            }
        }

        if checks.len() == 1 {
            return Ok(checks.remove(0));
        }
        self.compound(Combinator::And, "all", checks, path)
    }

    fn bind(&self, check: FieldCheck) -> Expression {
        Expression::terminal(check.label(), Arc::clone(&self.subject), check)
    }
}

fn field_check(
    field: &str,
    op: &str,
    operand: Value,
    path: &str,
) -> Result<FieldCheck, RuleError> {
    if op == "matches" {
        let pattern = operand
            .as_str()
            .ok_or_else(|| RuleError::new("'matches' requires a string pattern", path))?;
        let regex = Regex::new(pattern)
            .map_err(|err| RuleError::new(format!("invalid pattern {pattern:?}: {err}"), path))?;
        return Ok(FieldCheck::new(field, FieldOp::Matches(regex), operand));
    }

    let op = FieldOp::parse(op)
        .ok_or_else(|| RuleError::new(format!("unknown operator: '{op}'"), path))?;
    if matches!(op, FieldOp::In) && !operand.is_array() {
        return Err(RuleError::new("'in' requires an array value", path));
    }
    Ok(FieldCheck::new(field, op, operand))
}

fn keyword(combinator: Combinator) -> &'static str {
    match combinator {
        Combinator::And => "all",
        Combinator::Or => "any",
        Combinator::Nand => "nand",
        Combinator::Nor => "nor",
    }
}

fn allow_only(object: &Map<String, Value>, allowed: &[&str], path: &str) -> Result<(), RuleError> {
    match object.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(RuleError::new(format!("unexpected key '{key}'"), path)),
        None => Ok(()),
    }
}
