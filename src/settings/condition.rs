use tracing::warn;

use super::Settings;
use crate::ast::{Value, is_comment_key};
use crate::error::{Result, RjsonError};

impl Settings {
    /// Truth value of an `if` condition.
    ///
    /// Null is false, numbers are true unless zero. Strings are substituted
    /// and the result evaluated; a string that substitutes to itself cannot
    /// be decided. Objects hold exactly one clause: `and`, `or`, `not`,
    /// `equal`, `not-equal`, `empty` or `not-empty`.
    pub fn eval_condition(&self, condition: &Value) -> Result<bool> {
        match condition {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(!n.is_zero()),
            Value::String(text) => {
                let substituted = self.environment.substitute(text)?;
                if substituted.as_str() == Some(text.as_str()) {
                    return Err(RjsonError::settings(
                        format!("cannot evaluate condition: {}", condition),
                        410,
                    ));
                }
                self.eval_condition(&substituted)
            }
            Value::Array(_) => Err(RjsonError::settings(
                format!(
                    "cannot evaluate condition: {} (array is only valid as a clause argument)",
                    condition
                ),
                411,
            )),
            Value::Object(items) => {
                let clauses: Vec<_> = items
                    .iter()
                    .filter(|(key, _)| !is_comment_key(key))
                    .collect();
                let [(clause, argument)] = clauses.as_slice() else {
                    return Err(RjsonError::settings(
                        format!("cannot evaluate condition: {} (exactly one clause expected)", condition),
                        412,
                    ));
                };
                match clause.as_str() {
                    "and" => self.eval_and(argument),
                    "or" => self.eval_or(argument),
                    "not" => Ok(!self.eval_condition(argument)?),
                    "equal" => self.eval_equal(argument, true),
                    "not-equal" => self.eval_equal(argument, false),
                    "empty" => self.eval_empty(argument, true),
                    "not-empty" => self.eval_empty(argument, false),
                    other => Err(RjsonError::settings(
                        format!("cannot evaluate condition: unrecognized clause \"{}\"", other),
                        413,
                    )),
                }
            }
        }
    }

    fn eval_and(&self, argument: &Value) -> Result<bool> {
        let items = argument.array()?;
        if items.is_empty() {
            warn!("empty \"and\" condition treated as false");
            return Ok(false);
        }
        for item in items {
            if !self.eval_condition(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn eval_or(&self, argument: &Value) -> Result<bool> {
        let items = argument.array()?;
        if items.is_empty() {
            warn!("empty \"or\" condition treated as false");
            return Ok(false);
        }
        for item in items {
            if self.eval_condition(item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Every element, substituted, against the first one.
    fn eval_equal(&self, argument: &Value, want_equal: bool) -> Result<bool> {
        let items = argument.array()?;
        if items.len() < 2 {
            warn!(condition = %argument, "fewer than two values to compare, condition is false");
            return Ok(false);
        }
        let first = self.environment.substitute_value(&items[0])?;
        let mut equal = true;
        for item in &items[1..] {
            if self.environment.substitute_value(item)? != first {
                equal = false;
                break;
            }
        }
        Ok(equal == want_equal)
    }

    fn eval_empty(&self, argument: &Value, want_empty: bool) -> Result<bool> {
        let value = self.environment.substitute_value(argument)?;
        Ok(value.is_empty() == want_empty)
    }
}
