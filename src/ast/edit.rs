use super::{Object, Value};
use crate::error::{Result, RjsonError};

/// Key reserved for the editor indentation hint.
pub const EMACS_INDENT_KEY: &str = "_";

/// Keys beginning or ending with `?` mark disabled entries.
pub fn is_comment_key(key: &str) -> bool {
    key.starts_with('?') || key.ends_with('?')
}

impl Value {
    /// Insert or replace a field. A null node becomes an empty object first.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        if self.is_null() {
            *self = Value::Object(Object::new());
        }
        self.object_mut()?.insert(key.into(), value.into());
        Ok(())
    }

    /// Append to an array. A null node becomes an empty array first.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        if self.is_null() {
            *self = Value::Array(Vec::new());
        }
        self.array_mut()?.push(value.into());
        Ok(())
    }

    /// Remove a field keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match self {
            Value::Object(items) => items.shift_remove(key),
            _ => None,
        }
    }

    /// Merge `other` into `self`.
    ///
    /// Objects merge key by key, recursively. Everything else is replaced
    /// wholesale. A null target takes the other value, a null update leaves
    /// the target alone; two nodes of different kinds cannot be merged.
    pub fn update(&mut self, other: &Value) -> Result<&mut Self> {
        if other.is_null() {
            return Ok(self);
        }
        if !self.is_null() && self.kind() != other.kind() {
            return Err(RjsonError::MergeError {
                message: format!(
                    "cannot merge two rjson values of different types: {} and {}",
                    self, other
                ),
                code: Some(220),
            });
        }
        if let (Value::Object(target), Value::Object(source)) = (&mut *self, other) {
            for (key, new_value) in source {
                match target.get_mut(key) {
                    Some(old_value) => {
                        old_value.update(new_value)?;
                    }
                    None => {
                        target.insert(key.clone(), new_value.clone());
                    }
                }
            }
        } else {
            *self = other.clone();
        }
        Ok(self)
    }

    /// Drop every comment entry, at any depth.
    pub fn remove_comments(&mut self) {
        match self {
            Value::Object(items) => {
                items.retain(|key, _| !is_comment_key(key));
                items.values_mut().for_each(Value::remove_comments);
            }
            Value::Array(items) => items.iter_mut().for_each(Value::remove_comments),
            _ => {}
        }
    }

    /// Drop the editor indentation placeholder from a top-level object.
    pub fn remove_emacs_indent(&mut self) {
        if let Value::Object(items) = self {
            items.shift_remove(EMACS_INDENT_KEY);
        }
    }
}
