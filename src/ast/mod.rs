// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, RjsonError};

mod conversion;
mod edit;
mod number;
mod text;

pub use edit::{EMACS_INDENT_KEY, is_comment_key};
pub use number::Number;
pub use text::Text;

pub type Object = IndexMap<String, Value>;

/// A JSON node. Exactly one variant is active; the default is `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Text),
    Array(Vec<Value>),
    Object(Object),
}

/// Returned by lookups that find nothing.
pub static NULL: Value = Value::Null;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Object,
    Array,
    String,
    Number,
    Bool,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Bool => "bool",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Read-only view of an object node.
    pub fn object(&self) -> Result<&Object> {
        match self {
            Value::Object(items) => Ok(items),
            other => Err(other.mismatch("object")),
        }
    }

    /// Read-only view of an array node.
    pub fn array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(items) => Ok(items),
            other => Err(other.mismatch("object")),
        }
    }

    pub fn array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.to_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.to_i64(),
            _ => None,
        }
    }

    /// Null counts as empty; numbers and booleans never are.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(items) => items.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Number of entries of an object/array or bytes of a string, else 0.
    pub fn len(&self) -> usize {
        match self {
            Value::String(s) => s.len(),
            Value::Array(items) => items.len(),
            Value::Object(items) => items.len(),
            _ => 0,
        }
    }

    /// Field of an object, or the shared null value.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Value::Object(items) => items.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    pub fn get_path(&self, keys: &[&str]) -> &Value {
        keys.iter().fold(self, |current, key| current.get(key))
    }

    pub fn field(&self, key: &str) -> Result<&Value> {
        self.object()?
            .get(key)
            .ok_or_else(|| RjsonError::FieldNotFound {
                key: key.to_string(),
                hint: None,
                code: Some(210),
            })
    }

    pub(crate) fn mismatch(&self, requested: &str) -> RjsonError {
        let actual = match self {
            Value::String(s) => format!("string{{\"{}\"}}", s),
            Value::Number(n) => format!("number{{{}}}", n),
            Value::Bool(b) => format!("boolean{{{}}}", b),
            other => other.kind().to_string(),
        };
        RjsonError::TypeMismatch {
            requested: requested.to_string(),
            actual,
            hint: None,
            code: Some(201),
        }
    }
}

/// Owned text buffer plus the tree parsed from it.
///
/// String and number nodes of the tree are slices of the buffer; they keep
/// it alive through shared ownership, so the tree can never dangle.
#[derive(Debug, Clone)]
pub struct Document {
    source: Arc<str>,
    root: Value,
}

impl Document {
    pub(crate) fn new(source: Arc<str>, root: Value) -> Self {
        Self { source, root }
    }

    /// Parse `text` with comments removed.
    pub fn parse(text: &str) -> Result<Self> {
        crate::parser::parse_document(text, crate::parser::ParseOptions::default())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::parser::parse_file(path, crate::parser::ParseOptions::default())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }
}

impl Deref for Document {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.root
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

#[cfg(test)]
mod tests;
