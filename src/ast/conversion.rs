// Author: Dustin Pilgrim
// License: MIT

use super::{Number, Object, Text, Value};
use crate::error::{Result, RjsonError};

impl Value {
    /// Coerce the node to `T`.
    ///
    /// Numeric targets parse the number's text, strings copy the text and
    /// booleans need a boolean node. Anything else is a type mismatch
    /// naming the requested type and the stored kind.
    pub fn to<T>(&self) -> Result<T>
    where
        T: for<'v> TryFrom<&'v Value, Error = RjsonError>,
    {
        T::try_from(self)
    }

    /// Borrowing counterpart of `to::<String>()`.
    pub fn to_str(&self) -> Result<&str> {
        self.as_str().ok_or_else(|| self.mismatch("string"))
    }
}

impl TryFrom<&Value> for String {
    type Error = RjsonError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.as_str().to_string()),
            _ => Err(value.mismatch("string")),
        }
    }
}

impl TryFrom<&Value> for Text {
    type Error = RjsonError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(value.mismatch("string")),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = RjsonError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(value.mismatch("bool")),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = RjsonError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n.to_f64().ok_or_else(|| value.mismatch("f64")),
            _ => Err(value.mismatch("f64")),
        }
    }
}

impl TryFrom<&Value> for f32 {
    type Error = RjsonError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .to_f64()
                .map(|n| n as f32)
                .ok_or_else(|| value.mismatch("f32")),
            _ => Err(value.mismatch("f32")),
        }
    }
}

macro_rules! try_from_signed {
    ($($t:ty),*) => {
        $(
            impl TryFrom<&Value> for $t {
                type Error = RjsonError;

                fn try_from(value: &Value) -> Result<Self> {
                    let Value::Number(n) = value else {
                        return Err(value.mismatch(stringify!($t)));
                    };
                    n.to_i64()
                        .and_then(|n| <$t>::try_from(n).ok())
                        .ok_or_else(|| out_of_range(n, stringify!($t)))
                }
            }
        )*
    };
}

macro_rules! try_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl TryFrom<&Value> for $t {
                type Error = RjsonError;

                fn try_from(value: &Value) -> Result<Self> {
                    let Value::Number(n) = value else {
                        return Err(value.mismatch(stringify!($t)));
                    };
                    n.to_u64()
                        .and_then(|n| <$t>::try_from(n).ok())
                        .ok_or_else(|| out_of_range(n, stringify!($t)))
                }
            }
        )*
    };
}

try_from_signed!(i8, i16, i32, i64, isize);
try_from_unsigned!(u8, u16, u32, u64, usize);

fn out_of_range(n: &Number, requested: &str) -> RjsonError {
    RjsonError::TypeMismatch {
        requested: requested.to_string(),
        actual: format!("number{{{}}}", n),
        hint: Some(format!("Number {} does not fit into {}", n, requested)),
        code: Some(202),
    }
}

// ----- construction -----

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Text::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Text::from(s))
    }
}

impl From<Text> for Value {
    fn from(t: Text) -> Self {
        Value::String(t)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! value_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

value_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::from(f64::from(n))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(items: Object) -> Self {
        Value::Object(items)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
