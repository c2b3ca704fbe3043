use std::fmt;

use super::Text;
use crate::utils::format_real;

/// A numeric literal kept in its textual form.
///
/// The scanner decides whether the literal is an integer (no `.`, no
/// exponent) or a real. Conversion to a machine number happens on demand.
#[derive(Clone)]
pub struct Number {
    text: Text,
    integer: bool,
}

impl Number {
    pub fn from_literal(text: Text, integer: bool) -> Self {
        Self { text, integer }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn is_integer(&self) -> bool {
        self.integer
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.as_str().parse::<f64>().ok()
    }

    pub fn to_i64(&self) -> Option<i64> {
        if let Ok(n) = self.as_str().parse::<i64>() {
            return Some(n);
        }
        // "2.0", "1e3" and the like still name an integer
        let real = self.to_f64()?;
        if real.fract() == 0.0 && real >= i64::MIN as f64 && real <= i64::MAX as f64 {
            Some(real as i64)
        } else {
            None
        }
    }

    pub fn to_u64(&self) -> Option<u64> {
        if let Ok(n) = self.as_str().parse::<u64>() {
            return Some(n);
        }
        let real = self.to_f64()?;
        if real.fract() == 0.0 && real >= 0.0 && real <= u64::MAX as f64 {
            Some(real as u64)
        } else {
            None
        }
    }

    pub fn is_zero(&self) -> bool {
        self.to_f64().is_some_and(|n| n == 0.0)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.to_f64(), other.to_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self.text == other.text,
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({})", self.as_str())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! number_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::from_literal(Text::from(n.to_string()), true)
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl Number {
    /// Non-finite reals have no JSON spelling and yield `None`.
    pub fn from_f64(n: f64) -> Option<Self> {
        if !n.is_finite() {
            return None;
        }
        let text = format_real(n);
        let integer = !text.contains(['.', 'e', 'E']);
        Some(Number::from_literal(Text::from(text), integer))
    }
}
