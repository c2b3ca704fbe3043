use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{NULL, Object, Value};
use crate::error::{Result, RjsonError};

/// `{key}` references inside strings.
static PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z0-9_][A-Za-z0-9_\-\.]*)\}").expect("static pattern compiles")
});

/// Re-substitution passes allowed before a cycle is assumed.
const MAX_PASSES: usize = 32;

/// Which frames a lookup may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    Any,
    Innermost,
}

/// Stack of variable frames. The base frame is created with the
/// environment and is never popped.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Object>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            frames: vec![Object::new()],
        }
    }

    /// Number of frames, the base one included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self) {
        self.frames.push(Object::new());
    }

    /// # Panics
    /// When only the base frame is left: pushes and pops must nest.
    pub fn pop(&mut self) {
        assert!(self.frames.len() > 1, "cannot pop the base environment frame");
        self.frames.pop();
    }

    /// Bind in the innermost frame, replacing a binding of the same key there.
    pub fn add(&mut self, key: impl Into<String>, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(key.into(), value);
        }
    }

    /// Bind in the base frame.
    pub fn add_to_toplevel(&mut self, key: impl Into<String>, value: Value) {
        if let Some(frame) = self.frames.first_mut() {
            frame.insert(key.into(), value);
        }
    }

    /// Innermost binding of `key`, or null.
    pub fn get(&self, key: &str, scope: Scope) -> &Value {
        let found = match scope {
            Scope::Any => self.frames.iter().rev().find_map(|frame| frame.get(key)),
            Scope::Innermost => self.frames.last().and_then(|frame| frame.get(key)),
        };
        found.unwrap_or(&NULL)
    }

    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(key))
    }

    /// Replace `{key}` references in `text`.
    ///
    /// A text that is exactly one reference yields the bound value itself,
    /// keeping its type (null when unbound). Otherwise every reference is
    /// replaced by the text of its value. Results are scanned again until
    /// no reference is left.
    pub fn substitute(&self, text: &str) -> Result<Value> {
        let mut current = text.to_string();
        for _ in 0..MAX_PASSES {
            if let Some(key) = whole_reference(&current) {
                match self.get(key, Scope::Any) {
                    Value::String(bound) if PATTERN.is_match(bound) => {
                        current = bound.to_string();
                        continue;
                    }
                    bound => return Ok(bound.clone()),
                }
            }
            if !PATTERN.is_match(&current) {
                return Ok(Value::from(current));
            }
            current = self.splice(&current)?;
        }
        Err(RjsonError::SubstitutionCycle {
            text: text.to_string(),
            code: Some(421),
        })
    }

    /// Substitute every string inside `value`, containers included.
    pub fn substitute_value(&self, value: &Value) -> Result<Value> {
        match value {
            Value::String(text) => self.substitute(text),
            Value::Array(items) => items
                .iter()
                .map(|item| self.substitute_value(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(items) => {
                let mut substituted = Object::with_capacity(items.len());
                for (key, item) in items {
                    substituted.insert(key.clone(), self.substitute_value(item)?);
                }
                Ok(Value::Object(substituted))
            }
            other => Ok(other.clone()),
        }
    }

    fn splice(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for captures in PATTERN.captures_iter(text) {
            let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let bound = self.get(key.as_str(), Scope::Any);
            if bound.is_null() {
                return Err(RjsonError::SubstitutionNotFound {
                    pattern: whole.as_str().to_string(),
                    code: Some(420),
                });
            }
            out.push_str(&text[last..whole.start()]);
            match bound {
                Value::String(s) => out.push_str(s),
                other => out.push_str(&other.to_json()),
            }
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }

    /// One line per binding, innermost frame first.
    pub fn format(&self, indent: &str) -> String {
        let mut out = String::new();
        for (level, frame) in self.frames.iter().enumerate().rev() {
            for (key, value) in frame {
                out.push_str(&format!("{}{} \"{}\": {}\n", indent, level, key, value));
            }
        }
        out
    }
}

fn whole_reference(text: &str) -> Option<&str> {
    let captures = PATTERN.captures(text)?;
    let whole = captures.get(0)?;
    if whole.start() == 0 && whole.end() == text.len() {
        captures.get(1).map(|key| key.as_str())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment() -> Environment {
        let mut env = Environment::new();
        env.add("name", Value::from("world"));
        env.add("count", Value::from(3));
        env.add("flag", Value::Bool(true));
        env.add("list", Value::Array(vec![Value::from(1), Value::from(2)]));
        env.add("alias", Value::from("{count}"));
        env
    }

    #[test]
    fn test_scope_discipline() {
        let mut env = Environment::new();
        env.add("outer", Value::from(1));
        env.push();
        env.add("inner", Value::from(2));
        assert_eq!(env.get("inner", Scope::Any).as_i64(), Some(2));
        assert_eq!(env.get("outer", Scope::Any).as_i64(), Some(1));
        assert!(env.get("outer", Scope::Innermost).is_null());
        env.pop();
        assert!(env.get("inner", Scope::Any).is_null());
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn test_shadowing_and_toplevel() {
        let mut env = Environment::new();
        env.add("x", Value::from("base"));
        env.push();
        env.add("x", Value::from("inner"));
        env.add_to_toplevel("y", Value::from("bottom"));
        assert_eq!(env.get("x", Scope::Any).as_str(), Some("inner"));
        env.pop();
        assert_eq!(env.get("x", Scope::Any).as_str(), Some("base"));
        assert_eq!(env.get("y", Scope::Any).as_str(), Some("bottom"));
    }

    #[test]
    #[should_panic(expected = "cannot pop the base environment frame")]
    fn test_base_frame_never_popped() {
        Environment::new().pop();
    }

    #[test]
    fn test_whole_reference_keeps_type() {
        let env = environment();
        assert_eq!(env.substitute("{count}").unwrap(), Value::from(3));
        assert_eq!(env.substitute("{flag}").unwrap(), Value::Bool(true));
        assert!(env.substitute("{list}").unwrap().is_array());
        assert!(env.substitute("{unbound}").unwrap().is_null());
        // a bound string holding a reference is followed
        assert_eq!(env.substitute("{alias}").unwrap(), Value::from(3));
    }

    #[test]
    fn test_splice_into_text() {
        let env = environment();
        assert_eq!(
            env.substitute("hello {name}, {count} items {list}").unwrap(),
            Value::from("hello world, 3 items [1,2]")
        );
        assert_eq!(env.substitute("no refs {here").unwrap(), Value::from("no refs {here"));
        assert_eq!(env.substitute("n={alias}").unwrap(), Value::from("n=3"));
    }

    #[test]
    fn test_splice_unbound_fails() {
        let env = environment();
        let err = env.substitute("x {missing} y").unwrap_err();
        assert!(matches!(err, RjsonError::SubstitutionNotFound { ref pattern, .. } if pattern == "{missing}"));
    }

    #[test]
    fn test_cycle_detected() {
        let mut env = Environment::new();
        env.add("a", Value::from("{b}"));
        env.add("b", Value::from("x{a}"));
        let err = env.substitute("{a}").unwrap_err();
        assert!(matches!(err, RjsonError::SubstitutionCycle { code: Some(421), .. }));
    }

    #[test]
    fn test_substitute_value_in_containers() {
        let env = environment();
        let value = crate::parser::parse_str(r#"["{name}", {"k": "{count}"}, 7]"#).unwrap();
        assert_eq!(
            env.substitute_value(&value).unwrap().to_json(),
            r#"["world",{"k":3},7]"#
        );
    }
}
