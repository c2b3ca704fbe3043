use super::{Replace, Scope, Settings};
use crate::ast::Value;
use crate::error::{Result, RjsonError};

/// Re-substitutions `getenv_or` follows before giving up.
const MAX_GETENV_SUBSTITUTIONS: usize = 10;

impl Settings {
    /// Binding of `key` (itself substituted first), or null.
    pub fn getenv(&self, key: &str) -> Result<&Value> {
        let key = match self.environment.substitute(key)? {
            Value::String(text) => text.to_string(),
            other => other.to_json(),
        };
        Ok(self.environment.get(&key, Scope::Any))
    }

    /// Binding of `key` converted to `T`, or `default` when unbound.
    ///
    /// String bindings are substituted until they stop changing; a chain
    /// that ends in null yields `default` as well.
    ///
    /// # Example
    /// ```no_run
    /// # use rjson_settings::Settings;
    /// # let settings = Settings::new();
    /// let width: f64 = settings.getenv_or("width", 800.0)?;
    /// let title: String = settings.getenv_or("title", String::from("untitled"))?;
    /// # Ok::<(), rjson_settings::RjsonError>(())
    /// ```
    pub fn getenv_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: for<'v> TryFrom<&'v Value, Error = RjsonError>,
    {
        let value = self.getenv(key)?;
        let Value::String(text) = value else {
            return if value.is_null() {
                Ok(default)
            } else {
                value.to()
            };
        };

        let mut current = text.to_string();
        for _ in 0..MAX_GETENV_SUBSTITUTIONS {
            match self.environment.substitute(&current)? {
                Value::String(next) if next.as_str() != current => current = next.to_string(),
                Value::Null => return Ok(default),
                other => return other.to(),
            }
        }
        Err(RjsonError::settings(
            format!("getenv: too many substitutions in {}", value),
            430,
        ))
    }

    pub fn setenv(&mut self, key: &str, value: impl Into<Value>, replace: Replace) {
        let value = value.into();
        match replace {
            Replace::No => self.environment.add(key, value),
            Replace::Yes | Replace::YesOrSetAtBottom => {
                if let Some(slot) = self.environment.find_mut(key) {
                    *slot = value;
                } else if replace == Replace::Yes {
                    self.environment.add(key, value);
                } else {
                    self.environment.add_to_toplevel(key, value);
                }
            }
        }
    }

    /// Bind in the base frame, visible after every scope is left.
    pub fn setenv_toplevel(&mut self, key: &str, value: impl Into<Value>) {
        self.environment.add_to_toplevel(key, value.into());
    }

    pub fn substitute(&self, text: &str) -> Result<Value> {
        self.environment.substitute(text)
    }

    pub fn substitute_value(&self, value: &Value) -> Result<Value> {
        self.environment.substitute_value(value)
    }

    pub fn format_environment(&self, indent: &str) -> String {
        self.environment.format(indent)
    }

    pub fn format_toplevel(&self) -> String {
        self.documents.format_toplevel()
    }
}
