use tracing::{debug, info, warn};

use super::{EnvironmentPush, Lookup, Scope, Settings, ThrowIfNothingApplied};
use crate::ast::Value;
use crate::error::{Result, RjsonError};

const BUILT_INS: [&str; 3] = ["if", "for-each", "-print-environment"];

impl Settings {
    /// Apply the entry `name` looked up in all loaded documents.
    pub fn apply(&mut self, name: &str) -> Result<()> {
        self.apply_in(name, Lookup::AllDocuments)
    }

    /// Apply the entry named `name`.
    ///
    /// References in `name` are substituted first. A name starting with
    /// `?` is commented out and does nothing. Names not found in the
    /// documents are tried as built-ins, then as registered commands.
    pub fn apply_in(&mut self, name: &str, lookup: Lookup) -> Result<()> {
        if name.is_empty() {
            return Err(RjsonError::settings("cannot apply: empty name", 401));
        }
        if name.starts_with('?') {
            return Ok(());
        }
        let key = self.entry_name(name)?;
        let entry = match lookup {
            Lookup::AllDocuments => self.documents.get(&key),
            Lookup::TopDocument => self.documents.top(&key),
        }
        .clone();

        if !entry.is_null() {
            debug!(name = %key, "apply");
            return self.apply_value(&entry);
        }
        if self.apply_built_in(&key)? {
            return Ok(());
        }
        Err(RjsonError::settings(
            format!("settings entry not found: \"{}\"", key),
            403,
        ))
    }

    /// Apply `name` from the most recent document; absent names are skipped.
    pub fn apply_top(&mut self, name: &str) -> Result<()> {
        if name.is_empty() || name.starts_with('?') {
            return Ok(());
        }
        let key = self.entry_name(name)?;
        let entry = self.documents.top(&key).clone();
        if entry.is_null() {
            return Ok(());
        }
        debug!(name = %key, "apply top");
        self.apply_value(&entry)
    }

    /// Apply the first of `names` that can be resolved.
    pub fn apply_first<S: AsRef<str>>(
        &mut self,
        names: &[S],
        throw: ThrowIfNothingApplied,
    ) -> Result<()> {
        for name in names {
            let name = name.as_ref();
            if name.is_empty() || name.starts_with('?') {
                continue;
            }
            let key = self.entry_name(name)?;
            if !self.documents.get(&key).is_null() || self.is_command(&key) {
                return self.apply(name);
            }
        }
        match throw {
            ThrowIfNothingApplied::Yes => {
                let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
                Err(RjsonError::settings(
                    format!("none of the settings entries found: {:?}", names),
                    404,
                ))
            }
            ThrowIfNothingApplied::No => Ok(()),
        }
    }

    /// Run a command array.
    ///
    /// Strings are applied by name, objects run their `N` command in a new
    /// scope, nulls are commented-out steps. Errors carry the array they
    /// surfaced in.
    pub fn apply_value(&mut self, entry: &Value) -> Result<()> {
        self.apply_items(entry)
            .map_err(|e| e.context(entry.to_json()))
    }

    fn apply_items(&mut self, entry: &Value) -> Result<()> {
        let Value::Array(items) = entry else {
            return Err(RjsonError::settings(
                format!("cannot apply: {} (array expected)", entry),
                405,
            ));
        };
        for item in items {
            match item {
                Value::String(name) => self.apply(name)?,
                Value::Object(_) => self.push_and_apply(item)?,
                Value::Null => {}
                other => {
                    return Err(RjsonError::settings(
                        format!("cannot apply: {} (string or object expected)", other),
                        405,
                    ));
                }
            }
        }
        Ok(())
    }

    /// Bind the keys of `entry` in a new frame and run its `N` command.
    ///
    /// `set` binds in the current frame instead and runs nothing.
    fn push_and_apply(&mut self, entry: &Value) -> Result<()> {
        let command = entry.get("N");
        if command.is_null() {
            if !entry.get("?N").is_null() || !entry.get("? N").is_null() {
                return Ok(());
            }
            return Err(RjsonError::settings(
                format!("cannot apply (no \"N\"): {}", entry),
                406,
            ));
        }
        let command = command.to_str()?.to_string();
        let is_set = command == "set";

        let mut scope = EnvironmentPush::new(self, !is_set);
        for (key, value) in entry.object()? {
            if key != "N" {
                scope.environment.add(key.clone(), value.clone());
            }
        }
        if !is_set {
            scope.apply(&command)
        } else {
            if scope.warn_if_set_used {
                warn!(entry = %entry, "\"set\" command has no effect (used inside \"if\" or \"for-each\"?)");
            }
            Ok(())
        }
    }

    fn is_command(&self, name: &str) -> bool {
        BUILT_INS.contains(&name) || self.commands.contains_key(name)
    }

    fn apply_built_in(&mut self, name: &str) -> Result<bool> {
        match name {
            "if" => self.with_set_warning(Settings::apply_if)?,
            "for-each" => self.with_set_warning(Settings::apply_for_each)?,
            "-print-environment" => {
                info!("environment:\n{}", self.environment.format("    "));
            }
            _ => match self.commands.get(name).cloned() {
                Some(command) => {
                    debug!(name, "custom command");
                    command(self)?
                }
                None => return Ok(false),
            },
        }
        Ok(true)
    }

    /// Run `body` with `set` flagged as suspicious.
    fn with_set_warning(&mut self, body: fn(&mut Settings) -> Result<()>) -> Result<()> {
        let saved = std::mem::replace(&mut self.warn_if_set_used, true);
        let result = body(self);
        self.warn_if_set_used = saved;
        result
    }

    fn apply_if(&mut self) -> Result<()> {
        let condition = self.environment.get("condition", Scope::Innermost).clone();
        let branch = if self.eval_condition(&condition)? {
            "then"
        } else {
            "else"
        };
        let body = self.environment.get(branch, Scope::Innermost).clone();
        match &body {
            Value::Null => Ok(()),
            Value::Array(_) => self.apply_value(&body),
            other => Err(RjsonError::settings(
                format!("\"if\": \"{}\" must be an array, got {}", branch, other),
                407,
            )),
        }
    }

    fn apply_for_each(&mut self) -> Result<()> {
        let var = match self.environment.get("var", Scope::Innermost) {
            Value::Null => "name".to_string(),
            other => other.to_str()?.to_string(),
        };
        let values = self
            .environment
            .substitute_value(self.environment.get("values", Scope::Innermost))?;
        let values = match values {
            Value::Array(items) => items,
            other => {
                return Err(RjsonError::settings(
                    format!("\"for-each\": \"values\" must be an array, got {}", other),
                    408,
                ));
            }
        };
        let body = self.environment.get("do", Scope::Innermost).clone();
        if !body.is_array() {
            return Err(RjsonError::settings(
                format!("\"for-each\": \"do\" must be an array, got {}", body),
                408,
            ));
        }

        for value in values {
            let mut scope = self.push_environment();
            scope.environment.add(var.clone(), value);
            scope.apply_value(&body)?;
        }
        Ok(())
    }

    /// Substituted entry name.
    fn entry_name(&self, name: &str) -> Result<String> {
        match self.environment.substitute(name)? {
            Value::String(text) => Ok(text.to_string()),
            other => Err(RjsonError::settings(
                format!("cannot apply: \"{}\" substituted to {} (string expected)", name, other),
                402,
            )),
        }
    }
}
