// Author: Dustin Pilgrim
// License: MIT

use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::ast::Value;
use crate::error::{Result, RjsonError};
use crate::parser::parse_str;
use crate::resolver::conf_path;

mod access;
mod apply;
mod condition;
mod documents;
mod environment;

pub use documents::LoadedDocuments;
pub use environment::{Environment, Scope};

/// Command added by the embedding application, run by name like a built-in.
pub type Command = Rc<dyn Fn(&mut Settings) -> Result<()>>;

/// Where `apply` looks a name up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lookup {
    #[default]
    AllDocuments,
    /// Most recently loaded document only.
    TopDocument,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThrowIfNothingApplied {
    #[default]
    No,
    Yes,
}

/// How `setenv` treats an existing binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Replace {
    /// Bind in the innermost frame, shadowing outer bindings.
    #[default]
    No,
    /// Overwrite the innermost existing binding, else bind in the innermost frame.
    Yes,
    /// Overwrite the innermost existing binding, else bind in the base frame.
    YesOrSetAtBottom,
}

/// Interpreter for settings written as JSON.
///
/// Holds the loaded settings layers and the variable environment. Entries
/// are arrays of commands: a string names another entry, an object runs
/// the command in its `N` key with the remaining keys bound in a new scope.
///
/// # Example
/// ```no_run
/// use rjson_settings::Settings;
///
/// # fn main() -> rjson_settings::Result<()> {
/// let mut settings = Settings::new();
/// settings.set_defines(["mode=draft"])?;
/// settings.load("~/settings/plot.json")?;
/// settings.apply("main")?;
/// # Ok(())
/// # }
/// ```
pub struct Settings {
    documents: LoadedDocuments,
    environment: Environment,
    defines: Vec<(String, Value)>,
    commands: IndexMap<String, Command>,
    warn_if_set_used: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self {
            documents: LoadedDocuments::new(),
            environment: Environment::new(),
            defines: Vec::new(),
            commands: IndexMap::new(),
            warn_if_set_used: false,
        }
    }

    pub fn documents(&self) -> &LoadedDocuments {
        &self.documents
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// Load a settings file and apply its `init` entry, if any.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        debug!(path = %path.as_ref().display(), "loading settings");
        self.documents.load(path)?;
        self.apply_top("init")
    }

    pub fn load_many<P: AsRef<Path>>(&mut self, paths: impl IntoIterator<Item = P>) -> Result<()> {
        for path in paths {
            self.load(path)?;
        }
        Ok(())
    }

    /// Load settings from memory; `name` only labels the layer.
    pub fn load_str(&mut self, name: &str, text: &str) -> Result<()> {
        debug!(name, "loading settings from memory");
        self.documents.load_str(name, text)?;
        self.apply_top("init")
    }

    /// Load each name from `$ACMACSD_ROOT/share/conf`, skipping missing files.
    pub fn load_from_conf<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) -> Result<()> {
        for name in names {
            let path = conf_path(name.as_ref())?;
            if path.exists() {
                self.load(&path)?;
            } else {
                warn!(path = %path.display(), "settings file not found, skipped");
            }
        }
        Ok(())
    }

    /// Seed the base frame from `key=value` strings.
    ///
    /// Values that read as a number or a boolean keep that type, anything
    /// else is a string. A bare `key` is bound to `true`. Defines survive
    /// `reload`.
    pub fn set_defines<S: AsRef<str>>(&mut self, defines: impl IntoIterator<Item = S>) -> Result<()> {
        for define in defines {
            let define = define.as_ref();
            let (key, value) = match define.split_once('=') {
                Some((key, text)) => (key.trim(), infer_define(text)),
                None => (define.trim(), Value::Bool(true)),
            };
            if key.is_empty() {
                return Err(RjsonError::SettingsError {
                    message: format!("invalid define: \"{}\"", define),
                    hint: Some("Use key=value or key".into()),
                    code: Some(440),
                });
            }
            self.environment.add_to_toplevel(key, value.clone());
            self.defines.push((key.to_string(), value));
        }
        Ok(())
    }

    /// Reset the environment, read file layers again and replay their
    /// `init` entries, oldest layer first.
    pub fn reload(&mut self) -> Result<()> {
        debug!(layers = self.documents.len(), "reloading settings");
        self.environment = Environment::new();
        for (key, value) in &self.defines {
            self.environment.add_to_toplevel(key.clone(), value.clone());
        }
        for index in (0..self.documents.len()).rev() {
            self.documents.reparse(index)?;
            let init = self.documents.get_in(index, "init").clone();
            if !init.is_null() {
                self.apply_value(&init)?;
            }
        }
        Ok(())
    }

    /// Make `name` callable from settings entries.
    ///
    /// Entries of the loaded documents and the `if`/`for-each` built-ins
    /// take precedence over registered commands.
    pub fn register_command<F>(&mut self, name: &str, command: F)
    where
        F: Fn(&mut Settings) -> Result<()> + 'static,
    {
        self.commands.insert(name.to_string(), Rc::new(command));
    }

    /// New innermost frame, popped when the guard goes out of scope.
    pub fn push_environment(&mut self) -> EnvironmentPush<'_> {
        EnvironmentPush::new(self, true)
    }
}

fn infer_define(text: &str) -> Value {
    match parse_str(text) {
        Ok(value @ (Value::Number(_) | Value::Bool(_))) => value,
        _ => Value::from(text),
    }
}

/// Scope guard over a `Settings`: pops the frame it pushed on drop, on
/// every exit path.
pub struct EnvironmentPush<'a> {
    settings: &'a mut Settings,
    pushed: bool,
}

impl<'a> EnvironmentPush<'a> {
    pub(crate) fn new(settings: &'a mut Settings, push: bool) -> Self {
        if push {
            settings.environment.push();
        }
        Self {
            settings,
            pushed: push,
        }
    }
}

impl Deref for EnvironmentPush<'_> {
    type Target = Settings;

    fn deref(&self) -> &Settings {
        self.settings
    }
}

impl DerefMut for EnvironmentPush<'_> {
    fn deref_mut(&mut self) -> &mut Settings {
        self.settings
    }
}

impl Drop for EnvironmentPush<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.settings.environment.pop();
        }
    }
}
