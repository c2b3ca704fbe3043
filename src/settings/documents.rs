use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ast::{Document, NULL, Value};
use crate::error::Result;
use crate::parser::{self, ParseOptions};
use crate::resolver::expand_home;

/// One loaded settings layer.
#[derive(Debug, Clone)]
struct Layer {
    /// File the layer was read from; in-memory layers have none.
    path: Option<PathBuf>,
    name: String,
    document: Document,
}

/// Settings layers, most recently loaded first.
///
/// Lookups scan the layers front to back, so later loads override
/// earlier ones key by key.
#[derive(Debug, Clone, Default)]
pub struct LoadedDocuments {
    layers: Vec<Layer>,
}

impl LoadedDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Read and parse `path`, placing it in front of every other layer.
    ///
    /// Comment keys are kept: `?`-prefixed commands are resolved at apply time.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = expand_home(path.as_ref());
        let document = parser::parse_file(&path, ParseOptions::keep_comments())?;
        debug!(path = %path.display(), "settings layer loaded");
        self.layers.insert(
            0,
            Layer {
                name: path.display().to_string(),
                path: Some(path),
                document,
            },
        );
        Ok(())
    }

    /// Add a layer parsed from `text`. It is not re-read on reload.
    pub fn load_str(&mut self, name: &str, text: &str) -> Result<()> {
        let document = parser::parse_document(text, ParseOptions::keep_comments())?;
        self.layers.insert(
            0,
            Layer {
                path: None,
                name: name.to_string(),
                document,
            },
        );
        Ok(())
    }

    /// First non-null value of `key` over all layers.
    pub fn get(&self, key: &str) -> &Value {
        self.layers
            .iter()
            .map(|layer| layer.document.get(key))
            .find(|value| !value.is_null())
            .unwrap_or(&NULL)
    }

    /// Value of `key` in the most recent layer only.
    pub fn top(&self, key: &str) -> &Value {
        self.layers
            .first()
            .map_or(&NULL, |layer| layer.document.get(key))
    }

    /// Value of `key` in the layer at `index` (0 is the most recent).
    pub fn get_in(&self, index: usize, key: &str) -> &Value {
        self.layers
            .get(index)
            .map_or(&NULL, |layer| layer.document.get(key))
    }

    /// Layer names, most recent first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.name.as_str())
    }

    /// Parse the file behind the layer at `index` again, in place.
    pub(crate) fn reparse(&mut self, index: usize) -> Result<()> {
        let Some(layer) = self.layers.get_mut(index) else {
            return Ok(());
        };
        if let Some(path) = &layer.path {
            debug!(path = %path.display(), "re-loading settings layer");
            layer.document = parser::parse_file(path, ParseOptions::keep_comments())?;
        }
        Ok(())
    }

    /// Top-level keys of every layer, most recent first.
    pub fn format_toplevel(&self) -> String {
        let mut out = String::new();
        for layer in &self.layers {
            let keys: Vec<&str> = match layer.document.root() {
                Value::Object(items) => items.keys().map(String::as_str).collect(),
                _ => Vec::new(),
            };
            out.push_str(&format!("{}: {}\n", layer.name, keys.join(" ")));
        }
        out
    }
}
