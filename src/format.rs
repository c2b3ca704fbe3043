// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use crate::ast::{Document, Object, Value};
use crate::utils::escape_json_string;

/// An object carrying `"**rjson_pp**": true` is always laid out on several lines.
pub const FORCE_PP_KEY: &str = "**rjson_pp**";
/// An object carrying `"**rjson_no_pp**": true` is always kept on one line.
pub const NO_PP_KEY: &str = "**rjson_no_pp**";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compact {
    #[default]
    Tight,
    /// A space after every `:` and `,` of the outermost container.
    Spaced,
}

/// Whether the pretty form starts with the `_` indentation hint for editors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmacsIndent {
    #[default]
    No,
    Yes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyOptions {
    pub indent: usize,
    pub emacs_indent: EmacsIndent,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            emacs_indent: EmacsIndent::No,
        }
    }
}

impl Value {
    /// Single-line text, no spaces between tokens.
    pub fn to_json(&self) -> String {
        to_json(self, Compact::Tight)
    }

    pub fn to_json_pp(&self, options: &PrettyOptions) -> String {
        to_json_pp(self, options)
    }
}

pub fn to_json(value: &Value, compact: Compact) -> String {
    let mut out = String::new();
    write_compact(&mut out, value, compact);
    out
}

/// Indented text. Containers whose children are all scalars or empty
/// containers stay on one line.
pub fn to_json_pp(value: &Value, options: &PrettyOptions) -> String {
    let mut out = String::new();
    write_pretty(&mut out, value, options.indent, options.emacs_indent, 0);
    out
}

fn is_pp_key(key: &str) -> bool {
    key == FORCE_PP_KEY || key == NO_PP_KEY
}

fn flag(items: &Object, key: &str) -> bool {
    items.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn is_simple(value: &Value, dive: bool) -> bool {
    match value {
        Value::Object(items) => {
            !flag(items, FORCE_PP_KEY)
                && (items.is_empty() || (dive && items.values().all(|v| is_simple(v, false))))
        }
        Value::Array(items) => {
            items.is_empty() || (dive && items.iter().all(|v| is_simple(v, false)))
        }
        _ => true,
    }
}

fn write_scalar(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(n.as_str()),
        Value::String(s) => out.push_str(&escape_json_string(s)),
        Value::Array(_) | Value::Object(_) => write_compact(out, value, Compact::Tight),
    }
}

fn write_compact(out: &mut String, value: &Value, compact: Compact) {
    let (colon, comma) = match compact {
        Compact::Tight => (":", ","),
        Compact::Spaced => (": ", ", "),
    };
    match value {
        Value::Object(items) => {
            out.push('{');
            let visible = items.iter().filter(|(key, _)| !is_pp_key(key));
            for (index, (key, item)) in visible.enumerate() {
                if index > 0 {
                    out.push_str(comma);
                }
                out.push_str(&escape_json_string(key));
                out.push_str(colon);
                write_compact(out, item, Compact::Tight);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(comma);
                }
                write_compact(out, item, Compact::Tight);
            }
            out.push(']');
        }
        scalar => write_scalar(out, scalar),
    }
}

fn write_pretty(out: &mut String, value: &Value, indent: usize, emacs: EmacsIndent, prefix: usize) {
    match value {
        Value::Object(items) if !is_simple(value, true) && !flag(items, NO_PP_KEY) => {
            let visible: Vec<_> = items.iter().filter(|(key, _)| !is_pp_key(key)).collect();
            if visible.is_empty() {
                out.push_str("{}");
                return;
            }
            if emacs == EmacsIndent::Yes && indent > 0 {
                out.push('{');
                out.push_str(&" ".repeat(indent - 1));
                out.push_str(&format!(
                    "\"_\": \"-*- js-indent-level: {} -*-\",\n",
                    indent
                ));
            } else {
                out.push_str("{\n");
            }
            for (index, (key, item)) in visible.into_iter().enumerate() {
                if index > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&" ".repeat(prefix + indent));
                out.push_str(&escape_json_string(key));
                out.push_str(": ");
                write_pretty(out, item, indent, EmacsIndent::No, prefix + indent);
            }
            out.push('\n');
            out.push_str(&" ".repeat(prefix));
            out.push('}');
        }
        Value::Array(items) if !is_simple(value, true) => {
            out.push_str("[\n");
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&" ".repeat(prefix + indent));
                write_pretty(out, item, indent, EmacsIndent::No, prefix + indent);
            }
            out.push('\n');
            out.push_str(&" ".repeat(prefix));
            out.push(']');
        }
        Value::Object(_) | Value::Array(_) => write_compact(out, value, Compact::Spaced),
        scalar => write_scalar(out, scalar),
    }
}

/// `{}` is compact, `{:#}` pretty with an indent of 2.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&to_json_pp(self, &PrettyOptions::default()))
        } else {
            f.write_str(&self.to_json())
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.root(), f)
    }
}
