pub mod ast;
pub mod error;
pub mod export;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod settings;
pub mod utils;

pub use ast::{Document, Kind, NULL, Number, Object, Text, Value};
pub use error::{Result, RjsonError};
pub use format::{Compact, EmacsIndent, PrettyOptions};
pub use parser::{ParseOptions, RemoveComments, parse_document, parse_file, parse_str};
pub use settings::{
    Command, Environment, EnvironmentPush, LoadedDocuments, Lookup, Replace, Scope, Settings,
    ThrowIfNothingApplied,
};
