// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::ast::{Document, Value};
use crate::error::{Result, RjsonError};
use crate::lexer::Scanner;
use crate::resolver::expand_home;

mod container;
mod handler;
mod scalar;

use handler::{Handler, Step};

/// Open objects and arrays allowed at once.
pub const MAX_NESTING: usize = 128;

/// Whether `?`-keys are stripped after parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoveComments {
    #[default]
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub remove_comments: RemoveComments,
}

impl ParseOptions {
    pub fn keep_comments() -> Self {
        Self {
            remove_comments: RemoveComments::No,
        }
    }
}

/// Pushdown automaton over the symbols of one text buffer.
///
/// The bottom of the stack is always the toplevel handler. Every other
/// handler is one open production; when it completes, its value goes to
/// the handler below it.
pub struct Parser<'a> {
    source: &'a Arc<str>,
    scanner: Scanner<'a>,
    handlers: Vec<Handler>,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Arc<str>) -> Self {
        Self {
            source,
            scanner: Scanner::new(source),
            handlers: vec![Handler::Toplevel(None)],
            nesting: 0,
        }
    }

    pub fn parse(mut self) -> Result<Value> {
        while let Some(symbol) = self.scanner.current() {
            let top = self
                .handlers
                .last_mut()
                .ok_or_else(|| stack_exhausted(&self.scanner))?;
            let step = top.handle(symbol, &self.scanner)?;
            match step {
                Step::Stay => {
                    self.scanner.advance();
                }
                Step::Push(handler) => {
                    self.push(handler)?;
                    self.scanner.advance();
                }
                Step::PushAndRetry(handler) => self.push(handler)?,
                Step::Pop => {
                    self.pop()?;
                    self.scanner.advance();
                }
                Step::PopAndRetry => self.pop()?,
            }
        }

        while self.handlers.len() > 1 {
            if self.handlers.last().is_some_and(|h| !h.completes_at_end()) {
                return Err(self.scanner.error("unexpected end of input", 110));
            }
            self.pop()?;
        }

        match self.handlers.pop() {
            Some(toplevel) => Ok(toplevel
                .finish(self.source, &self.scanner)?
                .unwrap_or_default()),
            None => Ok(Value::Null),
        }
    }

    fn push(&mut self, handler: Handler) -> Result<()> {
        if handler.is_container() {
            if self.nesting == MAX_NESTING {
                return Err(self.scanner.error(
                    format!("nesting too deep, at most {} levels allowed", MAX_NESTING),
                    112,
                ));
            }
            self.nesting += 1;
        }
        self.handlers.push(handler);
        Ok(())
    }

    /// Finish the top handler and feed its value to the one below.
    fn pop(&mut self) -> Result<()> {
        let handler = self
            .handlers
            .pop()
            .ok_or_else(|| stack_exhausted(&self.scanner))?;
        if handler.is_container() {
            self.nesting -= 1;
        }
        if let Some(value) = handler.finish(self.source, &self.scanner)? {
            let scanner = &self.scanner;
            let parent = self
                .handlers
                .last_mut()
                .ok_or_else(|| stack_exhausted(scanner))?;
            parent.receive(value, scanner)?;
        }
        Ok(())
    }
}

fn stack_exhausted(scanner: &Scanner) -> RjsonError {
    scanner.error("parser stack is empty", 100)
}

/// Parse `text` into a tree with comments removed.
pub fn parse_str(text: &str) -> Result<Value> {
    parse_document(text, ParseOptions::default()).map(Document::into_root)
}

/// Parse `text` into a document that owns a copy of it.
///
/// The top-level `_` key (editor indentation hint) is always dropped.
pub fn parse_document(text: &str, options: ParseOptions) -> Result<Document> {
    let source: Arc<str> = Arc::from(text);
    let mut root = Parser::new(&source).parse()?;
    root.remove_emacs_indent();
    if options.remove_comments == RemoveComments::Yes {
        root.remove_comments();
    }
    Ok(Document::new(source, root))
}

pub fn parse_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let path = expand_home(path.as_ref());
    debug!(path = %path.display(), "parsing file");
    let text = std::fs::read_to_string(&path).map_err(|e| RjsonError::FileError {
        message: e.to_string(),
        path: path.display().to_string(),
        hint: Some("Check that the file exists and is readable UTF-8".into()),
        code: Some(301),
    })?;
    parse_document(&text, options)
}

#[cfg(test)]
mod tests;
