// Author: Dustin Pilgrim
// License: MIT

use crate::error::RjsonError;
use crate::utils::describe_symbol;

mod scanner;

pub use scanner::is_blank;

/// Cursor over the source text with line/column tracking.
///
/// `line` and `column` are 1-based and always describe the symbol under
/// the cursor, so errors raised while handling it point at it.
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset of the symbol under the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn current(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Move past the current symbol.
    pub fn advance(&mut self) -> Option<char> {
        scanner::bump(self)
    }

    pub fn error(&self, message: impl Into<String>, code: u32) -> RjsonError {
        RjsonError::ParseError {
            message: message.into(),
            line: self.line,
            column: self.column,
            hint: None,
            code: Some(code),
        }
    }

    pub fn unexpected(&self, symbol: char) -> RjsonError {
        self.error(format!("unexpected symbol: {}", describe_symbol(symbol)), 101)
    }
}
