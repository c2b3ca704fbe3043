use std::sync::Arc;

use super::handler::{Handler, Step};
use crate::ast::{Number, Text, Value};
use crate::error::Result;
use crate::lexer::Scanner;
use crate::utils::unescape_json_string;

/// String body after the opening quote.
pub(crate) struct StringHandler {
    start: usize,
    end: usize,
    escaped: bool,
}

impl StringHandler {
    pub(super) fn new(start: usize) -> Self {
        Self {
            start,
            end: start,
            escaped: false,
        }
    }

    pub(super) fn handle(&mut self, symbol: char, scanner: &Scanner) -> Result<Step> {
        match symbol {
            '"' => {
                self.end = scanner.pos();
                Ok(Step::Pop)
            }
            '\\' => {
                self.escaped = true;
                Ok(Step::Push(Handler::Escape))
            }
            _ => Ok(Step::Stay),
        }
    }

    /// Zero-copy unless the body contains escapes.
    pub(super) fn finish(self, source: &Arc<str>) -> Value {
        let text = if self.escaped {
            Text::from(unescape_json_string(&source[self.start..self.end]))
        } else {
            Text::shared(source, self.start..self.end)
        };
        Value::String(text)
    }
}

pub(crate) struct NumberHandler {
    start: usize,
    end: Option<usize>,
    sign_allowed: bool,
    exponent: bool,
    fraction: bool,
}

impl NumberHandler {
    pub(super) fn new(start: usize) -> Self {
        Self {
            start,
            end: None,
            sign_allowed: true,
            exponent: false,
            fraction: false,
        }
    }

    pub(super) fn handle(&mut self, symbol: char, scanner: &Scanner) -> Result<Step> {
        match symbol {
            '0'..='9' => self.sign_allowed = false,
            '-' | '+' if self.sign_allowed => self.sign_allowed = false,
            '.' if !self.exponent && !self.fraction => {
                self.fraction = true;
                self.sign_allowed = false;
            }
            'e' | 'E' if !self.exponent => {
                self.exponent = true;
                self.sign_allowed = true;
            }
            '-' | '+' | '.' | 'e' | 'E' => return Err(scanner.unexpected(symbol)),
            _ => {
                self.end = Some(scanner.pos());
                return Ok(Step::PopAndRetry);
            }
        }
        Ok(Step::Stay)
    }

    pub(super) fn finish(self, source: &Arc<str>, scanner: &Scanner) -> Result<Value> {
        let range = self.start..self.end.unwrap_or(source.len());
        if source[range.clone()].parse::<f64>().is_err() {
            return Err(scanner.error(format!("invalid number: {}", &source[range]), 111));
        }
        let integer = !self.exponent && !self.fraction;
        Ok(Value::Number(Number::from_literal(
            Text::shared(source, range),
            integer,
        )))
    }
}

/// `true`, `false` or `null`, the first symbol already consumed.
pub(crate) struct LiteralHandler {
    word: &'static str,
    matched: usize,
    value: Value,
}

impl LiteralHandler {
    pub(super) fn new(word: &'static str, value: Value) -> Self {
        Self {
            word,
            matched: 1,
            value,
        }
    }

    pub(super) fn is_complete(&self) -> bool {
        self.matched == self.word.len()
    }

    pub(super) fn handle(&mut self, symbol: char, scanner: &Scanner) -> Result<Step> {
        if self.is_complete() {
            return if symbol.is_alphanumeric() || symbol == '_' {
                Err(scanner.unexpected(symbol))
            } else {
                Ok(Step::PopAndRetry)
            };
        }
        if self.word[self.matched..].starts_with(symbol) {
            self.matched += 1;
            Ok(Step::Stay)
        } else {
            Err(scanner.unexpected(symbol))
        }
    }

    pub(super) fn finish(self) -> Value {
        self.value
    }
}
