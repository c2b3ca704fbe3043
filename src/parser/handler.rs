use std::sync::Arc;

use super::container::{ArrayHandler, ObjectHandler};
use super::scalar::{LiteralHandler, NumberHandler, StringHandler};
use crate::ast::Value;
use crate::error::Result;
use crate::lexer::{Scanner, is_blank};

/// What the parser loop does after a handler has seen a symbol.
pub(super) enum Step {
    /// Symbol consumed, same handler stays on top.
    Stay,
    /// Symbol consumed, the new handler goes on top.
    Push(Handler),
    /// The new handler goes on top and sees the same symbol again.
    PushAndRetry(Handler),
    /// Symbol consumed, the top handler is done.
    Pop,
    /// The top handler is done; its parent sees the same symbol.
    PopAndRetry,
}

/// One open grammar production.
pub(super) enum Handler {
    Toplevel(Option<Value>),
    Value(Option<Value>),
    Object(ObjectHandler),
    Array(ArrayHandler),
    String(StringHandler),
    Escape,
    Number(NumberHandler),
    Literal(LiteralHandler),
}

impl Handler {
    pub(super) fn handle(&mut self, symbol: char, scanner: &Scanner) -> Result<Step> {
        match self {
            Handler::Toplevel(value) => match value {
                Some(_) => skip_blank(symbol, scanner),
                None => start_value(symbol, scanner),
            },
            Handler::Value(value) => match value {
                Some(_) => Ok(Step::PopAndRetry),
                None => start_value(symbol, scanner),
            },
            Handler::Object(object) => object.handle(symbol, scanner),
            Handler::Array(array) => array.handle(symbol, scanner),
            Handler::String(string) => string.handle(symbol, scanner),
            // exactly one escaped symbol
            Handler::Escape => Ok(Step::Pop),
            Handler::Number(number) => number.handle(symbol, scanner),
            Handler::Literal(literal) => literal.handle(symbol, scanner),
        }
    }

    /// Hand a finished child value to this handler.
    pub(super) fn receive(&mut self, value: Value, scanner: &Scanner) -> Result<()> {
        match self {
            Handler::Toplevel(slot) | Handler::Value(slot) => {
                *slot = Some(value);
                Ok(())
            }
            Handler::Object(object) => object.receive(value, scanner),
            Handler::Array(array) => array.receive(value),
            Handler::String(_) | Handler::Escape | Handler::Number(_) | Handler::Literal(_) => {
                Ok(())
            }
        }
    }

    pub(super) fn is_container(&self) -> bool {
        matches!(self, Handler::Object(_) | Handler::Array(_))
    }

    /// Whether running out of input leaves this production complete.
    pub(super) fn completes_at_end(&self) -> bool {
        match self {
            Handler::Toplevel(_) | Handler::Number(_) => true,
            Handler::Value(value) => value.is_some(),
            Handler::Literal(literal) => literal.is_complete(),
            Handler::Object(_) | Handler::Array(_) | Handler::String(_) | Handler::Escape => false,
        }
    }

    /// Produce the node, if the production yields one.
    pub(super) fn finish(self, source: &Arc<str>, scanner: &Scanner) -> Result<Option<Value>> {
        let value = match self {
            Handler::Toplevel(value) => Some(value.unwrap_or_default()),
            Handler::Value(value) => value,
            Handler::Object(object) => Some(object.finish()),
            Handler::Array(array) => Some(array.finish()),
            Handler::String(string) => Some(string.finish(source)),
            Handler::Escape => None,
            Handler::Number(number) => Some(number.finish(source, scanner)?),
            Handler::Literal(literal) => Some(literal.finish()),
        };
        Ok(value)
    }
}

/// Dispatch on the first symbol of a value.
fn start_value(symbol: char, scanner: &Scanner) -> Result<Step> {
    let step = match symbol {
        '"' => Step::Push(Handler::String(StringHandler::new(scanner.pos() + 1))),
        '-' | '+' | '.' | '0'..='9' => {
            Step::PushAndRetry(Handler::Number(NumberHandler::new(scanner.pos())))
        }
        't' => Step::Push(Handler::Literal(LiteralHandler::new("true", Value::Bool(true)))),
        'f' => Step::Push(Handler::Literal(LiteralHandler::new("false", Value::Bool(false)))),
        'n' => Step::Push(Handler::Literal(LiteralHandler::new("null", Value::Null))),
        '{' => Step::Push(Handler::Object(ObjectHandler::default())),
        '[' => Step::Push(Handler::Array(ArrayHandler::default())),
        _ => return skip_blank(symbol, scanner),
    };
    Ok(step)
}

/// Default behaviour: blanks are skipped, anything else is an error.
pub(super) fn skip_blank(symbol: char, scanner: &Scanner) -> Result<Step> {
    if is_blank(symbol) {
        Ok(Step::Stay)
    } else {
        Err(scanner.unexpected(symbol))
    }
}
