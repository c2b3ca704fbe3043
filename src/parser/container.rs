use super::handler::{Handler, Step, skip_blank};
use super::scalar::StringHandler;
use crate::ast::{Object, Value};
use crate::error::Result;
use crate::lexer::{Scanner, is_blank};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum ObjectState {
    #[default]
    Key,
    KeyAfterComma,
    Colon,
    Member,
    Comma,
}

/// `{ ... }`: keys are read with a string handler, values with a value handler.
#[derive(Default)]
pub(crate) struct ObjectHandler {
    items: Object,
    key: Option<String>,
    state: ObjectState,
}

impl ObjectHandler {
    pub(super) fn handle(&mut self, symbol: char, scanner: &Scanner) -> Result<Step> {
        use ObjectState::*;

        match (self.state, symbol) {
            (Key | KeyAfterComma, '"') => {
                self.state = Colon;
                Ok(Step::Push(Handler::String(StringHandler::new(scanner.pos() + 1))))
            }
            // a trailing comma is tolerated
            (Key | KeyAfterComma | Comma, '}') => Ok(Step::Pop),
            (Key, ',') => Err(scanner.error(
                "unexpected comma right after the beginning of an object",
                102,
            )),
            (KeyAfterComma, ',') => {
                Err(scanner.error("unexpected comma -- two successive commas?", 103))
            }
            (Colon, ':') => {
                self.state = Member;
                Ok(Step::Stay)
            }
            (Colon, ',') => Err(scanner.error("unexpected comma, colon is expected there", 105)),
            (Member, c) if !is_blank(c) => {
                self.state = Comma;
                Ok(Step::PushAndRetry(Handler::Value(None)))
            }
            (Comma, ',') => {
                self.state = KeyAfterComma;
                Ok(Step::Stay)
            }
            (Comma, '"') => Err(scanner.error("unexpected \" -- did you forget comma?", 104)),
            _ => skip_blank(symbol, scanner),
        }
    }

    pub(super) fn receive(&mut self, value: Value, scanner: &Scanner) -> Result<()> {
        match self.key.take() {
            // later duplicates replace earlier ones
            Some(key) => {
                self.items.insert(key, value);
            }
            None => {
                let key = value
                    .as_str()
                    .ok_or_else(|| scanner.error("object key must be a string", 106))?;
                self.key = Some(key.to_string());
            }
        }
        Ok(())
    }

    pub(super) fn finish(self) -> Value {
        Value::Object(self.items)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum ArrayState {
    #[default]
    Item,
    ItemAfterComma,
    Comma,
}

#[derive(Default)]
pub(crate) struct ArrayHandler {
    items: Vec<Value>,
    state: ArrayState,
}

impl ArrayHandler {
    pub(super) fn handle(&mut self, symbol: char, scanner: &Scanner) -> Result<Step> {
        use ArrayState::*;

        match (self.state, symbol) {
            (_, ']') => Ok(Step::Pop),
            (Item, ',') => Err(scanner.error(
                "unexpected comma right after the beginning of an array",
                102,
            )),
            (ItemAfterComma, ',') => {
                Err(scanner.error("unexpected comma -- two successive commas?", 103))
            }
            (Comma, ',') => {
                self.state = ItemAfterComma;
                Ok(Step::Stay)
            }
            (_, c) if is_blank(c) => Ok(Step::Stay),
            (Item | ItemAfterComma, _) => {
                self.state = Comma;
                Ok(Step::PushAndRetry(Handler::Value(None)))
            }
            (Comma, c) => Err(scanner.error(
                format!("unexpected {} -- did you forget comma?", c),
                104,
            )),
        }
    }

    pub(super) fn receive(&mut self, value: Value) -> Result<()> {
        self.items.push(value);
        Ok(())
    }

    pub(super) fn finish(self) -> Value {
        Value::Array(self.items)
    }
}
