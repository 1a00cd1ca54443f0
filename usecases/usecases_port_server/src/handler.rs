//! Handler Module
//!
//! The contract between the server loop and request handling code.

use entities_data_handling::{Atom, Term};

/// Result of handling one request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Send this term back to the peer
    Reply(Term),
    /// Send nothing
    NoReply,
}

/// Messages a handler sends before its reply
#[derive(Debug, Default)]
pub struct Outbox {
    messages: Vec<Term>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for the peer
    pub fn send(&mut self, term: Term) {
        self.messages.push(term);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Term> {
        self.messages.drain(..)
    }
}

/// Failure raised by a handler
///
/// Reported to the peer as `{error, {Kind, Code, Name, Message, Stack}}`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error {code} ({name}): {message}")]
pub struct HandlerError {
    pub kind: Atom,
    pub code: i64,
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
}

impl HandlerError {
    /// A `user` error with code 0
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: Atom::new("user"),
            code: 0,
            name: "Error".to_string(),
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<Atom>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// The `{error, {Kind, Code, Name, Message, Stack}}` reply
    ///
    /// A missing stack is sent as null.
    pub fn to_term(&self) -> Term {
        let stack = match &self.stack {
            Some(stack) => Term::text(stack.as_str()),
            None => Term::Null,
        };
        Term::tuple(vec![
            Term::atom("error"),
            Term::tuple(vec![
                Term::Atom(self.kind.clone()),
                Term::from(self.code),
                Term::text(self.name.as_str()),
                Term::text(self.message.as_str()),
                stack,
            ]),
        ])
    }
}

/// Request handler driven by [`serve`](crate::serve)
///
/// The first message on the channel goes to `init` and becomes the state.
/// Every later message goes to `handle` together with that state, one at a
/// time.
pub trait Handler {
    type State;

    /// Build the initial state from the first message
    fn init(&mut self, first: Term) -> Result<Self::State, HandlerError>;

    /// Handle one request
    fn handle(
        &mut self,
        request: Term,
        state: &mut Self::State,
        outbox: &mut Outbox,
    ) -> Result<Outcome, HandlerError>;
}
