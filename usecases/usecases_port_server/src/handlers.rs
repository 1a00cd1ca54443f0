//! Bundled Handlers
//!
//! - [`Echo`]: replies with every request unchanged
//! - [`Calculator`]: keeps a running integer total

use entities_data_handling::{Integer, Term};

use crate::handler::{Handler, HandlerError, Outbox, Outcome};

/// Replies with each request; the first message is kept as the state
#[derive(Debug, Default, Clone, Copy)]
pub struct Echo;

impl Handler for Echo {
    type State = Term;

    fn init(&mut self, first: Term) -> Result<Term, HandlerError> {
        Ok(first)
    }

    fn handle(
        &mut self,
        request: Term,
        _state: &mut Term,
        _outbox: &mut Outbox,
    ) -> Result<Outcome, HandlerError> {
        Ok(Outcome::Reply(request))
    }
}

/// Running total driven by `{get, _}`, `{add, N}` and `{rem, N}`
///
/// `get` replies with the total; `add` and `rem` change it without a reply.
/// The total starts at 0, or at the first message if that is an integer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    fn unexpected() -> HandlerError {
        HandlerError::new("unexpected request")
    }
}

impl Handler for Calculator {
    type State = Integer;

    fn init(&mut self, first: Term) -> Result<Integer, HandlerError> {
        Ok(first.as_integer().unwrap_or_else(|| Integer::from(0)))
    }

    fn handle(
        &mut self,
        request: Term,
        total: &mut Integer,
        _outbox: &mut Outbox,
    ) -> Result<Outcome, HandlerError> {
        let (command, argument) = match request.as_tuple() {
            Some([command, argument]) => (command, argument),
            _ => return Err(Self::unexpected()),
        };
        let command = command
            .as_atom()
            .map(|atom| atom.as_str())
            .or_else(|| command.as_text())
            .ok_or_else(Self::unexpected)?;

        match command {
            "get" => Ok(Outcome::Reply(Term::integer(total.clone()))),
            "add" => {
                *total += argument.as_integer().ok_or_else(Self::unexpected)?;
                Ok(Outcome::NoReply)
            }
            "rem" => {
                *total -= argument.as_integer().ok_or_else(Self::unexpected)?;
                Ok(Outcome::NoReply)
            }
            _ => Err(Self::unexpected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(command: &str, argument: Term) -> Term {
        Term::tuple(vec![Term::atom(command), argument])
    }

    #[test]
    fn test_echo() {
        let mut echo = Echo;
        let mut state = echo.init(Term::atom("state")).unwrap();
        let reply = echo
            .handle(Term::from(5), &mut state, &mut Outbox::new())
            .unwrap();
        assert_eq!(reply, Outcome::Reply(Term::from(5)));
        assert_eq!(state, Term::atom("state"));
    }

    #[test]
    fn test_calculator_commands() {
        let mut calc = Calculator;
        let mut total = calc.init(Term::atom("start")).unwrap();
        let mut outbox = Outbox::new();

        let outcome = calc.handle(request("add", Term::from(5)), &mut total, &mut outbox);
        assert_eq!(outcome, Ok(Outcome::NoReply));
        let outcome = calc.handle(request("rem", Term::from(7)), &mut total, &mut outbox);
        assert_eq!(outcome, Ok(Outcome::NoReply));
        let outcome = calc.handle(request("get", Term::Nil), &mut total, &mut outbox);
        assert_eq!(outcome, Ok(Outcome::Reply(Term::from(-2))));
    }

    #[test]
    fn test_calculator_integer_initial_state() {
        let mut calc = Calculator;
        let total = calc.init(Term::from(40)).unwrap();
        assert_eq!(total, Integer::from(40));
    }

    #[test]
    fn test_calculator_text_command() {
        let mut calc = Calculator;
        let mut total = Integer::from(1);
        let outcome = calc.handle(
            Term::tuple(vec![Term::text("get"), Term::Nil]),
            &mut total,
            &mut Outbox::new(),
        );
        assert_eq!(outcome, Ok(Outcome::Reply(Term::from(1))));
    }

    #[test]
    fn test_calculator_rejects_unknown_requests() {
        let mut calc = Calculator;
        let mut total = Integer::from(0);
        let mut outbox = Outbox::new();
        for bad in [
            request("mul", Term::from(2)),
            request("add", Term::text("2")),
            Term::atom("get"),
            Term::tuple(vec![Term::from(1), Term::from(2)]),
        ] {
            let err = calc.handle(bad, &mut total, &mut outbox).unwrap_err();
            assert_eq!(err.message, "unexpected request");
        }
        assert_eq!(total, Integer::from(0));
    }
}
