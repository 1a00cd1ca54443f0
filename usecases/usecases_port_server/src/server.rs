//! Server Module
//!
//! The request loop. The first message initializes the handler state; each
//! later message is handled to completion before the next one is read, so
//! the state is never touched by two requests at once.

use entities_data_handling::Term;

use crate::handler::{Handler, HandlerError, Outbox, Outcome};

/// A bidirectional stream of terms
pub trait TermChannel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Next message, or `None` at end of input
    fn recv(&mut self) -> Result<Option<Term>, Self::Error>;

    fn send(&mut self, term: &Term) -> Result<(), Self::Error>;
}

/// Reasons the loop stops before end of input
#[derive(thiserror::Error, Debug)]
pub enum ServerError<E: std::error::Error + 'static> {
    /// The channel failed to read or write
    #[error("port error: {0}")]
    Port(#[source] E),

    /// The handler rejected the first message
    #[error("init failed: {0}")]
    Init(#[source] HandlerError),
}

/// Run `handler` over `channel` until end of input
///
/// Handler failures are answered with an error tuple and the loop goes on.
/// Channel failures end the loop.
pub fn serve<C, H>(channel: &mut C, handler: &mut H) -> Result<(), ServerError<C::Error>>
where
    C: TermChannel,
    H: Handler,
{
    let first = match channel.recv().map_err(ServerError::Port)? {
        Some(term) => term,
        None => {
            log::debug!("channel closed before the initial state arrived");
            return Ok(());
        }
    };
    let mut state = handler.init(first).map_err(ServerError::Init)?;
    let mut outbox = Outbox::new();
    let mut handled = 0u64;

    while let Some(request) = channel.recv().map_err(ServerError::Port)? {
        log::debug!("request {}: {}", handled, request);
        let result = handler.handle(request, &mut state, &mut outbox);
        for message in outbox.drain() {
            channel.send(&message).map_err(ServerError::Port)?;
        }
        match result {
            Ok(Outcome::Reply(reply)) => channel.send(&reply).map_err(ServerError::Port)?,
            Ok(Outcome::NoReply) => {}
            Err(err) => {
                log::warn!("request {} failed: {}", handled, err);
                channel.send(&err.to_term()).map_err(ServerError::Port)?;
            }
        }
        handled += 1;
    }

    log::debug!("channel closed after {} requests", handled);
    Ok(())
}
