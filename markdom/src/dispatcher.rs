//! Dispatcher trait definition
//!
//! A dispatcher walks one source representation and drives a [`Handler`] through a
//! [`crate::sequencer::Sequencer`]. Dispatchers keep no state between runs, so the same
//! instance may be dispatched any number of times (never concurrently).

use crate::error::DispatchError;
use crate::handler::Handler;

/// Producer of Markdom events.
pub trait Dispatcher {
    /// Walk the source, feed every event to `handler` and return its result.
    ///
    /// On error the handler has received a truncated stream and its partial output
    /// must be discarded.
    fn dispatch_to<H: Handler>(&self, handler: H) -> Result<H::Output, DispatchError>;
}
