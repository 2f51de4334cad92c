//! Delay command definitions.
//!
//! The Core never reads a clock. Whenever it needs to wait it asks the Shell
//! for a `DelayOperation`; the Shell sleeps (e.g. `setTimeout`) and resolves the
//! request with [`DelayOutput::Elapsed`]. Tests resolve the request directly,
//! which is how they advance time.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operation that the Shell needs to perform for a delay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DelayOperation {
    pub millis: u64,
}

// The Shell tells us the delay has run out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DelayOutput {
    Elapsed,
}

impl Operation for DelayOperation {
    type Output = DelayOutput;
}

/// Command-based delay API
pub struct Delay<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Delay<Effect, Event>
where
    Effect: Send + From<crux_core::Request<DelayOperation>> + 'static,
    Event: Send + 'static,
{
    /// Wait for `millis` milliseconds of shell time
    pub fn millis(millis: u64) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(DelayOperation { millis })
    }
}

/// Request builder for delay operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: DelayOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<DelayOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: DelayOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = DelayOutput>> {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
