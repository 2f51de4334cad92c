//! Navigation command definitions.
//!
//! Page navigation is a fire-and-forget notification: the Shell replaces the
//! current location and nothing comes back to the Core.

use crux_core::{capability::Operation, Command};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigateOperation {
    pub path: String,
}

impl Operation for NavigateOperation {
    type Output = ();
}

/// Ask the Shell to load `path`
pub fn navigate<Effect, Event>(path: impl Into<String>) -> Command<Effect, Event>
where
    Effect: Send + From<crux_core::Request<NavigateOperation>> + 'static,
    Event: Send + 'static,
{
    Command::notify_shell(NavigateOperation { path: path.into() }).into()
}
