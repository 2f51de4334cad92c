//! Plain-JSON driver for browser shells.
//!
//! The page script has no generated types, so effects leave the core as
//! [`ShellRequest`] descriptions and come back through the `resolve_*`
//! methods keyed by the id the description carried. Render and navigation
//! carry no id since nothing is returned for them.

use std::collections::HashMap;

use crux_core::{Core, Request};
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
use serde::Serialize;

use crate::commands::delay::{DelayOperation, DelayOutput};
use crate::events::Event;
use crate::http_helpers::BASE_URL;
use crate::view::ViewModel;
use crate::{App, Effect};

/// One thing the page has to do on behalf of the core
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShellRequest {
    Render,
    Http {
        id: u32,
        method: String,
        /// Path relative to the page origin
        url: String,
        headers: Vec<(String, String)>,
        body: String,
    },
    Delay {
        id: u32,
        millis: u64,
    },
    Navigate {
        path: String,
    },
}

enum Pending {
    Http(Request<HttpRequest>),
    Delay(Request<DelayOperation>),
}

pub struct Shell {
    core: Core<App>,
    pending: HashMap<u32, Pending>,
    next_id: u32,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            core: Core::new(),
            pending: HashMap::new(),
            next_id: 0,
        }
    }
}

impl Shell {
    pub fn process_event(&mut self, event: Event) -> Vec<ShellRequest> {
        let effects = self.core.process_event(event);
        self.describe(effects)
    }

    pub fn view(&self) -> ViewModel {
        self.core.view()
    }

    /// The timer with `id` ran out
    pub fn resolve_delay(&mut self, id: u32) -> Result<Vec<ShellRequest>, String> {
        let Some(Pending::Delay(mut request)) =
            self.take(id, |pending| matches!(pending, Pending::Delay(_)))
        else {
            return Err(format!("no pending delay with id {id}"));
        };

        let effects = self
            .core
            .resolve(&mut request, DelayOutput::Elapsed)
            .map_err(|e| format!("failed to resolve delay {id}: {e:?}"))?;
        Ok(self.describe(effects))
    }

    /// The request with `id` got an answer, whatever its status
    pub fn resolve_http(
        &mut self,
        id: u32,
        status: u16,
        body: Vec<u8>,
    ) -> Result<Vec<ShellRequest>, String> {
        let response = HttpResponse::status(status).body(body).build();
        self.finish_http(id, HttpResult::Ok(response))
    }

    /// The request with `id` never got an answer
    pub fn fail_http(&mut self, id: u32, message: String) -> Result<Vec<ShellRequest>, String> {
        self.finish_http(id, HttpResult::Err(crux_http::HttpError::Io(message)))
    }

    fn finish_http(&mut self, id: u32, result: HttpResult) -> Result<Vec<ShellRequest>, String> {
        let Some(Pending::Http(mut request)) =
            self.take(id, |pending| matches!(pending, Pending::Http(_)))
        else {
            return Err(format!("no pending http request with id {id}"));
        };

        let effects = self
            .core
            .resolve(&mut request, result)
            .map_err(|e| format!("failed to resolve http request {id}: {e:?}"))?;
        Ok(self.describe(effects))
    }

    fn describe(&mut self, effects: Vec<Effect>) -> Vec<ShellRequest> {
        effects
            .into_iter()
            .map(|effect| match effect {
                Effect::Render(_) => ShellRequest::Render,
                Effect::Navigate(request) => ShellRequest::Navigate {
                    path: request.operation.path,
                },
                Effect::Delay(request) => {
                    let millis = request.operation.millis;
                    let id = self.park(Pending::Delay(request));
                    ShellRequest::Delay { id, millis }
                }
                Effect::Http(request) => {
                    let operation = request.operation.clone();
                    let id = self.park(Pending::Http(request));
                    ShellRequest::Http {
                        id,
                        method: operation.method,
                        url: operation
                            .url
                            .strip_prefix(BASE_URL)
                            .unwrap_or(&operation.url)
                            .to_string(),
                        headers: operation
                            .headers
                            .into_iter()
                            .map(|header| (header.name, header.value))
                            .collect(),
                        body: String::from_utf8_lossy(&operation.body).into_owned(),
                    }
                }
            })
            .collect()
    }

    // a mismatched id leaves the pending request in place
    fn take(&mut self, id: u32, wanted: fn(&Pending) -> bool) -> Option<Pending> {
        if self.pending.get(&id).is_some_and(wanted) {
            self.pending.remove(&id)
        } else {
            None
        }
    }

    fn park(&mut self, pending: Pending) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.insert(id, pending);
        id
    }
}
