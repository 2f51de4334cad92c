pub mod commands;
pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod shell;
pub mod types;
pub mod update;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod wasm;


use crux_core::Command;

// Re-export core types
pub use crate::{
    commands::{
        delay::{DelayOperation, DelayOutput},
        navigate::NavigateOperation,
    },
    events::{Event, FormEvent, ScanEvent, UiEvent},
    http_helpers::{build_url, process_save_response, BASE_URL, SAVE_ENDPOINT, SUCCESS_PAGE},
    model::Model,
    types::*,
    view::ViewModel,
};
pub use crux_http::Result as HttpResult;

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
    Delay(DelayOperation),
    Navigate(NavigateOperation),
}

pub type DelayCmd = crate::commands::delay::Delay<Effect, Event>;
pub type HttpCmd = crux_http::command::Http<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        ViewModel::from(model)
    }
}
