mod form;
mod scan;
mod ui;

use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Initialize => render(),
        Event::Scan(scan_event) => scan::handle(scan_event, model),
        Event::Form(form_event) => form::handle(form_event, model),
        Event::Ui(ui_event) => ui::handle(ui_event, model),
    }
}
