use crux_core::{render::render, Command};

use crate::after_delay;
use crate::events::{Event, ScanEvent};
use crate::model::Model;
use crate::types::ScanState;
use crate::Effect;

/// Handle simulated scan events
pub fn handle(event: ScanEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ScanEvent::Start => handle_scan_start(model),
        ScanEvent::StageElapsed => handle_scan_stage_elapsed(model),
    }
}

/// Start the scan sequence unless one is already running
fn handle_scan_start(model: &mut Model) -> Command<Effect, Event> {
    if model.scan_state.is_in_progress() {
        log::debug!("scan already in progress, ignoring");
        return Command::done();
    }

    model.scan_state = ScanState::Scanning;
    enter_scan_stage(model)
}

/// Advance the sequence once the shell delay ran out
fn handle_scan_stage_elapsed(model: &mut Model) -> Command<Effect, Event> {
    if !model.scan_state.is_in_progress() {
        return Command::done();
    }

    model.scan_state = model.scan_state.next();
    enter_scan_stage(model)
}

fn enter_scan_stage(model: &Model) -> Command<Effect, Event> {
    match model.scan_state.stage_millis() {
        Some(millis) => Command::all([
            render(),
            after_delay!(millis, Event::Scan(ScanEvent::StageElapsed)),
        ]),
        None => render(),
    }
}
