use crux_core::{render::render, Command};

use crate::after_delay;
use crate::commands::navigate::navigate;
use crate::events::{Event, FormEvent};
use crate::http_helpers::{
    build_url, process_save_response, FORM_CONTENT_TYPE, SAVE_ENDPOINT, SUCCESS_PAGE,
};
use crate::model::Model;
use crate::types::{
    Credentials, SaveReceipt, SubmitState, REDIRECT_DELAY_MILLIS, SAVED_MESSAGE,
    SAVE_FAILED_MESSAGE,
};
use crate::{Effect, HttpCmd};

/// Handle credential form events
pub fn handle(event: FormEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        FormEvent::TogglePasswordVisibility => {
            model.password_visibility = model.password_visibility.toggled();
            render()
        }
        FormEvent::Submit { ssid, password } => handle_submit(&ssid, &password, model),
        FormEvent::SaveResponse(result) => handle_save_response(result, model),
        FormEvent::RedirectDue => handle_redirect_due(model),
    }
}

/// Validate the form and post the credentials to the device
fn handle_submit(ssid: &str, password: &str, model: &mut Model) -> Command<Effect, Event> {
    if !model.submit_state.is_enabled() {
        log::debug!("submit ignored while {:?}", model.submit_state);
        return Command::done();
    }

    let credentials = match Credentials::parse(ssid, password) {
        Ok(credentials) => credentials,
        Err(message) => {
            log::debug!("form rejected: {message}");
            return model.set_error_and_render(message);
        }
    };

    model.submit_state = SubmitState::Saving;

    Command::all([
        render(),
        HttpCmd::post(build_url(SAVE_ENDPOINT))
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body_string(credentials.to_form_body())
            .build()
            .then_send(|result| Event::Form(FormEvent::SaveResponse(process_save_response(result)))),
    ])
}

/// Any answer from the device counts as saved; only transport errors fail
fn handle_save_response(
    result: Result<SaveReceipt, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    match result {
        Ok(receipt) => {
            model.submit_state = SubmitState::Saved;
            model.last_save_status = Some(receipt.status);
            model.set_success(SAVED_MESSAGE);

            Command::all([
                render(),
                after_delay!(REDIRECT_DELAY_MILLIS, Event::Form(FormEvent::RedirectDue)),
            ])
        }
        Err(e) => {
            log::warn!("failed to save credentials: {e}");
            model.submit_state = SubmitState::Idle;
            model.set_error_and_render(SAVE_FAILED_MESSAGE)
        }
    }
}

fn handle_redirect_due(model: &mut Model) -> Command<Effect, Event> {
    model.redirect_target = Some(SUCCESS_PAGE.to_string());
    Command::all([render(), navigate(SUCCESS_PAGE)])
}
