use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::types::StatusMessage;

/// Everything the Shell needs to paint the page.
///
/// Labels and flags are derived here so the Shell stays a dumb renderer.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub scan_button_label: String,
    pub scan_button_enabled: bool,
    pub scan_status: String,
    pub scan_spinner: bool,

    pub password_input_type: String,
    pub password_toggle_label: String,

    pub submit_button_label: String,
    pub submit_button_enabled: bool,

    pub message: Option<StatusMessage>,
    pub message_class: Option<String>,

    pub redirect_target: Option<String>,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        Self {
            scan_button_label: model.scan_state.button_label().to_string(),
            scan_button_enabled: !model.scan_state.is_in_progress(),
            scan_status: model.scan_state.status_text().to_string(),
            scan_spinner: matches!(model.scan_state, crate::types::ScanState::Scanning),
            password_input_type: model.password_visibility.input_type().to_string(),
            password_toggle_label: model.password_visibility.toggle_label().to_string(),
            submit_button_label: model.submit_state.button_label().to_string(),
            submit_button_enabled: model.submit_state.is_enabled(),
            message_class: model
                .message
                .as_ref()
                .map(|m| m.severity.class_name().to_string()),
            message: model.message.clone(),
            redirect_target: model.redirect_target.clone(),
        }
    }
}
