use serde::{Deserialize, Serialize};

use crate::types::*;

/// Application Model - the complete state of one portal page
///
/// Owned by the core instance, so independent pages (and tests) never share
/// scan or submission state.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    // Simulated scan
    pub scan_state: ScanState,

    // Credential form
    pub password_visibility: PasswordVisibility,
    pub submit_state: SubmitState,
    /// Status code of the last `/save` answer
    pub last_save_status: Option<u16>,

    // Message region
    pub message: Option<StatusMessage>,

    // Navigation requested from the shell
    pub redirect_target: Option<String>,
}

impl Model {
    /// Show an error message
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::error(text));
    }

    /// Show a success message
    pub fn set_success(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::success(text));
    }

    /// Set an error message and return a render command
    pub fn set_error_and_render(
        &mut self,
        text: impl Into<String>,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(text);
        crux_core::render::render()
    }
}
