use serde::{Deserialize, Serialize};

use crate::types::SaveReceipt;

/// Simulated scan events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Start,
    // Shell delay resolved (internal event, skipped from serialization)
    #[serde(skip)]
    StageElapsed,
}

/// Credential form events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum FormEvent {
    TogglePasswordVisibility,
    /// Raw field values as typed; validated by the core
    Submit {
        ssid: String,
        password: String,
    },

    // Internal events, skipped from serialization
    #[serde(skip)]
    SaveResponse(Result<SaveReceipt, String>),
    #[serde(skip)]
    RedirectDue,
}

/// UI-only events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearMessage,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Initialize,
    Scan(ScanEvent),
    Form(FormEvent),
    Ui(UiEvent),
}
