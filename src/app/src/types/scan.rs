use serde::{Deserialize, Serialize};

/// Time spent in [`ScanState::Scanning`] before the scan is reported complete.
pub const SCAN_SEARCH_MILLIS: u64 = 3000;

/// Time the completion notice stays visible before the control resets.
pub const SCAN_COMPLETE_MILLIS: u64 = 2000;

/// Simulated network scan sequence.
///
/// No radio is touched: the sequence only gives the user a plausible wait.
/// `Idle -> Scanning -> Complete -> Idle`, each arrow after the first driven by
/// a shell delay.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Idle,
    Scanning,
    Complete,
}

impl ScanState {
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, ScanState::Idle)
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            ScanState::Idle => "📡 Scan WiFi Networks",
            ScanState::Scanning | ScanState::Complete => "⏳ Scanning...",
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            ScanState::Idle => "",
            ScanState::Scanning => "Searching for networks...",
            ScanState::Complete => "✓ Scan complete! Found networks will appear here soon.",
        }
    }

    /// Delay to request on entering this state, if the sequence continues.
    pub fn stage_millis(&self) -> Option<u64> {
        match self {
            ScanState::Idle => None,
            ScanState::Scanning => Some(SCAN_SEARCH_MILLIS),
            ScanState::Complete => Some(SCAN_COMPLETE_MILLIS),
        }
    }

    /// State after the pending delay elapsed.
    pub fn next(&self) -> Self {
        match self {
            ScanState::Idle => ScanState::Idle,
            ScanState::Scanning => ScanState::Complete,
            ScanState::Complete => ScanState::Idle,
        }
    }
}
