//! Server-side validation of submitted WiFi credentials.
//!
//! The page only checks for an empty SSID and a short password; the device
//! enforces the full 802.11 / WPA2 limits before accepting anything.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub const MAX_SSID_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 63;

/// Raw `/save` form fields
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    pub ssid: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveRejection {
    #[error("Missing parameters")]
    MissingParameters,
    #[error("Invalid SSID format")]
    InvalidSsid,
    #[error("Invalid password format")]
    InvalidPassword,
}

/// Credentials accepted by the device
#[derive(Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: String,
    password: String,
}

impl WifiCredentials {
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// never print the passphrase
impl fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &"********")
            .finish()
    }
}

impl TryFrom<SaveForm> for WifiCredentials {
    type Error = SaveRejection;

    fn try_from(form: SaveForm) -> Result<Self, Self::Error> {
        let (Some(ssid), Some(password)) = (form.ssid, form.password) else {
            return Err(SaveRejection::MissingParameters);
        };

        let ssid = ssid.trim();

        if !is_valid_ssid(ssid) {
            return Err(SaveRejection::InvalidSsid);
        }

        if !is_valid_password(&password) {
            return Err(SaveRejection::InvalidPassword);
        }

        Ok(Self {
            ssid: ssid.to_string(),
            password,
        })
    }
}

fn is_printable_ascii(value: &str) -> bool {
    value.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// 1..=32 bytes of printable ASCII
pub fn is_valid_ssid(ssid: &str) -> bool {
    (1..=MAX_SSID_LEN).contains(&ssid.len()) && is_printable_ascii(ssid)
}

/// WPA2 passphrase: 8..=63 bytes of printable ASCII
pub fn is_valid_password(password: &str) -> bool {
    (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.len())
        && is_printable_ascii(password)
}
