use serde::{Deserialize, Serialize};

/// Minimum WPA2 passphrase length accepted by the page.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Time the "saved" notice stays visible before navigating away.
pub const REDIRECT_DELAY_MILLIS: u64 = 2000;

pub const INVALID_SSID_MESSAGE: &str = "Please enter a valid network name";
pub const SHORT_PASSWORD_MESSAGE: &str = "Password must be at least 8 characters";
pub const SAVED_MESSAGE: &str = "✓ Credentials saved! Device will restart and connect...";
pub const SAVE_FAILED_MESSAGE: &str = "✗ Failed to save credentials. Please try again.";

/// Whether the password input masks its content
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PasswordVisibility {
    #[default]
    Hidden,
    Shown,
}

impl PasswordVisibility {
    pub fn toggled(self) -> Self {
        match self {
            PasswordVisibility::Hidden => PasswordVisibility::Shown,
            PasswordVisibility::Shown => PasswordVisibility::Hidden,
        }
    }

    /// Value for the `type` attribute of the password input
    pub fn input_type(&self) -> &'static str {
        match self {
            PasswordVisibility::Hidden => "password",
            PasswordVisibility::Shown => "text",
        }
    }

    /// Label of the reveal control, naming the action it performs next
    pub fn toggle_label(&self) -> &'static str {
        match self {
            PasswordVisibility::Hidden => "SHOW",
            PasswordVisibility::Shown => "HIDE",
        }
    }
}

/// Lifecycle of a credential submission
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    /// Request in flight, control disabled
    Saving,
    /// Device answered, waiting for the redirect
    Saved,
}

impl SubmitState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, SubmitState::Idle)
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            SubmitState::Idle => "✓ Connect to WiFi",
            SubmitState::Saving => "⏳ Connecting...",
            SubmitState::Saved => "✓ Saved!",
        }
    }
}

/// Credentials that passed client-side validation
///
/// Only lives between validation and building the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: String,
    pub password: String,
}

impl Credentials {
    /// Validates raw form input.
    ///
    /// The SSID is trimmed, the password is taken as typed. On failure the
    /// error is the message to show the user.
    pub fn parse(ssid: &str, password: &str) -> Result<Self, &'static str> {
        let ssid = ssid.trim();

        if ssid.is_empty() {
            return Err(INVALID_SSID_MESSAGE);
        }

        // browser input length counts UTF-16 code units
        if password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(SHORT_PASSWORD_MESSAGE);
        }

        Ok(Self {
            ssid: ssid.to_string(),
            password: password.to_string(),
        })
    }

    /// Form-urlencoded body for `POST /save`
    pub fn to_form_body(&self) -> String {
        format!(
            "ssid={}&password={}",
            encode_component(&self.ssid),
            encode_component(&self.password)
        )
    }
}

/// Characters `encodeURIComponent` leaves as they are on top of `-_.~`
const URI_COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encodes one form value the way the browser page did.
///
/// Every `%` in the encoded output starts a three-character escape, so
/// replacing whole escapes cannot touch an encoded literal `%`.
fn encode_component(value: &str) -> String {
    URI_COMPONENT_MARKS
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |encoded, (escape, mark)| {
            encoded.replace(escape, mark)
        })
}

/// What the device answered to a save request
///
/// The page does not interpret either field; they are kept so a stricter
/// caller can.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveReceipt {
    pub status: u16,
    pub body: String,
}

impl SaveReceipt {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod credentials {
        use super::*;

        #[test]
        fn empty_and_whitespace_ssid_are_rejected() {
            for ssid in ["", " ", "\t", "  \n  "] {
                assert_eq!(
                    Credentials::parse(ssid, "longenough1"),
                    Err(INVALID_SSID_MESSAGE),
                    "ssid {ssid:?}"
                );
            }
        }

        #[test]
        fn ssid_is_checked_before_password() {
            assert_eq!(Credentials::parse("  ", "short"), Err(INVALID_SSID_MESSAGE));
        }

        #[test]
        fn passwords_below_eight_units_are_rejected() {
            for password in ["", "short", "1234567", "       "] {
                assert_eq!(
                    Credentials::parse("Home Net", password),
                    Err(SHORT_PASSWORD_MESSAGE),
                    "password {password:?}"
                );
            }
        }

        #[test]
        fn password_is_not_trimmed() {
            let credentials = Credentials::parse("  Home Net ", " pass12 ").unwrap();

            assert_eq!(credentials.ssid, "Home Net");
            assert_eq!(credentials.password, " pass12 ");
        }

        #[test]
        fn password_length_counts_utf16_units() {
            // four astral-plane characters are eight UTF-16 code units
            assert!(Credentials::parse("net", "😀😀😀😀").is_ok());
            // seven two-byte characters are still seven units
            assert_eq!(
                Credentials::parse("net", "äöüäöüä"),
                Err(SHORT_PASSWORD_MESSAGE)
            );
        }
    }

    mod form_body {
        use super::*;

        #[test]
        fn encodes_space_as_percent_20() {
            let credentials = Credentials::parse("Home Net", "longenough1").unwrap();

            assert_eq!(
                credentials.to_form_body(),
                "ssid=Home%20Net&password=longenough1"
            );
        }

        #[test]
        fn escapes_form_delimiters_and_non_ascii() {
            let credentials = Credentials::parse("Café&Bar", "p=ss&wörd+1").unwrap();

            assert_eq!(
                credentials.to_form_body(),
                "ssid=Caf%C3%A9%26Bar&password=p%3Dss%26w%C3%B6rd%2B1"
            );
        }

        #[test]
        fn leaves_uri_component_marks_unescaped() {
            let credentials = Credentials::parse("a(b)", "pass!'*word").unwrap();

            assert_eq!(
                credentials.to_form_body(),
                "ssid=a(b)&password=pass!'*word"
            );
        }

        #[test]
        fn encoded_percent_is_not_mistaken_for_a_mark() {
            let credentials = Credentials::parse("100%28", "pct%2Apass").unwrap();

            assert_eq!(
                credentials.to_form_body(),
                "ssid=100%2528&password=pct%252Apass"
            );
        }
    }

    #[test]
    fn toggle_flips_type_and_label() {
        let shown = PasswordVisibility::Hidden.toggled();

        assert_eq!(shown.input_type(), "text");
        assert_eq!(shown.toggle_label(), "HIDE");
        assert_eq!(shown.toggled().input_type(), "password");
        assert_eq!(shown.toggled().toggle_label(), "SHOW");
    }

    #[test]
    fn only_idle_submit_is_enabled() {
        assert!(SubmitState::Idle.is_enabled());
        assert!(!SubmitState::Saving.is_enabled());
        assert!(!SubmitState::Saved.is_enabled());
    }
}
