//! HTTP helper functions for Crux Core
//!
//! Response handling for the single device endpoint lives here instead of in
//! the update handlers so it can be read (and logged) in one place.

use crux_http::Response;

use crate::types::SaveReceipt;

/// Base URL for device endpoints.
///
/// NOTE: This is a dummy prefix required because `crux_http` requires
/// absolute URLs and rejects relative paths (`RelativeUrlWithoutBase` error).
/// The Shell strips this prefix before calling `fetch()`, so requests stay
/// relative to whatever address the portal was opened on.
pub const BASE_URL: &str = "http://relative";

/// Device endpoint receiving the credentials
pub const SAVE_ENDPOINT: &str = "/save";

/// Page loaded once the device accepted the credentials
pub const SUCCESS_PAGE: &str = "/success.html";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Constructs the full address from a given endpoint.
///
/// # Example
/// ```
/// use portal_setup_core::http_helpers::build_url;
/// let url = build_url("/save");
/// assert_eq!(url, "http://relative/save");
/// ```
pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Turns a completed exchange into a receipt.
///
/// Any response counts, whatever its status: the body is read but not
/// interpreted.
pub fn extract_receipt(response: &mut Response<Vec<u8>>) -> SaveReceipt {
    let status = u16::from(response.status());
    let body = response
        .take_body()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();

    SaveReceipt { status, body }
}

/// Process the result of `POST /save`.
///
/// Only a transport failure is an error.
pub fn process_save_response(
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<SaveReceipt, String> {
    let receipt = match result {
        Ok(mut response) => extract_receipt(&mut response),
        // crux_http reports non-2xx answers as errors, but the device did answer
        Err(crux_http::HttpError::Http { code, body, .. }) => SaveReceipt {
            status: u16::from(code),
            body: String::from_utf8_lossy(&body.unwrap_or_default()).into_owned(),
        },
        Err(e) => return Err(e.to_string()),
    };

    if !receipt.is_success_status() {
        log::warn!(
            "save answered with HTTP {}, treating it as saved",
            receipt.status
        );
    }

    Ok(receipt)
}

