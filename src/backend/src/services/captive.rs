//! Decides how a request that is not a known route should be answered.

use crate::config::PortalConfig;
use log::debug;

pub const MAX_URI_LEN: usize = 256;
pub const MAX_HOST_LEN: usize = 128;

#[derive(Debug, PartialEq, Eq)]
pub enum CaptiveResponse {
    /// Request already targets the portal, serve the setup page
    ServePortal,
    /// Send the client to the given location with `302 Found`
    Redirect(String),
    BadRequest,
    NoContent,
}

/// Captive check done before serving the setup page.
///
/// A missing `Host` header is treated as already being on the portal.
pub fn check_host(portal: &PortalConfig, host: Option<&str>) -> CaptiveResponse {
    let Some(host) = host.filter(|host| !host.is_empty()) else {
        return CaptiveResponse::ServePortal;
    };

    if host.len() > MAX_HOST_LEN {
        return CaptiveResponse::BadRequest;
    }

    if portal.is_portal_host(host) {
        return CaptiveResponse::ServePortal;
    }

    debug!("captive redirect from host {host}");
    CaptiveResponse::Redirect(portal.origin())
}

/// Fallback for every unrouted request
pub fn classify_unrouted(portal: &PortalConfig, uri: &str, host: Option<&str>) -> CaptiveResponse {
    let host_len = host.map_or(0, str::len);

    if uri.len() > MAX_URI_LEN || host_len > MAX_HOST_LEN {
        return CaptiveResponse::BadRequest;
    }

    if host.is_some_and(|host| host.contains("wpad"))
        || uri.contains("favicon")
        || uri.contains(".map")
    {
        return CaptiveResponse::NoContent;
    }

    check_host(portal, host)
}

/// Location OS connectivity probes are redirected to
pub fn probe_location(portal: &PortalConfig) -> String {
    format!("{}/", portal.origin())
}
