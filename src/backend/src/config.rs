use anyhow::{Context, Result};
use std::{env, net::IpAddr, sync::OnceLock};

/// Address every captive client is sent to when nothing else is configured
pub const DEFAULT_PORTAL_ADDRESS: &str = "192.168.4.1";

/// Application configuration loaded and validated at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP listener configuration
    pub server: ServerConfig,

    /// Captive portal addressing
    pub portal: PortalConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
    /// Host name or IP the portal is reachable at
    pub address: String,
    pub port: u16,
}

impl AppConfig {
    /// Get or load the application configuration
    ///
    /// On first call the configuration is read from environment variables,
    /// later calls return the cached instance.
    ///
    /// # Panics
    /// Panics if configuration loading fails. The server cannot run without a
    /// valid listener configuration.
    pub fn get() -> &'static Self {
        static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();
        APP_CONFIG.get_or_init(|| {
            Self::load_internal().expect("failed to load application configuration")
        })
    }

    fn load_internal() -> Result<Self> {
        let server = ServerConfig::load()?;
        let portal = PortalConfig::load(server.port)?;

        Ok(Self { server, portal })
    }
}

impl ServerConfig {
    fn load() -> Result<Self> {
        let bind_address = env::var("PORTAL_BIND_ADDRESS")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .context("failed to parse PORTAL_BIND_ADDRESS: invalid format")?;

        let port = env::var("PORTAL_PORT")
            .unwrap_or_else(|_| "80".to_string())
            .parse::<u16>()
            .context("failed to parse PORTAL_PORT: invalid format")?;

        Ok(Self { bind_address, port })
    }
}

impl PortalConfig {
    fn load(port: u16) -> Result<Self> {
        let address =
            env::var("PORTAL_ADDRESS").unwrap_or_else(|_| DEFAULT_PORTAL_ADDRESS.to_string());

        anyhow::ensure!(
            !address.is_empty() && !address.contains(['/', ' ']),
            "failed to parse PORTAL_ADDRESS: invalid host {address:?}"
        );

        Ok(Self { address, port })
    }

    /// Origin captive clients are redirected to, e.g. `http://192.168.4.1`
    pub fn origin(&self) -> String {
        if self.port == 80 {
            format!("http://{}", self.address)
        } else {
            format!("http://{}:{}", self.address, self.port)
        }
    }

    /// Whether a request `Host` header already points at the portal
    pub fn is_portal_host(&self, host: &str) -> bool {
        let host = strip_port(host);
        host.eq_ignore_ascii_case(&self.address) || host == DEFAULT_PORTAL_ADDRESS
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_PORTAL_ADDRESS.to_string(),
            port: 80,
        }
    }
}

fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port))
            if (!name.contains(':') || name.ends_with(']'))
                && !port.is_empty()
                && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            name
        }
        _ => host,
    }
}
