#![cfg_attr(feature = "mock", allow(dead_code, unused_imports))]

use crate::services::credentials::WifiCredentials;
use anyhow::{Result, anyhow};
use log::info;
#[cfg(feature = "mock")]
use mockall::automock;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use trait_variant::make;

/// Progress of the connection attempt started by the last save
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting {
        ssid: String,
    },
}

/// Destination of accepted credentials
///
/// On hardware this persists them and kicks off the station connection; the
/// in-memory store only remembers them for `/status`.
#[make(Send)]
#[cfg_attr(feature = "mock", automock)]
pub trait CredentialStore {
    async fn store(&self, credentials: WifiCredentials) -> Result<()>;
    async fn connection_state(&self) -> Result<ConnectionState>;
    async fn reset(&self) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialStore {
    received: Arc<Mutex<Option<WifiCredentials>>>,
}

impl MemoryCredentialStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<WifiCredentials>>> {
        self.received
            .lock()
            .map_err(|_| anyhow!("credential store lock poisoned"))
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn store(&self, credentials: WifiCredentials) -> Result<()> {
        info!("credentials received for ssid {:?}", credentials.ssid());
        *self.lock()? = Some(credentials);
        Ok(())
    }

    async fn connection_state(&self) -> Result<ConnectionState> {
        Ok(match self.lock()?.as_ref() {
            Some(credentials) => ConnectionState::Connecting {
                ssid: credentials.ssid().to_string(),
            },
            None => ConnectionState::Idle,
        })
    }

    async fn reset(&self) -> Result<()> {
        info!("clearing received credentials");
        *self.lock()? = None;
        Ok(())
    }
}
