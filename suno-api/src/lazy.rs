//! Deferred client construction.
//!
//! There is no process-wide client. Callers own a [`LazyClient`], which
//! holds the cookie and config and only contacts the identity service the
//! first time a client is actually needed.

use crate::auth::Credentials;
use crate::client::SunoClient;
use crate::config::ClientConfig;
use crate::error::{Result, SunoError};

/// Environment variable consulted for the cookie before the saved file.
pub const COOKIE_ENV: &str = "SUNO_COOKIE";

/// A [`SunoClient`] that connects on first use.
pub struct LazyClient {
    cookie: String,
    config: ClientConfig,
    client: Option<SunoClient>,
}

impl LazyClient {
    /// Hold `cookie` and `config` without contacting the service.
    pub fn new(cookie: impl Into<String>, config: ClientConfig) -> Self {
        Self {
            cookie: cookie.into(),
            config,
            client: None,
        }
    }

    /// Return the client, connecting first if this is the first call.
    ///
    /// A failed connection is not cached; the next call tries again.
    pub fn get(&mut self) -> Result<&mut SunoClient> {
        if self.client.is_none() {
            tracing::debug!("connecting client on first use");
            self.client = Some(SunoClient::connect(&self.cookie, self.config.clone())?);
        }
        self.client.as_mut().ok_or(SunoError::NotInitialized)
    }

    /// Whether a session has been established yet.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }
}

/// Build a [`LazyClient`] from `SUNO_COOKIE` (or the saved credentials) and
/// [`ClientConfig::load`]. Nothing is sent over the network yet.
pub fn client_from_env() -> Result<LazyClient> {
    Ok(LazyClient::new(cookie_from_env()?, ClientConfig::load()?))
}

/// Resolve the cookie from `SUNO_COOKIE`, falling back to saved
/// [`Credentials`].
pub fn cookie_from_env() -> Result<String> {
    match std::env::var(COOKIE_ENV) {
        Ok(c) if !c.trim().is_empty() => Ok(c),
        _ => Credentials::load()?
            .cookie
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                SunoError::Auth(format!("no cookie configured; set {COOKIE_ENV} or log in"))
            }),
    }
}
