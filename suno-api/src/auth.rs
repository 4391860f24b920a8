//! Session establishment, token renewal, and the saved cookie.
//!
//! # Identity flow
//!
//! 1. `GET {clerk}/v1/client?_clerk_js_version=4.73.4` with the browser
//!    cookie. The response names the active session:
//!
//!    ```json
//!    { "response": { "last_active_session_id": "sess_2abc..." } }
//!    ```
//!
//! 2. `POST {clerk}/v1/client/sessions/{sid}/tokens` mints a JWT:
//!
//!    ```json
//!    { "jwt": "eyJhbGciOi..." }
//!    ```
//!
//! The JWT lives for about a minute, so every studio call renews it first.
//!
//! # Saved cookie
//!
//! [`Credentials`] persists the raw cookie to
//! `<config_dir>/suno-api/credentials.json`:
//!
//! ```json
//! { "cookie": "__client=eyJ...; __client_uat=1712345678" }
//! ```
//!
//! The cookie comes from browser developer tools → Network → any request to
//! `clerk.suno.com` → `Cookie` header.

use crate::client::{Session, SunoClient};
use crate::error::{Result, SunoError};
use crate::poll;
use crate::wire::{ClerkClientResponse, TokenResponse};
use reqwest::StatusCode;
use reqwest::header::COOKIE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

impl SunoClient {
    /// Exchange `cookie` for a session id, then fetch the first token.
    ///
    /// # Errors
    ///
    /// - [`SunoError::Auth`] — the identity response is not a session
    ///   description or names no session id (expired or incomplete cookie)
    /// - [`SunoError::Http`] — network failure
    pub fn initialize(&mut self, cookie: &str) -> Result<()> {
        let url = format!(
            "{}/v1/client?_clerk_js_version={}",
            self.config.clerk_base_url,
            urlencoding::encode(&self.config.clerk_js_version),
        );
        tracing::debug!(%url, "requesting session id");
        let resp = self
            .http
            .get(&url)
            .timeout(self.request_timeout())
            .header(COOKIE, cookie)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SunoError::Auth(format!(
                "identity endpoint returned {status}"
            )));
        }
        let body: ClerkClientResponse = serde_json::from_slice(&resp.bytes()?)
            .map_err(|e| SunoError::Auth(format!("bad identity response: {e}")))?;
        let id = body
            .response
            .and_then(|c| c.last_active_session_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                SunoError::Auth("no session id returned, the cookie may have expired".into())
            })?;

        tracing::info!(session_id = %id, "session established");
        self.session = Some(Session {
            cookie: cookie.to_owned(),
            id,
            token: None,
        });
        self.refresh_token(false)
    }

    /// Mint a fresh JWT for the current session.
    ///
    /// With `wait_after`, sleeps a jittered 1–2 s afterwards (see
    /// [`PollConfig`](crate::PollConfig)) so back-to-back calls do not hammer
    /// the identity service.
    ///
    /// # Errors
    ///
    /// - [`SunoError::NotInitialized`] — no session yet
    /// - [`SunoError::Auth`] — the identity service rejected the session
    pub fn refresh_token(&mut self, wait_after: bool) -> Result<()> {
        let timeout = self.request_timeout();
        let Some(session) = self.session.as_mut() else {
            return Err(SunoError::NotInitialized);
        };
        let url = format!(
            "{}/v1/client/sessions/{}/tokens?_clerk_js_version={}",
            self.config.clerk_base_url,
            urlencoding::encode(&session.id),
            urlencoding::encode(&self.config.clerk_js_version),
        );
        let resp = self
            .http
            .post(&url)
            .timeout(timeout)
            .header(COOKIE, &session.cookie)
            .send()?;
        let status = resp.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(SunoError::Auth(format!(
                "token renewal rejected ({status})"
            )));
        }
        if !status.is_success() {
            return Err(SunoError::from_status(status));
        }
        let body: TokenResponse = serde_json::from_slice(&resp.bytes()?)?;
        session.token = Some(body.jwt);
        tracing::debug!("token refreshed");

        if wait_after {
            let p = &self.config.poll;
            poll::sleep(poll::jitter(p.refresh_wait_min_ms, p.refresh_wait_max_ms));
        }
        Ok(())
    }
}

/// Persistent cookie store backed by a JSON file on disk.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Credentials {
    /// Raw `Cookie` header value for `clerk.suno.com`.
    pub cookie: Option<String>,
}

impl Credentials {
    /// Load from `<config_dir>/suno-api/credentials.json`.
    ///
    /// Returns empty credentials if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Save to disk, creating parent directories if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Delete the credentials file.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Load from an explicit path. A missing file yields empty credentials.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save to an explicit path, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Whether a non-empty cookie is stored (does not validate it).
    pub fn has_cookie(&self) -> bool {
        self.cookie.as_ref().is_some_and(|c| !c.trim().is_empty())
    }

    fn path() -> Result<PathBuf> {
        let config = dirs::config_dir()
            .ok_or_else(|| SunoError::Other("cannot determine config directory".into()))?;
        Ok(config.join("suno-api").join("credentials.json"))
    }
}
