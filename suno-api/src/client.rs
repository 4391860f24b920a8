//! Blocking HTTP client for the Suno studio API.
//!
//! Two hosts are involved:
//!
//! - the Clerk identity service, which turns the browser cookie into a
//!   session id and mints short-lived JWTs for that session;
//! - the studio API, which accepts those JWTs as `Authorization: Bearer`.
//!
//! Every request also forwards the raw browser cookie. Non-2xx responses are
//! mapped to [`SunoError::Request`](crate::SunoError::Request) carrying the
//! status text.

use crate::config::ClientConfig;
use crate::error::{Result, SunoError};
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::COOKIE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Authenticated browser session held in memory.
#[derive(Debug)]
pub(crate) struct Session {
    /// Raw `Cookie` header value supplied by the caller.
    pub cookie: String,
    /// Clerk session id; fixed for the lifetime of the session.
    pub id: String,
    /// Latest JWT. Replaced on every renewal.
    pub token: Option<String>,
}

/// Blocking client for the Suno API.
///
/// Holds a [`reqwest::blocking::Client`], the [`ClientConfig`], and the
/// in-memory session. API methods live in separate modules (`auth`,
/// `generate`, `feed`, `lyrics`, `billing`) as `impl SunoClient` blocks.
///
/// Calls that renew the token take `&mut self`; wrap the client in a
/// `Mutex` to share it between threads.
pub struct SunoClient {
    pub(crate) http: Client,
    pub(crate) config: ClientConfig,
    pub(crate) session: Option<Session>,
    /// Set while a bounded poll runs; no request may outlive it.
    pub(crate) cutoff: Option<Instant>,
}

impl SunoClient {
    /// Create a client without a session. Call
    /// [`initialize`](Self::initialize) before anything else.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            config,
            session: None,
            cutoff: None,
        })
    }

    /// Create a client and establish a session from `cookie` in one step.
    pub fn connect(cookie: &str, config: ClientConfig) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.initialize(cookie)?;
        Ok(client)
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The Clerk session id, once [`initialize`](Self::initialize) succeeded.
    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }

    /// Whether a bearer token is currently held (it may still have expired
    /// server-side).
    pub fn has_token(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.token.is_some())
    }

    /// Timeout for the next request: the configured one, shortened to the
    /// time left before [`cutoff`](Self::cutoff) when a poll is running.
    pub(crate) fn request_timeout(&self) -> Duration {
        let configured = self.config.request_timeout();
        match self.cutoff {
            Some(at) => configured.min(at.saturating_duration_since(Instant::now())),
            None => configured,
        }
    }

    /// Run `f` with every request it makes bounded by `cutoff`.
    pub(crate) fn within<T>(
        &mut self,
        cutoff: Option<Instant>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let previous = std::mem::replace(&mut self.cutoff, cutoff);
        let result = f(self);
        self.cutoff = previous;
        result
    }

    /// Send an authenticated `GET` to the studio API and decode the body.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let req = self.authed(Method::GET, path)?;
        Self::send(req)
    }

    /// Send an authenticated JSON `POST` to the studio API and decode the body.
    pub(crate) fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.authed(Method::POST, path)?.json(body);
        Self::send(req)
    }

    /// Start a studio request carrying the cookie and the current token.
    ///
    /// Fails with [`SunoError::NotInitialized`] when no token exists yet, so
    /// nothing unauthenticated ever reaches the studio API.
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let session = self.session.as_ref().ok_or(SunoError::NotInitialized)?;
        let token = session.token.as_deref().ok_or(SunoError::NotInitialized)?;
        let url = format!("{}{path}", self.config.base_url);
        tracing::debug!(%method, %url, "studio request");
        Ok(self
            .http
            .request(method, url)
            .timeout(self.request_timeout())
            .header(COOKIE, &session.cookie)
            .bearer_auth(token))
    }

    fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%status, "studio request rejected");
            return Err(SunoError::from_status(status));
        }
        let bytes = resp.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_has_no_session() {
        let client = SunoClient::new(ClientConfig::default()).unwrap();
        assert!(client.session_id().is_none());
        assert!(!client.has_token());
    }

    #[test]
    fn studio_calls_without_token_are_refused() {
        let client = SunoClient::new(ClientConfig::with_base_url("http://127.0.0.1:9")).unwrap();
        let err = client
            .get_json::<serde_json::Value>("/api/feed/")
            .unwrap_err();
        assert!(matches!(err, SunoError::NotInitialized));
    }

    #[test]
    fn cutoff_shortens_request_timeout_only_while_set() {
        let mut client = SunoClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.request_timeout(), Duration::from_secs(10));

        let cutoff = Instant::now() + Duration::from_millis(100);
        let inside = client
            .within(Some(cutoff), |c| Ok(c.request_timeout()))
            .unwrap();
        assert!(inside <= Duration::from_millis(100));
        assert!(client.cutoff.is_none());

        let passed = Some(Instant::now());
        let inside = client.within(passed, |c| Ok(c.request_timeout())).unwrap();
        assert_eq!(inside, Duration::ZERO);
    }
}
