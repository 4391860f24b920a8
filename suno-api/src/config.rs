//! Client configuration.
//!
//! Layered from three sources, later ones winning:
//!
//! 1. built-in defaults
//! 2. `<config_dir>/suno-api/config.json`, when present
//! 3. `SUNO_*` environment variables, `__` separating nested keys
//!
//! Every field is optional in the file:
//!
//! ```json
//! {
//!   "base_url": "https://studio-api.suno.ai",
//!   "model": "chirp-v3-5",
//!   "poll": { "timeout_ms": 100000 }
//! }
//! ```
//!
//! The same settings from the environment:
//!
//! ```text
//! SUNO_BASE_URL=https://studio-api.suno.ai
//! SUNO_MODEL=chirp-v3-5
//! SUNO_POLL__TIMEOUT_MS=100000
//! ```

use crate::error::{Result, SunoError};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "SUNO";

/// Connection and polling settings for [`SunoClient`](crate::SunoClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Studio API root, without trailing slash.
    pub base_url: String,
    /// Clerk (identity provider) root, without trailing slash.
    pub clerk_base_url: String,
    /// Sent as `_clerk_js_version` on identity calls.
    pub clerk_js_version: String,
    /// Model used when a generation call does not name one.
    pub model: String,
    /// Per-request HTTP timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Renewal and polling delays.
    pub poll: PollConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://studio-api.suno.ai".into(),
            clerk_base_url: "https://clerk.suno.com".into(),
            clerk_js_version: "4.73.4".into(),
            model: "chirp-v3-5".into(),
            request_timeout_ms: 10_000,
            poll: PollConfig::default(),
        }
    }
}

/// Delays used by token renewal and job polling. All values in milliseconds.
///
/// `*_min_ms`/`*_max_ms` pairs describe a jitter range; each wait picks a
/// uniform value inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Lower end of the pause after a renewal that asked to wait.
    pub refresh_wait_min_ms: u64,
    pub refresh_wait_max_ms: u64,
    /// Pause between submitting a job and the first status check.
    pub initial_delay_ms: u64,
    /// Jitter range between audio status checks.
    pub interval_min_ms: u64,
    pub interval_max_ms: u64,
    /// Upper bound on audio polling. Expiry returns the last snapshot.
    pub timeout_ms: u64,
    /// Fixed pause between lyrics status checks.
    pub lyrics_interval_ms: u64,
    /// Upper bound on lyrics polling.
    pub lyrics_timeout_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            refresh_wait_min_ms: 1_000,
            refresh_wait_max_ms: 2_000,
            initial_delay_ms: 5_000,
            interval_min_ms: 3_000,
            interval_max_ms: 6_000,
            timeout_ms: 100_000,
            lyrics_interval_ms: 2_000,
            lyrics_timeout_ms: 60_000,
        }
    }
}

impl PollConfig {
    /// [`timeout_ms`](Self::timeout_ms) as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// [`lyrics_timeout_ms`](Self::lyrics_timeout_ms) as a [`Duration`].
    pub fn lyrics_timeout(&self) -> Duration {
        Duration::from_millis(self.lyrics_timeout_ms)
    }
}

impl ClientConfig {
    /// Load defaults, the config file, then `SUNO_*` environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Like [`load`](Self::load) with an explicit file path. A missing file
    /// is skipped.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::layered(path, Self::environment())
    }

    /// Config pointing both endpoints at one root, as a local stub serves them.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        trim_trailing_slash(&mut base_url);
        Self {
            clerk_base_url: base_url.clone(),
            base_url,
            ..Self::default()
        }
    }

    /// [`request_timeout_ms`](Self::request_timeout_ms) as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn layered(path: &Path, env: Environment) -> Result<Self> {
        let mut config: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;
        trim_trailing_slash(&mut config.base_url);
        trim_trailing_slash(&mut config.clerk_base_url);
        tracing::debug!(path = %path.display(), base_url = %config.base_url, "config loaded");
        Ok(config)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn path() -> Result<PathBuf> {
        let config = dirs::config_dir()
            .ok_or_else(|| SunoError::Other("cannot determine config directory".into()))?;
        Ok(config.join("suno-api").join("config.json"))
    }
}

fn trim_trailing_slash(url: &mut String) {
    let len = url.trim_end_matches('/').len();
    url.truncate(len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::Map;
    use std::fs;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ClientConfig::environment().source(Some(vars))
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"model":"chirp-v4","poll":{"timeout_ms":500}}"#).unwrap();

        let config = ClientConfig::layered(&path, env(&[])).unwrap();
        assert_eq!(config.model, "chirp-v4");
        assert_eq!(config.poll.timeout(), Duration::from_millis(500));
        assert_eq!(config.poll.interval_min_ms, 3_000);
        assert_eq!(config.base_url, "https://studio-api.suno.ai");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::layered(&dir.path().join("absent.json"), env(&[])).unwrap();
        assert_eq!(config.model, "chirp-v3-5");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.poll.lyrics_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn environment_overrides_file_including_nested_poll_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"base_url":"http://file.test/","model":"chirp-v4","poll":{"timeout_ms":500}}"#,
        )
        .unwrap();

        let config = ClientConfig::layered(
            &path,
            env(&[
                ("SUNO_MODEL", "chirp-v3-0"),
                ("SUNO_POLL__TIMEOUT_MS", "5000"),
                ("SUNO_REQUEST_TIMEOUT_MS", "2500"),
                ("SUNO_CLERK_BASE_URL", "http://clerk.test//"),
                ("OTHER_MODEL", "ignored"),
            ]),
        )
        .unwrap();
        assert_eq!(config.model, "chirp-v3-0");
        assert_eq!(config.poll.timeout_ms, 5_000);
        assert_eq!(config.request_timeout_ms, 2_500);
        assert_eq!(config.base_url, "http://file.test");
        assert_eq!(config.clerk_base_url, "http://clerk.test");
        assert_eq!(config.poll.interval_max_ms, 6_000);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ClientConfig::layered(&path, env(&[])).unwrap_err();
        assert!(matches!(err, SunoError::Config(_)), "got {err:?}");
    }

    #[test]
    fn with_base_url_points_both_roots() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:9/");
        assert_eq!(config.base_url, "http://127.0.0.1:9");
        assert_eq!(config.clerk_base_url, "http://127.0.0.1:9");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
