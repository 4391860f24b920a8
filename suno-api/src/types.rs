//! Public data types returned by the client.
//!
//! These are normalized from the raw studio-API payloads (see the private
//! `wire` module). Field names keep the API's `snake_case` spelling so a
//! record serializes back to the shape other Suno tooling expects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a server-side job (audio clip or lyrics request).
///
/// Unknown strings are preserved in [`JobStatus::Other`] so nothing the
/// server reports is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Submitted,
    Queued,
    /// Audio is playable while the tail is still rendering.
    Streaming,
    Complete,
    Error,
    Other(String),
}

impl JobStatus {
    /// Wire spelling of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "submitted",
            Self::Queued => "queued",
            Self::Streaming => "streaming",
            Self::Complete => "complete",
            Self::Error => "error",
            Self::Other(s) => s,
        }
    }

    /// `streaming` and `complete` end audio polling.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Streaming | Self::Complete)
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "submitted" => Self::Submitted,
            "queued" => Self::Queued,
            "streaming" => Self::Streaming,
            "complete" => Self::Complete,
            "error" => Self::Error,
            _ => Self::Other(s),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated audio clip.
///
/// Returned by every audio-bearing call: [`generate`](crate::SunoClient::generate),
/// [`custom_generate`](crate::SunoClient::custom_generate),
/// [`fetch`](crate::SunoClient::fetch) and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioRecord {
    /// Clip id; also the job id used for polling.
    pub id: String,
    /// Song title; empty titles are kept as the server sent them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Cover art.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Human-readable lyrics: `prompt` with blank lines removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyric: Option<String>,
    /// MP3 stream, available from `streaming` on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// MP4 with the cover art, usually only once `complete`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// ISO-8601 timestamp exactly as the server sent it.
    pub created_at: String,
    /// Model that rendered the clip, e.g. `chirp-v3`.
    pub model_name: String,
    /// Description prompt (description-mode generation only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpt_description_prompt: Option<String>,
    /// Raw lyrics prompt as stored by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Where the job is; [`JobStatus::is_terminal`] once playable.
    pub status: JobStatus,
    /// Generation kind (`gen`, `concat`, ...), serialized as `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Comma-separated style tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Styles the generation was asked to avoid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_tags: Option<String>,
    /// Length in seconds, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Server-side failure reason for `error` clips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Result of a lyrics job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyrics {
    /// Lyrics with `[Verse]`-style section markers; empty until complete.
    pub text: String,
    /// Suggested song title.
    pub title: String,
    /// `complete` on success; anything else means polling gave up.
    pub status: JobStatus,
}

/// Account credit balance.
///
/// Returned by [`SunoClient::billing_info`](crate::SunoClient::billing_info).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingInfo {
    /// Credits available for new generations.
    pub credits_left: u64,
    /// Billing period label (`month`, `year`), absent on free plans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Credits granted per period.
    pub monthly_limit: u64,
    /// Credits spent in the current period.
    pub monthly_usage: u64,
}
