//! Request and response bodies as they travel over the wire.
//!
//! Every endpoint gets an explicit struct so a malformed payload fails at
//! the boundary with [`SunoError::Json`](crate::SunoError::Json) instead of
//! surfacing later as a missing field.

use crate::types::{AudioRecord, BillingInfo, JobStatus, Lyrics};
use serde::{Deserialize, Serialize};

/// `GET {clerk}/v1/client`
#[derive(Debug, Deserialize)]
pub(crate) struct ClerkClientResponse {
    pub response: Option<ClerkClient>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClerkClient {
    pub last_active_session_id: Option<String>,
}

/// `POST {clerk}/v1/client/sessions/{sid}/tokens`
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub jwt: String,
}

/// `POST /api/generate/v2/`
///
/// Description mode sets `gpt_description_prompt` and leaves `prompt` empty;
/// custom mode sets `prompt` (the lyrics) plus `tags`/`title`; extension
/// additionally sets `continue_clip_id`/`continue_at`.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub make_instrumental: bool,
    pub mv: &'a str,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpt_description_prompt: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_tags: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_clip_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_at: Option<f64>,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(model: &'a str, make_instrumental: bool) -> Self {
        Self {
            make_instrumental,
            mv: model,
            prompt: "",
            gpt_description_prompt: None,
            tags: None,
            negative_tags: None,
            title: None,
            continue_clip_id: None,
            continue_at: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub clips: Vec<RawClip>,
}

/// `POST /api/generate/concat/v2/`
#[derive(Debug, Serialize)]
pub(crate) struct ConcatRequest<'a> {
    pub clip_id: &'a str,
}

/// A clip as the studio API returns it from generate, feed and clip
/// endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawClip {
    pub id: String,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub model_name: String,
    pub status: JobStatus,
    #[serde(default)]
    pub metadata: Option<ClipMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ClipMetadata {
    pub prompt: Option<String>,
    pub gpt_description_prompt: Option<String>,
    pub tags: Option<String>,
    pub negative_tags: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub duration: Option<f64>,
    pub error_message: Option<String>,
}

impl From<RawClip> for AudioRecord {
    fn from(raw: RawClip) -> Self {
        let meta = raw.metadata.unwrap_or_default();
        Self {
            id: raw.id,
            title: raw.title,
            image_url: raw.image_url,
            lyric: meta.prompt.as_deref().map(parse_lyrics),
            audio_url: raw.audio_url,
            video_url: raw.video_url,
            created_at: raw.created_at,
            model_name: raw.model_name,
            gpt_description_prompt: meta.gpt_description_prompt,
            prompt: meta.prompt,
            status: raw.status,
            kind: meta.kind,
            tags: meta.tags,
            negative_tags: meta.negative_tags,
            duration: meta.duration,
            error_message: meta.error_message,
        }
    }
}

/// `POST /api/generate/lyrics/`
#[derive(Debug, Serialize)]
pub(crate) struct LyricsRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LyricsSubmitResponse {
    pub id: String,
}

/// `GET /api/generate/lyrics/{id}`
#[derive(Debug, Deserialize)]
pub(crate) struct LyricsStatusResponse {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub title: String,
    pub status: JobStatus,
}

impl From<LyricsStatusResponse> for Lyrics {
    fn from(raw: LyricsStatusResponse) -> Self {
        Self {
            text: raw.text,
            title: raw.title,
            status: raw.status,
        }
    }
}

/// `GET /api/billing/info/`
#[derive(Debug, Deserialize)]
pub(crate) struct BillingResponse {
    #[serde(default)]
    pub total_credits_left: u64,
    pub period: Option<String>,
    #[serde(default)]
    pub monthly_limit: u64,
    #[serde(default)]
    pub monthly_usage: u64,
}

impl From<BillingResponse> for BillingInfo {
    fn from(raw: BillingResponse) -> Self {
        Self {
            credits_left: raw.total_credits_left,
            period: raw.period,
            monthly_limit: raw.monthly_limit,
            monthly_usage: raw.monthly_usage,
        }
    }
}

/// Drop blank lines from a raw lyrics prompt.
pub(crate) fn parse_lyrics(prompt: &str) -> String {
    prompt
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
