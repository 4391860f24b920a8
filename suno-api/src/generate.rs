//! Song generation, extension, and concatenation.
//!
//! # Endpoints
//!
//! ## `generate` / `custom_generate` / `extend_audio` — `POST /api/generate/v2/`
//!
//! Request (description mode):
//! ```json
//! { "make_instrumental": false, "mv": "chirp-v3-5", "prompt": "",
//!   "gpt_description_prompt": "an upbeat song about summer" }
//! ```
//!
//! Request (custom mode): `prompt` carries the lyrics, plus `tags` and
//! `title`. Extension adds `continue_clip_id` and `continue_at` (seconds).
//!
//! Response:
//! ```json
//! {
//!   "id": "batch-id",
//!   "clips": [
//!     { "id": "3f1c...", "status": "submitted", "title": "",
//!       "model_name": "chirp-v3", "created_at": "2024-05-01T10:00:00.000Z",
//!       "metadata": { "prompt": "", "tags": null, "duration": null } },
//!     ...
//!   ]
//! }
//! ```
//!
//! A request normally yields two clips.
//!
//! ## `concatenate` — `POST /api/generate/concat/v2/`
//!
//! Request: `{ "clip_id": "3f1c..." }`. Response: a single clip object.

use crate::client::SunoClient;
use crate::error::Result;
use crate::types::AudioRecord;
use crate::wire::{ConcatRequest, GenerateRequest, GenerateResponse, RawClip};

const GENERATE_PATH: &str = "/api/generate/v2/";

impl SunoClient {
    /// Generate songs from a free-text description.
    ///
    /// With `wait_audio`, blocks until every clip is playable or the polling
    /// timeout elapses (see [`poll_until_complete`](Self::poll_until_complete)).
    /// Otherwise returns the freshly submitted clips.
    ///
    /// # Errors
    ///
    /// - [`SunoError::Request`](crate::SunoError::Request) — non-2xx status,
    ///   e.g. `402 Payment Required` when credits run out
    pub fn generate(
        &mut self,
        prompt: &str,
        make_instrumental: bool,
        wait_audio: bool,
    ) -> Result<Vec<AudioRecord>> {
        let model = self.config.model.clone();
        let mut req = GenerateRequest::new(&model, make_instrumental);
        req.gpt_description_prompt = Some(prompt);
        self.submit(&req, wait_audio)
    }

    /// Generate songs from user-written lyrics, style tags, and a title.
    ///
    /// `negative_tags` lists styles to steer away from.
    pub fn custom_generate(
        &mut self,
        prompt: &str,
        tags: &str,
        title: &str,
        make_instrumental: bool,
        wait_audio: bool,
        negative_tags: Option<&str>,
    ) -> Result<Vec<AudioRecord>> {
        let model = self.config.model.clone();
        let mut req = GenerateRequest::new(&model, make_instrumental);
        req.prompt = prompt;
        req.tags = Some(tags);
        req.title = Some(title);
        req.negative_tags = negative_tags;
        self.submit(&req, wait_audio)
    }

    /// Continue an existing clip from `continue_at` seconds.
    ///
    /// `continue_at = None` lets the server pick the end of the clip.
    /// Returns the submitted extension clips without polling.
    pub fn extend_audio(
        &mut self,
        clip_id: &str,
        prompt: &str,
        continue_at: Option<f64>,
        tags: Option<&str>,
        title: Option<&str>,
    ) -> Result<Vec<AudioRecord>> {
        self.refresh_token(false)?;
        let model = self.config.model.clone();
        let mut req = GenerateRequest::new(&model, false);
        req.prompt = prompt;
        req.tags = tags;
        req.title = title;
        req.continue_clip_id = Some(clip_id);
        req.continue_at = continue_at;

        let resp: GenerateResponse = self.post_json(GENERATE_PATH, &req)?;
        tracing::info!(clip_id, clips = resp.clips.len(), "extension submitted");
        Ok(resp.clips.into_iter().map(AudioRecord::from).collect())
    }

    /// Stitch an extended clip and its ancestors into one full song.
    pub fn concatenate(&mut self, clip_id: &str) -> Result<AudioRecord> {
        self.refresh_token(false)?;
        let clip: RawClip =
            self.post_json("/api/generate/concat/v2/", &ConcatRequest { clip_id })?;
        tracing::info!(clip_id, result = %clip.id, "concatenation submitted");
        Ok(clip.into())
    }

    fn submit(&mut self, req: &GenerateRequest<'_>, wait_audio: bool) -> Result<Vec<AudioRecord>> {
        self.refresh_token(false)?;
        let resp: GenerateResponse = self.post_json(GENERATE_PATH, req)?;
        let ids: Vec<String> = resp.clips.iter().map(|c| c.id.clone()).collect();
        tracing::info!(?ids, model = req.mv, "generation submitted");

        if wait_audio {
            let timeout = self.config.poll.timeout();
            self.poll_until_complete(&ids, timeout)
        } else {
            self.refresh_token(true)?;
            Ok(resp.clips.into_iter().map(AudioRecord::from).collect())
        }
    }
}
