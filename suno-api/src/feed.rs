//! Clip status queries and completion polling.
//!
//! # Endpoints
//!
//! ## `fetch` — `GET /api/feed/?ids=a,b`
//!
//! Without `ids` the feed lists the account's most recent clips. Response is
//! a bare array of clip objects:
//!
//! ```json
//! [
//!   { "id": "a", "status": "streaming", "title": "Summer",
//!     "audio_url": "https://cdn1.suno.ai/a.mp3",
//!     "metadata": { "prompt": "[Verse]\nSun is out\n", "tags": "pop" } }
//! ]
//! ```
//!
//! ## `get_clip` — `GET /api/clip/{id}`
//!
//! Response: a single clip object.

use crate::client::SunoClient;
use crate::config::PollConfig;
use crate::error::Result;
use crate::poll::{self, Deadline};
use crate::types::{AudioRecord, JobStatus};
use crate::wire::RawClip;
use std::time::Duration;

impl SunoClient {
    /// Fetch current state for `ids`, or the most recent clips when `None`.
    pub fn fetch(&mut self, ids: Option<&[String]>) -> Result<Vec<AudioRecord>> {
        self.refresh_token(false)?;
        let path = match ids {
            Some(ids) => {
                let joined = ids
                    .iter()
                    .map(|id| urlencoding::encode(id).into_owned())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("/api/feed/?ids={joined}")
            }
            None => "/api/feed/".to_owned(),
        };
        let clips: Vec<RawClip> = self.get_json(&path)?;
        Ok(clips.into_iter().map(AudioRecord::from).collect())
    }

    /// Fetch a single clip by id.
    pub fn get_clip(&mut self, id: &str) -> Result<AudioRecord> {
        self.refresh_token(false)?;
        let clip: RawClip = self.get_json(&format!("/api/clip/{}", urlencoding::encode(id)))?;
        Ok(clip.into())
    }

    /// Poll `ids` until every clip is `streaming` or `complete`, every clip
    /// failed, or `timeout` elapses.
    ///
    /// Timing out is not an error: the last snapshot is returned as-is and
    /// callers must inspect each record's `status`. Sleeps are clamped to
    /// the deadline and every request is cut off one polling interval after
    /// it, so the call returns within `timeout` plus one interval even when
    /// the server stalls. A stalled request after the deadline also yields
    /// the last snapshot; if none was ever received the timeout error is
    /// returned.
    pub fn poll_until_complete(
        &mut self,
        ids: &[String],
        timeout: Duration,
    ) -> Result<Vec<AudioRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let p = self.config.poll.clone();
        let deadline = Deadline::new(timeout);
        let cutoff = deadline.cutoff(Duration::from_millis(p.interval_max_ms));
        self.within(cutoff, |client| client.poll_clips(ids, &deadline, &p))
    }

    fn poll_clips(
        &mut self,
        ids: &[String],
        deadline: &Deadline,
        p: &PollConfig,
    ) -> Result<Vec<AudioRecord>> {
        poll::sleep(deadline.clamp(Duration::from_millis(p.initial_delay_ms)));

        let mut last = None;
        loop {
            let records = match self.fetch(Some(ids)) {
                Ok(records) => records,
                Err(e) => return poll::settle(e, last, deadline),
            };
            if !records.is_empty() && records.iter().all(|r| r.status.is_terminal()) {
                tracing::info!(elapsed = ?deadline.elapsed(), "all clips ready");
                return Ok(records);
            }
            if !records.is_empty() && records.iter().all(|r| r.status == JobStatus::Error) {
                tracing::warn!("all clips failed");
                return Ok(records);
            }
            if deadline.expired() {
                tracing::warn!(
                    elapsed = ?deadline.elapsed(),
                    "polling timed out, returning last snapshot"
                );
                return Ok(records);
            }
            last = Some(records);
            let delay = poll::jitter(p.interval_min_ms, p.interval_max_ms);
            poll::sleep(deadline.clamp(delay));
        }
    }
}
