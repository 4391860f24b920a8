//! Lyrics generation.
//!
//! `POST /api/generate/lyrics/` with `{ "prompt": "..." }` returns
//! `{ "id": "..." }`. Progress is read from `GET /api/generate/lyrics/{id}`:
//!
//! ```json
//! { "text": "[Verse]\n...", "title": "Summer Rain", "status": "complete" }
//! ```
//!
//! Intermediate statuses are `running`; the text is empty until complete.

use crate::client::SunoClient;
use crate::error::Result;
use crate::poll::{self, Deadline};
use crate::types::{JobStatus, Lyrics};
use crate::wire::{LyricsRequest, LyricsStatusResponse, LyricsSubmitResponse};
use std::time::Duration;

impl SunoClient {
    /// Generate lyrics and wait for them.
    ///
    /// Polls at a fixed interval until the job is `complete`, reports
    /// `error`, or the lyrics timeout elapses. On timeout the last observed
    /// state is returned; check [`Lyrics::status`]. Requests are cut off one
    /// interval after the deadline, as in
    /// [`poll_until_complete`](Self::poll_until_complete).
    pub fn generate_lyrics(&mut self, prompt: &str) -> Result<Lyrics> {
        self.refresh_token(false)?;
        let submitted: LyricsSubmitResponse =
            self.post_json("/api/generate/lyrics/", &LyricsRequest { prompt })?;
        tracing::info!(id = %submitted.id, "lyrics submitted");

        let interval = Duration::from_millis(self.config.poll.lyrics_interval_ms);
        let deadline = Deadline::new(self.config.poll.lyrics_timeout());
        self.within(deadline.cutoff(interval), |client| {
            client.poll_lyrics(&submitted.id, &deadline)
        })
    }

    fn poll_lyrics(&mut self, id: &str, deadline: &Deadline) -> Result<Lyrics> {
        let interval = Duration::from_millis(self.config.poll.lyrics_interval_ms);
        let path = format!("/api/generate/lyrics/{}", urlencoding::encode(id));
        let mut last = None;
        loop {
            let lyrics = match self.get_json::<LyricsStatusResponse>(&path) {
                Ok(state) => Lyrics::from(state),
                Err(e) => return poll::settle(e, last, deadline),
            };
            if lyrics.status == JobStatus::Complete {
                return Ok(lyrics);
            }
            if lyrics.status == JobStatus::Error {
                tracing::warn!(%id, "lyrics job failed");
                return Ok(lyrics);
            }
            if deadline.expired() {
                tracing::warn!(%id, status = %lyrics.status, "lyrics polling timed out");
                return Ok(lyrics);
            }
            poll::sleep(deadline.clamp(interval));
            if let Err(e) = self.refresh_token(false) {
                return poll::settle(e, Some(lyrics), deadline);
            }
            last = Some(lyrics);
        }
    }
}
