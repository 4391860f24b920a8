//! In-process stand-in for the Clerk and studio endpoints.
//!
//! The blocking client cannot run inside a tokio runtime, so the stub gets
//! its own runtime on a background thread.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use suno_api::{ClientConfig, PollConfig};

pub const NEVER: usize = usize::MAX;

pub struct StubState {
    /// `None` simulates an expired cookie.
    pub session_id: Option<String>,
    /// Raw identity body served instead of the session description.
    pub identity_body: Option<String>,
    pub generate_status: AtomicU16,
    /// Feed reports `complete` from this call number on (1-based).
    pub ready_after: AtomicUsize,
    pub lyrics_ready_after: AtomicUsize,
    /// Forces every feed clip to this status.
    pub feed_status: Option<String>,
    /// Forces the lyrics job to this status.
    pub lyrics_status: Option<String>,
    /// Feed calls from this number on (1-based) stall for `feed_delay_ms`.
    pub slow_feed_from: usize,
    pub feed_delay_ms: u64,
    pub token_calls: AtomicUsize,
    pub feed_calls: AtomicUsize,
    pub lyrics_calls: AtomicUsize,
    pub last_auth: Mutex<Option<String>>,
    pub last_body: Mutex<Option<Value>>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            session_id: Some("sess_test".into()),
            identity_body: None,
            generate_status: AtomicU16::new(200),
            ready_after: AtomicUsize::new(1),
            lyrics_ready_after: AtomicUsize::new(1),
            feed_status: None,
            lyrics_status: None,
            slow_feed_from: NEVER,
            feed_delay_ms: 0,
            token_calls: AtomicUsize::new(0),
            feed_calls: AtomicUsize::new(0),
            lyrics_calls: AtomicUsize::new(0),
            last_auth: Mutex::new(None),
            last_body: Mutex::new(None),
        }
    }
}

impl StubState {
    pub fn tokens_issued(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn last_auth(&self) -> Option<String> {
        self.last_auth.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Value {
        let body = self.last_body.lock().unwrap();
        body.clone().unwrap_or(Value::Null)
    }

    fn record_auth(&self, headers: &HeaderMap) {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        *self.last_auth.lock().unwrap() = auth;
    }
}

pub struct Stub {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl Stub {
    /// Client config pointed at the stub with millisecond-scale delays.
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::with_base_url(&self.base_url);
        config.request_timeout_ms = 2_000;
        config.poll = PollConfig {
            refresh_wait_min_ms: 0,
            refresh_wait_max_ms: 5,
            initial_delay_ms: 10,
            interval_min_ms: 20,
            interval_max_ms: 40,
            timeout_ms: 3_000,
            lyrics_interval_ms: 10,
            lyrics_timeout_ms: 3_000,
        };
        config
    }
}

pub fn spawn(state: StubState) -> Stub {
    let state = Arc::new(state);
    let app = router(Arc::clone(&state));

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    Stub {
        base_url: format!("http://{addr}"),
        state,
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/v1/client", get(clerk_client))
        .route("/v1/client/sessions/{sid}/tokens", post(clerk_token))
        .route("/api/generate/v2/", post(generate))
        .route("/api/generate/concat/v2/", post(concat))
        .route("/api/feed/", get(feed))
        .route("/api/clip/{id}", get(clip))
        .route("/api/generate/lyrics/", post(lyrics_submit))
        .route("/api/generate/lyrics/{id}", get(lyrics_status))
        .route("/api/billing/info/", get(billing))
        .with_state(state)
}

pub fn clip_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": "X",
        "image_url": format!("https://cdn.test/{id}.png"),
        "audio_url": format!("https://cdn.test/{id}.mp3"),
        "video_url": null,
        "created_at": "2024-05-01T10:00:00.000Z",
        "model_name": "chirp-v3",
        "status": status,
        "metadata": {
            "prompt": "line1\nline2\n",
            "gpt_description_prompt": "a calm piano piece",
            "tags": "piano, ambient",
            "type": "gen",
            "duration": 95.5
        }
    })
}

async fn clerk_client(State(s): State<Arc<StubState>>) -> Response {
    if let Some(body) = &s.identity_body {
        return body.clone().into_response();
    }
    match &s.session_id {
        Some(id) => Json(json!({ "response": { "last_active_session_id": id } })).into_response(),
        None => Json(json!({ "response": null })).into_response(),
    }
}

async fn clerk_token(
    State(s): State<Arc<StubState>>,
    Path(sid): Path<String>,
) -> Response {
    if s.session_id.as_deref() != Some(sid.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let n = s.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({ "object": "token", "jwt": format!("jwt-{n}") })).into_response()
}

async fn generate(
    State(s): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    s.record_auth(&headers);
    let continued = body["continue_clip_id"].is_string();
    *s.last_body.lock().unwrap() = Some(body);

    let status = s.generate_status.load(Ordering::SeqCst);
    if status != 200 {
        return StatusCode::from_u16(status).unwrap().into_response();
    }
    let clips = if continued {
        vec![clip_json("clip-ext", "submitted")]
    } else {
        vec![clip_json("clip-a", "submitted"), clip_json("clip-b", "submitted")]
    };
    Json(json!({ "id": "batch-1", "clips": clips })).into_response()
}

async fn concat(
    State(s): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    s.record_auth(&headers);
    *s.last_body.lock().unwrap() = Some(body);
    Json(clip_json("clip-full", "complete"))
}

async fn feed(
    State(s): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    s.record_auth(&headers);
    let n = s.feed_calls.fetch_add(1, Ordering::SeqCst) + 1;
    if n >= s.slow_feed_from {
        tokio::time::sleep(Duration::from_millis(s.feed_delay_ms)).await;
    }
    let status = match &s.feed_status {
        Some(status) => status.as_str(),
        None if n >= s.ready_after.load(Ordering::SeqCst) => "complete",
        None => "queued",
    };
    let ids: Vec<String> = match q.get("ids") {
        Some(ids) => ids.split(',').map(String::from).collect(),
        None => vec!["recent-1".into()],
    };
    let clips = ids.iter().map(|id| clip_json(id, status)).collect();
    Json(Value::Array(clips))
}

async fn clip(
    State(s): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Json<Value> {
    s.record_auth(&headers);
    Json(clip_json(&id, "streaming"))
}

async fn lyrics_submit(
    State(s): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    s.record_auth(&headers);
    *s.last_body.lock().unwrap() = Some(body);
    Json(json!({ "id": "lyr-1" }))
}

async fn lyrics_status(
    State(s): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Json<Value> {
    s.record_auth(&headers);
    assert_eq!(id, "lyr-1");
    let n = s.lyrics_calls.fetch_add(1, Ordering::SeqCst) + 1;
    if let Some(status) = &s.lyrics_status {
        return Json(json!({ "text": "", "title": "", "status": status }));
    }
    if n >= s.lyrics_ready_after.load(Ordering::SeqCst) {
        Json(json!({
            "text": "[Verse]\nrain on the roof",
            "title": "Rain",
            "status": "complete"
        }))
    } else {
        Json(json!({ "text": "", "title": "", "status": "running" }))
    }
}

async fn billing(State(s): State<Arc<StubState>>, headers: HeaderMap) -> Json<Value> {
    s.record_auth(&headers);
    Json(json!({
        "total_credits_left": 2450,
        "period": "month",
        "monthly_limit": 2500,
        "monthly_usage": 50,
        "plan": { "name": "Pro" }
    }))
}
