//! Suno generative-audio API client library.
//!
//! Wraps the Suno studio API behind a browser-session cookie: the cookie is
//! exchanged for a Clerk session id, the session id for a short-lived JWT,
//! and the JWT is renewed before every call.
//!
//! # Authentication
//!
//! Supply the `Cookie` header value of a logged-in `suno.com` browser
//! session, either directly or through `SUNO_COOKIE` / saved
//! [`Credentials`](auth::Credentials).
//!
//! ```no_run
//! use suno_api::{ClientConfig, SunoClient};
//!
//! let mut client = SunoClient::connect("__client=...", ClientConfig::default()).unwrap();
//! let clips = client.generate("a calm piano piece", true, true).unwrap();
//! for clip in &clips {
//!     println!("{} {}", clip.id, clip.status);
//! }
//! ```
//!
//! [`client_from_env`] defers the network round-trip until a client is needed:
//!
//! ```no_run
//! let mut lazy = suno_api::client_from_env().unwrap();
//! let credits = lazy.get().unwrap().billing_info().unwrap();
//! println!("{} credits left", credits.credits_left);
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                  | Endpoint                         | Description          |
//! |-----------------------------------------|----------------------------------|----------------------|
//! | [`SunoClient::initialize`]              | `GET {clerk}/v1/client`          | Cookie → session id  |
//! | [`SunoClient::refresh_token`]           | `POST {clerk}/v1/client/sessions/{sid}/tokens` | Session → JWT |
//! | [`SunoClient::generate`]                | `POST /api/generate/v2/`         | Description mode     |
//! | [`SunoClient::custom_generate`]         | `POST /api/generate/v2/`         | Custom lyrics mode   |
//! | [`SunoClient::extend_audio`]            | `POST /api/generate/v2/`         | Continue a clip      |
//! | [`SunoClient::concatenate`]             | `POST /api/generate/concat/v2/`  | Join extensions      |
//! | [`SunoClient::fetch`]                   | `GET /api/feed/`                 | Clip status          |
//! | [`SunoClient::get_clip`]                | `GET /api/clip/{id}`             | Single clip          |
//! | [`SunoClient::generate_lyrics`]         | `POST /api/generate/lyrics/`     | Lyrics job           |
//! | [`SunoClient::billing_info`]            | `GET /api/billing/info/`         | Credits              |
//!
//! # Polling
//!
//! Generation is asynchronous on the server. [`SunoClient::poll_until_complete`]
//! checks clip status at jittered intervals until every clip is playable or
//! a deadline passes; a timeout returns the last snapshot rather than an
//! error. Delays are set in [`PollConfig`].

pub mod auth;
mod billing;
pub mod client;
pub mod config;
pub mod error;
mod feed;
mod generate;
pub mod lazy;
mod lyrics;
mod poll;
pub mod types;
mod wire;

pub use client::SunoClient;
pub use config::{ClientConfig, PollConfig};
pub use error::{Result, SunoError};
pub use lazy::{LazyClient, client_from_env};
pub use types::{AudioRecord, BillingInfo, JobStatus, Lyrics};
