//! Clash of Clans Player Lookup Library
//!
//! A small Rust library and service for looking up a single player's statistics
//! from the Clash of Clans public API, given a player tag.
//!
//! ## Features
//!
//! - **Tag Normalization**: Accepts tags with or without the leading `#` and
//!   percent-encodes them for the upstream URL path
//! - **Authenticated Proxy**: Forwards one request per lookup with a bearer token
//! - **Failure Classification**: Maps upstream status codes to a closed set of
//!   user-facing errors
//! - **HTTP Surface**: `GET /api/player?tag=...` for browser front ends
//! - **CLI**: One-off lookups rendered as text or JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clash_lookup::{clash::http::UpstreamClient, UpstreamConfig};
//!
//! # async fn example() -> clash_lookup::Result<()> {
//! let config = UpstreamConfig::from_env()?;
//! let client = UpstreamClient::from_config(&config)?;
//!
//! let player = client.lookup(Some("2PP")).await?;
//! println!("{}", player["name"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! The API token is read from the environment (or a `.env` file):
//! ```bash
//! export CLASH_API_TOKEN=eyJ0eXAiOiJKV1Qi...
//! ```

pub mod clash;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod server;
pub mod tag;

// Re-export commonly used types
pub use clash::http::UpstreamClient;
pub use clash::types::Player;
pub use config::{BearerToken, Config, UpstreamConfig};
pub use error::{ClashError, LookupError, Result};
pub use tag::{PlayerTag, TAG_MARKER};

pub const TOKEN_ENV_VAR: &str = "CLASH_API_TOKEN";
pub const BASE_URL_ENV_VAR: &str = "CLASH_API_BASE_URL";
pub const HOST_ENV_VAR: &str = "CLASH_LOOKUP_HOST";
pub const PORT_ENV_VAR: &str = "CLASH_LOOKUP_PORT";
