//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use types::View;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve `GET /api/player?tag=...` over HTTP until interrupted.
    Serve {
        /// Address to bind (or set `CLASH_LOOKUP_HOST`).
        #[clap(long)]
        host: Option<String>,

        /// Port to bind (or set `CLASH_LOOKUP_PORT`).
        #[clap(long, short)]
        port: Option<u16>,

        /// Upstream API base URL (or set `CLASH_API_BASE_URL`).
        #[clap(long)]
        base_url: Option<String>,
    },

    /// Look up one player and print their statistics.
    ///
    /// The leading `#` of the tag is optional; quote it in shells that treat
    /// `#` as a comment.
    Player {
        /// Player tag, e.g. `#2PP` or `2PP`.
        tag: String,

        /// Print the raw API document as JSON instead of text.
        #[clap(long)]
        json: bool,

        /// Which section to print: overview | troops | achievements.
        #[clap(long, short, default_value_t = View::default())]
        view: View,

        /// Upstream API base URL (or set `CLASH_API_BASE_URL`).
        #[clap(long)]
        base_url: Option<String>,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "clash-lookup", about = "Clash of Clans player lookup")]
pub struct ClashLookup {
    #[clap(subcommand)]
    pub command: Commands,
}
