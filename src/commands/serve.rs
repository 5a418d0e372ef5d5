//! Serve command implementation

use crate::{clash::http::UpstreamClient, server, Config, Result};

/// Handle the serve command
pub async fn handle_serve(
    host: Option<String>,
    port: Option<u16>,
    base_url: Option<String>,
) -> Result<()> {
    let config = Config::from_env()?.with_overrides(host, port, base_url);
    let client = UpstreamClient::from_config(&config.upstream)?;

    tracing::info!("Starting Clash of Clans lookup server");
    server::serve(&config, client).await
}
