//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use clash_lookup::{
    cli::{ClashLookup, Commands},
    commands::{
        player::{handle_player_lookup, PlayerLookupParams},
        serve::handle_serve,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clash_lookup=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = ClashLookup::parse();

    match app.command {
        Commands::Serve {
            host,
            port,
            base_url,
        } => handle_serve(host, port, base_url).await?,

        Commands::Player {
            tag,
            json,
            view,
            base_url,
        } => {
            handle_player_lookup(PlayerLookupParams {
                tag,
                as_json: json,
                view,
                base_url,
            })
            .await?
        }
    }

    Ok(())
}
