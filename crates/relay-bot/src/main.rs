//! Angel/mortal relay bot - main entry point.

use anyhow::Context;
use pairing_directory::{PairingDirectory, Role, Store};
use relay_bot::config::Config;
use relay_bot::context::{RequestContext, Transports};
use relay_bot::error::AppResult;
use relay_bot::handlers;
use std::sync::Arc;
use telegram_client::{TelegramClient, UpdateReceiver};
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting angel/mortal relay bot...");

    // Load the pairing directory
    let directory = Arc::new(PairingDirectory::load(Store::file(&config.directory.path)).await?);
    info!(
        "Pairing directory loaded ({} persons) from {:?}",
        directory.person_count().await,
        config.directory.path
    );

    // One client per bot identity
    let angel_client = TelegramClient::new(&config.telegram.api_url, &config.telegram.angel_token)
        .context("Failed to create angel bot client")?;
    let mortal_client =
        TelegramClient::new(&config.telegram.api_url, &config.telegram.mortal_token)
            .context("Failed to create mortal bot client")?;

    // Identity checks
    for (label, client) in [("Angel", &angel_client), ("Mortal", &mortal_client)] {
        match client.get_me().await {
            Ok(me) => info!("{} bot online as {}", label, me.first_name),
            Err(e) => {
                error!("{} bot API unreachable: {}", label, e);
                return Err(e.into());
            }
        }
    }

    let transports = Transports::new(
        Arc::new(angel_client.clone()),
        Arc::new(mortal_client.clone()),
    );

    let handlers = handlers::all(directory.clone(), transports.clone());
    info!("Registered {} handlers", handlers.len());

    // Merge both bots' update streams, tagged with the role each serves
    let angel_stream = UpdateReceiver::new(
        angel_client,
        config.telegram.poll_timeout,
        config.telegram.poll_interval,
    )
    .stream()
    .map(|message| (Role::Angel, message));
    let mortal_stream = UpdateReceiver::new(
        mortal_client,
        config.telegram.poll_timeout,
        config.telegram.poll_interval,
    )
    .stream()
    .map(|message| (Role::Mortal, message));
    let mut events = Box::pin(angel_stream.merge(mortal_stream));

    info!("Listening for updates...");

    // Main event loop
    loop {
        tokio::select! {
            Some((role, message)) = events.next() => {
                let ctx = RequestContext::resolve(&directory, role, message).await;
                handlers::dispatch(&handlers, &transports, &ctx).await;
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
