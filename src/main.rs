//! companion-link headless entry point.
//!
//! Drives the tick loop against a live companion server, logging what the
//! device renderer and audio collaborators would consume. Useful for
//! protocol work without device hardware in the loop.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use companion_link::config::ClientConfig;
use companion_link::context::ClientContext;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ClientConfig::from_env();
    tracing::info!(
        host = %config.server_host,
        port = config.server_port,
        "starting companion-link"
    );

    let tick = Duration::from_micros(1_000_000 / u64::from(config.tick_hz.max(1)));
    let mut interval = tokio::time::interval(tick);
    // A stalled connect attempt must not be followed by a tick burst.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut ctx = ClientContext::new(config);

    // The first tick stands in for the first rendered frame; connect only
    // after it so a dead network cannot freeze an empty display.
    interval.tick().await;
    if let Err(err) = ctx.connect().await {
        tracing::warn!(error = %err, "initial connect failed");
    }

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for slot in ctx.step().await {
                    let name = ctx
                        .registry()
                        .get(slot)
                        .map(|r| r.name.to_string())
                        .unwrap_or_default();
                    tracing::info!(slot, %name, "prompt attention");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
