//! `events` — regenerates the upcoming-meetups data file.
//! Writes the YAML document to stdout; logs go to stderr.

use anyhow::Result;
use community_events::{FeedConfig, MeetupApi};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs always go to stderr so stdout carries only the document.
/// `EVENTS_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("community_events=info,warn"));

    let json = std::env::var("EVENTS_LOG_FORMAT")
        .ok()
        .is_some_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

async fn regenerate() -> Result<()> {
    let cfg = FeedConfig::load_default()?;
    tracing::debug!(api = %cfg.api_base_url, site = %cfg.site_base_url, "config loaded");

    let client = MeetupApi::from_config(&cfg)?;
    let stdout = std::io::stdout();
    let mut sink = stdout.lock();
    community_events::run(&client, &cfg.site_base_url, &mut sink).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    if let Err(e) = regenerate().await {
        eprintln!("events: {e:#}");
        std::process::exit(1);
    }
}
