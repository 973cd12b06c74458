// src/lib.rs
// Library surface shared by the `events` binary and the integration tests.

pub mod assemble;
pub mod config;
pub mod error;
pub mod feed;
pub mod localize;
pub mod meetup;
pub mod output;
pub mod sanitize;

// ---- Re-exports for stable public API ----
pub use crate::assemble::{assemble, Enrichment, SkipReason};
pub use crate::config::FeedConfig;
pub use crate::error::{FetchError, FetchErrorKind};
pub use crate::feed::{EventRecord, Feed, EVENT_LIMIT};
pub use crate::meetup::{MeetupApi, MeetupClient};

use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;
use url::Url;

/// One full regeneration: directory → enrichment → YAML on `sink`.
///
/// A failed directory fetch or encode returns an error before anything is
/// written. Per-chapter problems only shrink the feed.
pub async fn run<C, W>(client: &C, site_base: &Url, sink: &mut W) -> Result<Feed>
where
    C: MeetupClient + ?Sized,
    W: Write,
{
    let summary = client
        .groups_summary()
        .await
        .context("fetching groups summary")?;
    info!(chapters = summary.chapters.len(), "groups summary loaded");

    let feed = assemble(client, &summary.chapters, site_base).await;
    output::write_feed(&feed, sink)?;
    Ok(feed)
}
