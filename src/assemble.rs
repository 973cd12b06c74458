// src/assemble.rs
//! Turns the directory listing into the feed: one group lookup per chapter,
//! in directory order, until the feed is full.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use url::Url;

use crate::error::FetchError;
use crate::feed::{EventRecord, Feed, EVENT_LIMIT};
use crate::localize::localize;
use crate::meetup::types::{Chapter, Group};
use crate::meetup::{join_path, MeetupClient};
use crate::sanitize::sanitize;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("events_chapters_total", "Chapters considered for the feed.");
        describe_counter!("events_records_total", "Event records written to the feed.");
        describe_counter!(
            "events_skipped_total",
            "Chapters dropped, labelled by reason."
        );
        describe_counter!(
            "events_fetch_errors_total",
            "Meetup API read failures, labelled by endpoint."
        );
    });
}

/// Why a chapter contributed nothing.
#[derive(Debug)]
pub enum SkipReason {
    FetchFailed(FetchError),
    NoUpcomingEvent,
    InstantOutOfRange(i64),
    UnbuildableUrl,
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::FetchFailed(_) => "fetch_failed",
            SkipReason::NoUpcomingEvent => "no_upcoming_event",
            SkipReason::InstantOutOfRange(_) => "instant_out_of_range",
            SkipReason::UnbuildableUrl => "unbuildable_url",
        }
    }
}

/// Outcome of enriching one chapter.
#[derive(Debug)]
pub enum Enrichment {
    Record(EventRecord),
    Skip(SkipReason),
}

/// Public link for an event: `{site}/{urlname}/events/{event_id}`.
pub fn event_url(site_base: &Url, urlname: &str, event_id: &str) -> Option<Url> {
    join_path(site_base, &[urlname, "events", event_id])
}

/// Merge directory and group data into a record. Pure; no I/O.
pub fn build_record(chapter: &Chapter, group: Group, site_base: &Url) -> Enrichment {
    let Some(next) = group.next_event else {
        return Enrichment::Skip(SkipReason::NoUpcomingEvent);
    };
    let Some(when) = localize(next.time, &group.timezone) else {
        return Enrichment::Skip(SkipReason::InstantOutOfRange(next.time));
    };
    let Some(url) = event_url(site_base, &chapter.urlname, &next.id) else {
        return Enrichment::Skip(SkipReason::UnbuildableUrl);
    };

    tracing::trace!(group = %group.name, link = %next.link, "next event found");

    // Directory descriptions are often blank; the group's own text is the next best thing.
    let raw_description = if chapter.description.trim().is_empty() {
        &group.description
    } else {
        &chapter.description
    };

    Enrichment::Record(EventRecord {
        city: chapter.city.clone(),
        country: chapter.country.clone(),
        description: sanitize(raw_description),
        id: next.id,
        local_date: when.short_date,
        local_time: when.timestamp,
        localized_country: group.localized_country_name,
        localized_location: group.localized_location,
        name: next.name,
        state: chapter.state.clone(),
        thumbnail_url: chapter.group_photo.thumb_link.clone(),
        url: url.into(),
    })
}

/// Fetch group detail for one chapter and build its record.
pub async fn enrich<C: MeetupClient + ?Sized>(
    client: &C,
    chapter: &Chapter,
    site_base: &Url,
) -> Enrichment {
    match client.group(&chapter.urlname).await {
        Ok(group) => build_record(chapter, group, site_base),
        Err(e) => Enrichment::Skip(SkipReason::FetchFailed(e)),
    }
}

/// Build the feed from `chapters`, preserving their order.
///
/// Lookups run one at a time. Chapters that fail or have nothing scheduled are
/// dropped without using up a slot; iteration stops as soon as the feed holds
/// [`EVENT_LIMIT`] records.
pub async fn assemble<C: MeetupClient + ?Sized>(
    client: &C,
    chapters: &[Chapter],
    site_base: &Url,
) -> Feed {
    ensure_metrics_described();

    let mut records = Vec::with_capacity(EVENT_LIMIT.min(chapters.len()));
    for chapter in chapters {
        if records.len() >= EVENT_LIMIT {
            break;
        }
        counter!("events_chapters_total").increment(1);

        match enrich(client, chapter, site_base).await {
            Enrichment::Record(record) => {
                tracing::debug!(
                    chapter = %chapter.urlname,
                    event = %record.id,
                    when = %record.local_time,
                    "event added"
                );
                records.push(record);
            }
            Enrichment::Skip(reason) => {
                counter!("events_skipped_total", "reason" => reason.label()).increment(1);
                match &reason {
                    SkipReason::FetchFailed(e) => tracing::warn!(
                        chapter = %chapter.urlname,
                        name = %chapter.name,
                        members = chapter.member_count,
                        kind = e.kind_label(),
                        error = %e,
                        "skipping chapter"
                    ),
                    other => tracing::debug!(
                        chapter = %chapter.urlname,
                        name = %chapter.name,
                        members = chapter.member_count,
                        reason = other.label(),
                        "skipping chapter"
                    ),
                }
            }
        }
    }

    counter!("events_records_total").increment(records.len() as u64);
    tracing::info!(
        chapters = chapters.len(),
        events = records.len(),
        "assembled events feed"
    );
    Feed::from_records(records)
}
