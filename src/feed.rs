// src/feed.rs
use serde::Serialize;

/// Maximum number of events written to the feed.
pub const EVENT_LIMIT: usize = 15;

/// One upcoming meetup as rendered by the site templates.
/// Field names are part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Description")]
    pub description: String, // sanitized HTML
    #[serde(rename = "ID")]
    pub id: String,
    pub local_date: String,
    pub local_time: String,
    #[serde(rename = "LocalizedCountry")]
    pub localized_country: String,
    #[serde(rename = "LocalizedLocation")]
    pub localized_location: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "ThumbnailURL")]
    pub thumbnail_url: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// Ordered, capped list of upcoming events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feed {
    #[serde(rename = "All")]
    all: Vec<EventRecord>,
}

impl Feed {
    /// Keeps order; anything past [`EVENT_LIMIT`] is dropped.
    pub fn from_records(mut records: Vec<EventRecord>) -> Self {
        records.truncate(EVENT_LIMIT);
        Self { all: records }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.all.len() >= EVENT_LIMIT
    }
}
