// src/meetup/types.rs
//! Wire types for the two Meetup endpoints we read.
//! Fields missing from a payload fall back to their defaults.

use serde::Deserialize;

/// Payload of `/pro/go/es_groups_summary`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupsSummary {
    pub chapters: Vec<Chapter>,
}

/// One directory entry. Order inside `GroupsSummary::chapters` is meaningful.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Chapter {
    pub urlname: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub description: String, // raw HTML
    pub group_photo: GroupPhoto,
    pub member_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupPhoto {
    pub thumb_link: String,
}

/// Payload of `/{urlname}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Group {
    pub name: String,
    pub description: String,
    pub timezone: String,
    pub localized_location: String,
    pub localized_country_name: String,
    pub next_event: Option<Event>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub time: i64, // unix millis
    pub link: String,
}
