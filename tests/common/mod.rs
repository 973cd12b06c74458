// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use community_events::meetup::types::{Chapter, Event, Group, GroupPhoto, GroupsSummary};
use community_events::{FetchError, FetchErrorKind, MeetupClient};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory Meetup API. Unknown groups answer 404.
pub struct FakeMeetup {
    pub chapters: Vec<Chapter>,
    pub groups: HashMap<String, Group>,
    pub summary_status: Option<StatusCode>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeMeetup {
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self {
            chapters,
            groups: HashMap::new(),
            summary_status: None,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn with_group(mut self, urlname: &str, group: Group) -> Self {
        self.groups.insert(urlname.to_string(), group);
        self
    }

    pub fn failing_summary(mut self, status: StatusCode) -> Self {
        self.summary_status = Some(status);
        self
    }

    pub fn group_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeetupClient for FakeMeetup {
    async fn groups_summary(&self) -> Result<GroupsSummary, FetchError> {
        if let Some(status) = self.summary_status {
            return Err(FetchError::fatal(
                "groups summary",
                FetchErrorKind::Status(status),
            ));
        }
        Ok(GroupsSummary {
            chapters: self.chapters.clone(),
        })
    }

    async fn group(&self, urlname: &str) -> Result<Group, FetchError> {
        self.calls.lock().unwrap().push(urlname.to_string());
        self.groups.get(urlname).cloned().ok_or_else(|| {
            FetchError::skippable(
                format!("group details for {urlname}"),
                FetchErrorKind::Status(StatusCode::NOT_FOUND),
            )
        })
    }
}

pub fn chapter(urlname: &str) -> Chapter {
    Chapter {
        urlname: urlname.to_string(),
        name: format!("{urlname} meetup"),
        city: "Berlin".into(),
        country: "de".into(),
        description: format!("<p>Welcome to {urlname}</p>"),
        group_photo: GroupPhoto {
            thumb_link: format!("https://img.test/{urlname}.jpeg"),
        },
        ..Default::default()
    }
}

pub fn group_with_event(event_id: &str, time_ms: i64, tz: &str) -> Group {
    Group {
        timezone: tz.to_string(),
        localized_location: "Berlin, Germany".into(),
        localized_country_name: "Germany".into(),
        next_event: Some(Event {
            id: event_id.to_string(),
            name: format!("Event {event_id}"),
            time: time_ms,
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn group_without_event() -> Group {
    Group {
        timezone: "Europe/Berlin".into(),
        next_event: None,
        ..Default::default()
    }
}
