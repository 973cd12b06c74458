// src/meetup/mod.rs
pub mod types;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::counter;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::FeedConfig;
use crate::error::{FetchError, FetchErrorKind};
use crate::meetup::types::{Group, GroupsSummary};

/// Directory endpoint: global Go groups, ordered by next upcoming event.
pub const GROUPS_SUMMARY_PATH: &str =
    "/pro/go/es_groups_summary?location=global&order=next_event&desc=false";

/// The two reads the feed needs. Implemented over HTTP by [`MeetupApi`];
/// tests plug in deterministic fakes.
#[async_trait]
pub trait MeetupClient: Send + Sync {
    /// Directory listing. Any error is fatal for the run.
    async fn groups_summary(&self) -> Result<GroupsSummary, FetchError>;

    /// Per-group detail (timezone, localized names, next event).
    /// Errors are skippable: the caller drops the chapter and moves on.
    async fn group(&self, urlname: &str) -> Result<Group, FetchError>;
}

/// Append `segments` to `base` as percent-encoded path segments.
/// Empty segments are dropped so the result never contains `//`.
pub fn join_path(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().ok()?;
        path.pop_if_empty();
        path.extend(segments.iter().copied().filter(|s| !s.is_empty()));
    }
    Some(url)
}

pub struct MeetupApi {
    base_url: Url,
    http: reqwest::Client,
}

impl MeetupApi {
    pub fn new(base_url: Url, user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("building meetup http client")?;
        Self::with_client(base_url, http)
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, ...).
    pub fn with_client(base_url: Url, http: reqwest::Client) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("API base URL {base_url} cannot carry a path"));
        }
        Ok(Self { base_url, http })
    }

    pub fn from_config(cfg: &FeedConfig) -> Result<Self> {
        Self::new(cfg.api_base_url.clone(), &cfg.user_agent)
    }

    fn summary_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            GROUPS_SUMMARY_PATH
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        endpoint: &'static str,
        fatal: bool,
    ) -> Result<T, FetchError> {
        let wrap = |kind: FetchErrorKind| {
            counter!("events_fetch_errors_total", "endpoint" => endpoint).increment(1);
            if fatal {
                FetchError::fatal(format!("{endpoint} from {url:?}"), kind)
            } else {
                FetchError::skippable(format!("{endpoint} from {url:?}"), kind)
            }
        };

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| wrap(FetchErrorKind::Transport(e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(wrap(FetchErrorKind::Status(status)));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| wrap(FetchErrorKind::Transport(e)))?;
        serde_json::from_slice(&body).map_err(|e| wrap(FetchErrorKind::Decode(e)))
    }
}

#[async_trait]
impl MeetupClient for MeetupApi {
    async fn groups_summary(&self) -> Result<GroupsSummary, FetchError> {
        let url = self.summary_url();
        tracing::debug!(%url, "fetching groups summary");
        self.get_json(&url, "groups summary", true).await
    }

    async fn group(&self, urlname: &str) -> Result<Group, FetchError> {
        let url = join_path(&self.base_url, &[urlname]).ok_or_else(|| {
            FetchError::skippable(
                format!("group details for {urlname:?}"),
                FetchErrorKind::InvalidUrl(self.base_url.to_string()),
            )
        })?;
        tracing::debug!(%url, "fetching group details");
        self.get_json(url.as_str(), "group details", false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn join_path_builds_clean_paths() {
        let u = join_path(&base("https://www.meetup.com"), &["golang-sf", "events", "123456"]).unwrap();
        assert_eq!(u.as_str(), "https://www.meetup.com/golang-sf/events/123456");

        let u = join_path(&base("https://www.meetup.com/"), &["", "golang-sf", "", "events"]).unwrap();
        assert_eq!(u.as_str(), "https://www.meetup.com/golang-sf/events");
    }

    #[test]
    fn join_path_escapes_segments() {
        let u = join_path(&base("https://www.meetup.com"), &["a/b c", "events", "1?x"]).unwrap();
        assert_eq!(u.as_str(), "https://www.meetup.com/a%2Fb%20c/events/1%3Fx");
    }

    #[test]
    fn join_path_rejects_opaque_base() {
        assert!(join_path(&base("mailto:someone@example.com"), &["x"]).is_none());
    }

    #[test]
    fn summary_url_has_fixed_query() {
        let api = MeetupApi::new(base("https://api.meetup.com"), "test").unwrap();
        assert_eq!(
            api.summary_url(),
            "https://api.meetup.com/pro/go/es_groups_summary?location=global&order=next_event&desc=false"
        );
    }
}
