// src/error.rs
use reqwest::StatusCode;

/// What went wrong while talking to the Meetup API.
#[derive(Debug, thiserror::Error)]
pub enum FetchErrorKind {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("cannot build request URL from base {0}")]
    InvalidUrl(String),
}

/// A failed API read, tagged with its severity.
///
/// `fatal == true` aborts the whole run (directory listing);
/// `fatal == false` only drops the chapter being enriched.
#[derive(Debug, thiserror::Error)]
#[error("{context}: {kind}")]
pub struct FetchError {
    pub fatal: bool,
    pub context: String,
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn fatal(context: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            fatal: true,
            context: context.into(),
            kind,
        }
    }

    pub fn skippable(context: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            fatal: false,
            context: context.into(),
            kind,
        }
    }

    /// Short label used for log fields and metric labels.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Transport(_) => "transport",
            FetchErrorKind::Status(_) => "status",
            FetchErrorKind::Decode(_) => "decode",
            FetchErrorKind::InvalidUrl(_) => "url",
        }
    }
}
