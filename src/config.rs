// src/config.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const ENV_CONFIG_PATH: &str = "EVENTS_CONFIG_PATH";
pub const ENV_API_BASE_URL: &str = "EVENTS_API_BASE_URL";
pub const ENV_SITE_BASE_URL: &str = "EVENTS_SITE_BASE_URL";
pub const ENV_USER_AGENT: &str = "EVENTS_USER_AGENT";

pub const DEFAULT_CONFIG_PATH: &str = "config/events.toml";
pub const DEFAULT_API_BASE_URL: &str = "https://api.meetup.com";
pub const DEFAULT_SITE_BASE_URL: &str = "https://www.meetup.com";

fn default_user_agent() -> String {
    format!("community-events/{}", env!("CARGO_PKG_VERSION"))
}

/// Runtime settings, resolved once at startup and passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Where the directory and group endpoints live.
    pub api_base_url: Url,
    /// Origin used for the public event links in the feed.
    pub site_base_url: Url,
    pub user_agent: String,
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    site_base_url: Option<String>,
    user_agent: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default api url"),
            site_base_url: Url::parse(DEFAULT_SITE_BASE_URL).expect("default site url"),
            user_agent: default_user_agent(),
        }
    }
}

impl FeedConfig {
    /// Load from an explicit file (TOML or JSON, by extension), then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading events config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let file = parse_file(&content, &ext)
            .with_context(|| format!("parsing events config {}", path.display()))?;
        Self::resolve(file)
    }

    /// Resolution order:
    /// 1) $EVENTS_CONFIG_PATH (must exist when set)
    /// 2) config/events.toml
    /// 3) built-in defaults
    ///
    /// `EVENTS_*_URL` / `EVENTS_USER_AGENT` env vars override whatever the file says.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Self::resolve(FileConfig::default())
    }

    fn resolve(file: FileConfig) -> Result<Self> {
        let api = env_or(ENV_API_BASE_URL, file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let site = env_or(ENV_SITE_BASE_URL, file.site_base_url)
            .unwrap_or_else(|| DEFAULT_SITE_BASE_URL.to_string());
        let user_agent = env_or(ENV_USER_AGENT, file.user_agent)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default_user_agent);

        Ok(Self {
            api_base_url: parse_base_url("api_base_url", &api)?,
            site_base_url: parse_base_url("site_base_url", &site)?,
            user_agent,
        })
    }
}

fn env_or(key: &str, fallback: Option<String>) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or(fallback)
}

fn parse_file(s: &str, hint_ext: &str) -> Result<FileConfig> {
    if hint_ext == "json" {
        return Ok(serde_json::from_str(s)?);
    }
    Ok(toml::from_str(s)?)
}

fn parse_base_url(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("{field}: invalid URL {raw:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{field}: scheme must be http or https, got {:?}", url.scheme());
    }
    if url.cannot_be_a_base() || url.query().is_some() {
        bail!("{field}: {raw:?} cannot be used as a base URL");
    }
    Ok(url)
}
