// src/output.rs
use anyhow::{Context, Result};
use std::io::Write;

use crate::feed::Feed;

/// Provenance banner written above the YAML document.
pub const EVENTS_HEADER: &str = "\
# DO NOT EDIT: Autogenerated from cmd/events.
# To update, run:
#    cargo run --bin events > data/events.yaml";

/// Banner + YAML document, fully rendered in memory.
pub fn render(feed: &Feed) -> Result<String> {
    let yaml = serde_yaml::to_string(feed).context("failed to encode event yaml")?;
    Ok(format!("{EVENTS_HEADER}\n{yaml}"))
}

/// Render, then write in one go so a failed encode leaves `sink` untouched.
pub fn write_feed<W: Write>(feed: &Feed, sink: &mut W) -> Result<()> {
    let doc = render(feed)?;
    sink.write_all(doc.as_bytes())
        .context("failed to write event yaml")?;
    sink.flush().context("failed to flush event yaml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::EventRecord;

    #[test]
    fn empty_feed_renders_banner_and_empty_list() {
        let doc = render(&Feed::default()).unwrap();
        assert!(doc.starts_with("# DO NOT EDIT: Autogenerated from cmd/events.\n"));
        assert!(doc.ends_with("All: []\n"));
    }

    #[test]
    fn rendered_yaml_is_parseable_after_banner() {
        let feed = Feed::from_records(vec![EventRecord {
            city: "Berlin".into(),
            country: "de".into(),
            description: "Talks<br/>\n&amp; pizza".into(),
            id: "42".into(),
            local_date: "Sep 9, 2001".into(),
            local_time: "2001-09-09T03:46:40+02:00".into(),
            localized_country: "Germany".into(),
            localized_location: "Berlin, Germany".into(),
            name: "Go: Generics".into(),
            state: String::new(),
            thumbnail_url: "https://img.test/t.jpeg".into(),
            url: "https://www.meetup.com/golang-berlin/events/42".into(),
        }]);

        let mut buf = Vec::new();
        write_feed(&feed, &mut buf).unwrap();
        let doc = String::from_utf8(buf).unwrap();

        let v: serde_yaml::Value = serde_yaml::from_str(&doc).unwrap();
        let ev = &v["All"][0];
        assert_eq!(ev["Name"].as_str(), Some("Go: Generics"));
        assert_eq!(ev["Description"].as_str(), Some("Talks<br/>\n&amp; pizza"));
        assert_eq!(ev["local_time"].as_str(), Some("2001-09-09T03:46:40+02:00"));
        assert_eq!(ev["ID"].as_str(), Some("42"));
    }
}
