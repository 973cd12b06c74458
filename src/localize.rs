// src/localize.rs
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

/// Display date used on the site, e.g. `Sep 9, 2001`.
pub const SHORT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Both renderings of one event start, computed from the same instant and zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTime {
    pub short_date: String,
    /// RFC 3339, seconds precision, `Z` for a zero offset.
    pub timestamp: String,
}

/// Resolve an IANA zone name, falling back to UTC for unknown or empty names.
pub fn resolve_zone(name: &str) -> Tz {
    match name.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::debug!(zone = name, "unknown timezone, using UTC");
            Tz::UTC
        }
    }
}

/// Render `epoch_millis` (milliseconds since the UTC epoch) in `zone_name`.
///
/// Sub-second precision is truncated toward zero. Returns `None` only when the
/// instant is outside chrono's representable range.
pub fn localize(epoch_millis: i64, zone_name: &str) -> Option<LocalTime> {
    let utc = DateTime::<Utc>::from_timestamp(epoch_millis / 1000, 0)?;
    let local = resolve_zone(zone_name).from_utc_datetime(&utc.naive_utc());
    Some(LocalTime {
        short_date: local.format(SHORT_DATE_FORMAT).to_string(),
        timestamp: local.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_zone_falls_back_to_utc() {
        let lt = localize(1_000_000_000_000, "Not/AZone").unwrap();
        assert_eq!(lt.short_date, "Sep 9, 2001");
        assert_eq!(lt.timestamp, "2001-09-09T01:46:40Z");
    }

    #[test]
    fn empty_zone_is_utc() {
        assert_eq!(
            localize(1_000_000_000_000, ""),
            localize(1_000_000_000_000, "UTC")
        );
    }

    #[test]
    fn zone_shifts_date_and_offset_together() {
        // 01:46:40Z is still Sep 8 on the US west coast.
        let lt = localize(1_000_000_000_000, "America/Los_Angeles").unwrap();
        assert_eq!(lt.short_date, "Sep 8, 2001");
        assert_eq!(lt.timestamp, "2001-09-08T18:46:40-07:00");

        let lt = localize(1_000_000_000_000, "Asia/Tokyo").unwrap();
        assert_eq!(lt.short_date, "Sep 9, 2001");
        assert_eq!(lt.timestamp, "2001-09-09T10:46:40+09:00");
    }

    #[test]
    fn milliseconds_are_truncated() {
        let lt = localize(1_000_000_000_999, "UTC").unwrap();
        assert_eq!(lt.timestamp, "2001-09-09T01:46:40Z");
    }

    #[test]
    fn single_digit_day_is_not_padded() {
        // 2024-03-05T12:00:00Z
        let lt = localize(1_709_640_000_000, "Europe/Berlin").unwrap();
        assert_eq!(lt.short_date, "Mar 5, 2024");
        assert_eq!(lt.timestamp, "2024-03-05T13:00:00+01:00");
    }

    #[test]
    fn out_of_range_instant_is_none() {
        assert!(localize(i64::MAX, "UTC").is_none());
    }
}
