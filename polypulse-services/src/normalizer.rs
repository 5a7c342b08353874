//! Raw-record normalization
//!
//! Converts one loosely-shaped Gamma record into a canonical [`Event`].
//! Normalization is pure: no I/O, no shared state, and malformed input is
//! rejected by returning None rather than raised as an error.

use chrono::{DateTime, NaiveDateTime, Utc};
use polypulse_core::{Event, EventStatus};
use polypulse_gamma::GammaMarket;

/// Canonical form of a category/tag label: trimmed, lowercased, with
/// internal whitespace stripped
pub fn normalize_label(label: &str) -> String {
    label.to_lowercase().split_whitespace().collect()
}

/// Parse a provider timestamp.
///
/// Accepts RFC 3339 (including a trailing `Z` for UTC) and falls back to a
/// naive `YYYY-MM-DDTHH:MM:SS` reading taken as UTC. Unparsable or empty
/// input yields None, never an error.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Category acceptance check.
///
/// The broad category accepts everything: records on that path were already
/// filtered by tag at the gateway. Any other filter must normalize-equal
/// the record's category or be a normalized substring of it (the provider
/// sub-categorizes, e.g. "crypto/15M" under "crypto").
pub fn category_matches(raw_category: &str, filter: &str, broad_category: &str) -> bool {
    let filter_norm = normalize_label(filter);
    if filter_norm == normalize_label(broad_category) {
        return true;
    }

    let raw_norm = normalize_label(raw_category);
    raw_norm == filter_norm || raw_norm.contains(&filter_norm)
}

/// Normalize one raw record into an [`Event`], or reject it.
///
/// A record is rejected when its category fails the filter, when it has no
/// identity, or when no token id can be extracted: an event without a
/// priceable token cannot be sampled and must never be admitted.
pub fn normalize(raw: &GammaMarket, category_filter: &str, broad_category: &str) -> Option<Event> {
    let category = raw.raw_category();
    if !category_matches(&category, category_filter, broad_category) {
        return None;
    }

    let token_id = raw.primary_token_id()?;
    let event_id = raw.primary_event_id()?;
    let market_id = raw.primary_market_id()?;

    let status = if raw.resolved.unwrap_or(false) {
        EventStatus::Resolved
    } else {
        EventStatus::Active
    };

    Some(Event {
        event_id,
        market_id,
        token_id,
        title: raw.display_title(),
        category,
        start_time: raw.start_date.as_deref().and_then(parse_timestamp),
        end_time: raw.end_date.as_deref().and_then(parse_timestamp),
        resolution: raw.resolution.clone(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(json: &str) -> GammaMarket {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Crypto  "), "crypto");
        assert_eq!(normalize_label("Crypto / 15 M"), "crypto/15m");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-06-01T09:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-01T09:30:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-01T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_broad_filter_accepts_any_category() {
        assert!(category_matches("Politics", "crypto", "crypto"));
        assert!(category_matches("", "Crypto", "crypto"));
    }

    #[test]
    fn test_subcategory_filter_matches_substring() {
        assert!(category_matches("crypto/15M", "crypto/15M", "crypto"));
        assert!(category_matches("crypto/15M hourly", "crypto/15M", "crypto"));
        assert!(!category_matches("politics", "crypto/15M", "crypto"));
        assert!(!category_matches("", "crypto/15M", "crypto"));
    }

    #[test]
    fn test_record_without_token_is_rejected() {
        let record = raw(r#"{"id": "e1", "question": "Up?", "category": "crypto/15M"}"#);
        assert!(normalize(&record, "crypto/15M", "crypto").is_none());
    }

    #[test]
    fn test_record_without_identity_is_rejected() {
        let record = raw(r#"{"question": "Up?", "category": "crypto/15M", "tokenId": "t1"}"#);
        assert!(normalize(&record, "crypto/15M", "crypto").is_none());
    }

    #[test]
    fn test_normalize_full_record() {
        let record = raw(
            r#"{
                "id": "321",
                "question": "BTC above 100k?",
                "category": "crypto/15M",
                "clobTokenIds": "[\"tok-yes\", \"tok-no\"]",
                "startDate": "2025-06-01T09:00:00Z",
                "endDate": "2025-06-01T09:15:00Z",
                "resolved": false
            }"#,
        );

        let event = normalize(&record, "crypto/15M", "crypto").unwrap();
        assert_eq!(event.event_id, "321");
        assert_eq!(event.market_id, "321");
        assert_eq!(event.token_id, "tok-yes");
        assert_eq!(event.title, "BTC above 100k?");
        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(
            event.start_time,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_bad_timestamp_degrades_to_unset() {
        let record = raw(
            r#"{
                "id": "1",
                "category": "crypto/15M",
                "tokenId": "t1",
                "startDate": "soon",
                "endDate": "2025-06-01T10:00:00Z"
            }"#,
        );

        let event = normalize(&record, "crypto/15M", "crypto").unwrap();
        assert!(event.start_time.is_none());
        assert!(event.end_time.is_some());
    }

    #[test]
    fn test_resolved_flag_drives_status() {
        let record = raw(r#"{"id": "1", "category": "crypto/15M", "tokenId": "t1", "resolved": true}"#);
        let event = normalize(&record, "crypto/15M", "crypto").unwrap();
        assert_eq!(event.status, EventStatus::Resolved);

        // Closed-but-unresolved still normalizes as active
        let record = raw(r#"{"id": "2", "category": "crypto/15M", "tokenId": "t1", "closed": true}"#);
        let event = normalize(&record, "crypto/15M", "crypto").unwrap();
        assert_eq!(event.status, EventStatus::Active);
    }
}
