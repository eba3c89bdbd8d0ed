pub mod query;
pub mod transport;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Lifecycle code attached to every feed record. Only `G` and `W` are mappable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStatus {
    Good,
    Working,
    Other(String),
}

impl EventStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "G" => Self::Good,
            "W" => Self::Working,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Good => "G",
            Self::Working => "W",
            Self::Other(code) => code,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Good | Self::Working)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawLocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// One feed record after boundary conversion. Every field the feed may omit or
/// garble is an `Option`; nothing here has been checked for usability yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawEvent {
    pub city: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub event_status: Option<EventStatus>,
    pub location: Option<RawLocation>,
}

impl RawEvent {
    pub fn from_value(value: &Value) -> Self {
        let location = value
            .get("location")
            .filter(|v| v.is_object())
            .map(|loc| RawLocation {
                lat: loc.get("lat").and_then(coordinate),
                lng: loc.get("lng").and_then(coordinate),
            });

        Self {
            city: string_field(value, "city").unwrap_or_default(),
            state: string_field(value, "state"),
            country: string_field(value, "country"),
            website: string_field(value, "website"),
            start_date: value.get("start_date").and_then(date_like),
            event_status: string_field(value, "event_status")
                .map(|code| EventStatus::from_code(code.trim())),
            location,
        }
    }
}

/// Parses a feed response body into raw events. Bodies wrapped in a JSONP
/// callback are unwrapped first.
pub fn parse_feed(body: &str) -> Result<Vec<RawEvent>> {
    let json = strip_jsonp(body.trim());
    let value: Value = serde_json::from_str(json).context("parse feed body")?;
    let Value::Array(items) = value else {
        bail!("feed body is not a JSON array of events");
    };
    Ok(items.iter().map(RawEvent::from_value).collect())
}

pub fn parse_date_like(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn strip_jsonp(body: &str) -> &str {
    if body.starts_with('[') || body.starts_with('{') {
        return body;
    }
    match (body.find('('), body.rfind(')')) {
        (Some(open), Some(close)) if open < close => body[open + 1..close].trim(),
        _ => body,
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(ToString::to_string)
}

fn coordinate(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

fn date_like(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_like(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn converts_complete_record() {
        let ev = RawEvent::from_value(&json!({
            "city": "Seattle",
            "state": "WA",
            "country": "USA",
            "website": "http://startupweekend.org",
            "start_date": "2012-01-01T00:00:00Z",
            "event_status": "G",
            "location": {"lat": 47.6, "lng": -122.3}
        }));
        assert_eq!(ev.city, "Seattle");
        assert_eq!(ev.state.as_deref(), Some("WA"));
        assert_eq!(ev.event_status, Some(EventStatus::Good));
        assert_eq!(
            ev.start_date,
            Some(Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap())
        );
        let loc = ev.location.unwrap();
        assert_eq!(loc.lat, Some(47.6));
        assert_eq!(loc.lng, Some(-122.3));
    }

    #[test]
    fn garbled_fields_become_absent() {
        let ev = RawEvent::from_value(&json!({
            "city": 12,
            "state": null,
            "start_date": "next tuesday",
            "location": {"lat": "abc", "lng": [1]}
        }));
        assert_eq!(ev.city, "");
        assert_eq!(ev.state, None);
        assert_eq!(ev.start_date, None);
        assert_eq!(ev.event_status, None);
        assert_eq!(ev.location, Some(RawLocation::default()));
    }

    #[test]
    fn non_object_location_is_absent() {
        let ev = RawEvent::from_value(&json!({"event_status": "W", "location": "Seattle"}));
        assert_eq!(ev.location, None);
    }

    #[test]
    fn numeric_string_coordinates_are_accepted() {
        let ev = RawEvent::from_value(&json!({"location": {"lat": " 10.5", "lng": "-3"}}));
        let loc = ev.location.unwrap();
        assert_eq!(loc.lat, Some(10.5));
        assert_eq!(loc.lng, Some(-3.0));
    }

    #[test]
    fn parses_date_like_variants() {
        let jan1 = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date_like("2012-01-01"), Some(jan1));
        assert_eq!(parse_date_like("2012-01-01T00:00:00"), Some(jan1));
        assert_eq!(parse_date_like("2012-01-01 00:00:00"), Some(jan1));
        assert_eq!(parse_date_like("2012-01-01T01:00:00+01:00"), Some(jan1));
        assert_eq!(parse_date_like(""), None);
        assert_eq!(
            date_like(&json!(1_325_376_000_000_i64)),
            Some(jan1),
            "epoch millis"
        );
    }

    #[test]
    fn parses_plain_and_jsonp_bodies() {
        let plain = parse_feed(r#"[{"city":"Austin","event_status":"G"}]"#).unwrap();
        assert_eq!(plain.len(), 1);
        assert_eq!(plain[0].city, "Austin");

        let wrapped = parse_feed(r#"jQuery17_123([{"city":"Austin"},{"city":"Boise"}]);"#).unwrap();
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[1].city, "Boise");
    }

    #[test]
    fn rejects_non_array_body() {
        let err = parse_feed(r#"{"error":"rate limited"}"#).unwrap_err();
        assert!(format!("{err}").contains("not a JSON array"));
        assert!(parse_feed("<html>").is_err());
    }
}
