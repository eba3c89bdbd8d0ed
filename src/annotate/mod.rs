pub mod filter;
pub mod label;
pub mod style;

use crate::annotate::filter::{UsableEvent, filter_usable};
use crate::annotate::style::{MarkerSettings, select_style};
use crate::feed::RawEvent;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Placement request for one usable event. Built once, never edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub position: LatLng,
    pub label: String,
    pub color: String,
    pub show_marker_dot: bool,
}

impl Annotation {
    pub fn from_event(
        event: &UsableEvent,
        settings: &MarkerSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let style = select_style(event, settings, now);
        Self {
            position: event.position(),
            label: label::format_label(event),
            color: style.color,
            show_marker_dot: style.show_dot,
        }
    }
}

pub fn build_annotations(
    events: &[RawEvent],
    settings: &MarkerSettings,
    now: DateTime<Utc>,
) -> Vec<Annotation> {
    filter_usable(events)
        .iter()
        .map(|ev| Annotation::from_event(ev, settings, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::style::{StyleOverride, StyleRule};
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn builds_one_annotation_per_usable_event() {
        let events = [
            json!({"city": "Seattle", "state": "WA", "event_status": "G",
                   "start_date": "2014-03-01", "location": {"lat": 47.6, "lng": -122.3}}),
            json!({"city": "Nowhere", "event_status": "C",
                   "location": {"lat": 1, "lng": 1}}),
            json!({"city": "Austin", "event_status": "W",
                   "start_date": "2012-03-01", "location": {"lat": 30.2, "lng": -97.7}}),
        ]
        .iter()
        .map(RawEvent::from_value)
        .collect::<Vec<_>>();
        let settings = MarkerSettings {
            future_events: Some(StyleOverride {
                color: Some("green".to_string()),
                show_dot: None,
            }),
            ..MarkerSettings::uniform(StyleRule {
                color: "red".to_string(),
                show_dot: true,
            })
        };
        let now = Utc.with_ymd_and_hms(2013, 1, 1, 0, 0, 0).unwrap();

        let annotations = build_annotations(&events, &settings, now);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].label, "Seattle, WA<br />Mar 1, 2014");
        assert_eq!(annotations[0].color, "green");
        assert_eq!(annotations[0].position, LatLng { lat: 47.6, lng: -122.3 });
        assert_eq!(annotations[1].label, "Austin<br />Mar 1, 2012");
        assert_eq!(annotations[1].color, "red");
        assert!(annotations[1].show_marker_dot);
    }
}
