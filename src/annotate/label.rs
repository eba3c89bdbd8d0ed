use crate::annotate::filter::UsableEvent;
use chrono::{DateTime, Utc};

const LINE_BREAK: &str = "<br />";

/// Popup markup for one event: location, then start date, then website link.
/// Absent fields drop their whole line, leading break included.
pub fn format_label(event: &UsableEvent) -> String {
    let ev = event.event();
    let mut label = location_line(&ev.city, ev.state.as_deref(), ev.country.as_deref());
    if let Some(start) = ev.start_date {
        label.push_str(LINE_BREAK);
        label.push_str(&date_line(start));
    }
    if let Some(site) = ev.website.as_deref().filter(|s| !s.is_empty()) {
        label.push_str(LINE_BREAK);
        label.push_str(&link_line(site));
    }
    label
}

fn location_line(city: &str, state: Option<&str>, country: Option<&str>) -> String {
    let mut parts = vec![city];
    parts.extend(state.filter(|s| !s.is_empty()));
    parts.extend(country.filter(|s| !s.is_empty()));
    parts.join(", ")
}

fn date_line(start: DateTime<Utc>) -> String {
    start.format("%b %-d, %Y").to_string()
}

fn link_line(site: &str) -> String {
    // Anything mentioning "http" is taken as already carrying a scheme.
    let href = if site.contains("http") {
        site.to_string()
    } else {
        format!("http://{site}")
    };
    format!("<a target='_blank' href='{href}'>{site}</a>")
}
