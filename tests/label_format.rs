use serde_json::json;
use swmap::annotate::filter::filter_usable;
use swmap::annotate::label::format_label;
use swmap::feed::RawEvent;

fn label_for(value: serde_json::Value) -> String {
    let events = vec![RawEvent::from_value(&value)];
    let usable = filter_usable(&events);
    assert_eq!(usable.len(), 1, "fixture must be usable");
    format_label(&usable[0])
}

fn seattle() -> serde_json::Value {
    json!({
        "city": "Seattle",
        "state": "WA",
        "country": "USA",
        "start_date": "2012-01-01T00:00:00Z",
        "event_status": "G",
        "location": {"lat": 47.6, "lng": -122.3}
    })
}

#[test]
fn formats_location_date_and_link() {
    let mut ev = seattle();
    ev["website"] = json!("http://startupweekend.org");
    assert_eq!(
        label_for(ev),
        "Seattle, WA, USA<br />Jan 1, 2012<br /><a target='_blank' href='http://startupweekend.org'>http://startupweekend.org</a>"
    );
}

#[test]
fn omits_link_without_website() {
    assert_eq!(label_for(seattle()), "Seattle, WA, USA<br />Jan 1, 2012");

    let mut ev = seattle();
    ev["website"] = json!("");
    assert_eq!(label_for(ev), "Seattle, WA, USA<br />Jan 1, 2012");
}

#[test]
fn omits_date_line_without_start_date() {
    let mut ev = seattle();
    ev["start_date"] = json!(null);
    ev["website"] = json!("seattle.startupweekend.org");
    assert_eq!(
        label_for(ev),
        "Seattle, WA, USA<br /><a target='_blank' href='http://seattle.startupweekend.org'>seattle.startupweekend.org</a>"
    );
}

#[test]
fn city_only_label_has_no_breaks() {
    assert_eq!(
        label_for(json!({
            "city": "Lagos",
            "event_status": "W",
            "location": {"lat": 6.5, "lng": 3.4}
        })),
        "Lagos"
    );
}
