use crate::annotate::LatLng;
use crate::feed::RawEvent;

/// A feed record known to be mappable: live status and a full coordinate pair.
/// Only [`filter_usable`] hands these out.
#[derive(Debug, Clone, Copy)]
pub struct UsableEvent<'a> {
    event: &'a RawEvent,
    position: LatLng,
}

impl<'a> UsableEvent<'a> {
    pub fn event(&self) -> &'a RawEvent {
        self.event
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    fn check(event: &'a RawEvent) -> Option<Self> {
        if !event.event_status.as_ref().is_some_and(|s| s.is_live()) {
            return None;
        }
        let loc = event.location?;
        // 0.0 is a real coordinate (equator, prime meridian) and is kept.
        let (lat, lng) = (loc.lat?, loc.lng?);
        Some(Self {
            event,
            position: LatLng { lat, lng },
        })
    }
}

pub fn filter_usable(events: &[RawEvent]) -> Vec<UsableEvent<'_>> {
    events.iter().filter_map(UsableEvent::check).collect()
}
