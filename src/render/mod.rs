pub mod leaflet;
pub mod popup;
pub mod surface;

use crate::annotate::Annotation;
use crate::annotate::filter::filter_usable;
use crate::annotate::style::MarkerSettings;
use crate::config::SwmapConfig;
use crate::feed::transport::FeedTransport;
use crate::feed::{RawEvent, parse_feed};
use crate::logging::PipelineLog;
use crate::render::popup::{PopupRegistry, SharedPopup};
use crate::render::surface::{MapSurface, MarkerId, SurfaceId};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// User interaction reported by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    MarkerActivated(MarkerId),
    BackgroundActivated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub run_id: String,
    pub received: usize,
    pub placed: usize,
    pub dropped: usize,
}

/// Result of one render: the placed annotations and the click wiring that
/// routes surface events to the shared popup.
#[derive(Debug)]
pub struct RenderSession {
    surface: SurfaceId,
    popup: SharedPopup,
    wiring: Vec<(MarkerId, Annotation)>,
    summary: RenderSummary,
}

impl RenderSession {
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn popup(&self) -> SharedPopup {
        self.popup.clone()
    }

    pub fn summary(&self) -> &RenderSummary {
        &self.summary
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.wiring.iter().map(|(_, a)| a)
    }

    pub fn marker_ids(&self) -> impl Iterator<Item = MarkerId> + '_ {
        self.wiring.iter().map(|(id, _)| *id)
    }

    /// Events from another surface, and clicks on markers this session did
    /// not place, are ignored.
    pub fn dispatch(&self, surface: &mut dyn MapSurface, event: SurfaceEvent) {
        if surface.id() != self.surface {
            return;
        }
        match event {
            SurfaceEvent::MarkerActivated(id) => {
                if let Some((_, annotation)) = self.wiring.iter().find(|(m, _)| *m == id) {
                    self.popup
                        .borrow_mut()
                        .show(surface, &annotation.label, annotation);
                }
            }
            SurfaceEvent::BackgroundActivated => self.popup.borrow_mut().close(surface),
        }
    }
}

pub struct Orchestrator {
    popups: PopupRegistry,
    log: PipelineLog,
}

impl Orchestrator {
    pub fn new(log_path: Option<PathBuf>) -> Self {
        Self {
            popups: PopupRegistry::default(),
            log: PipelineLog::new(log_path),
        }
    }

    pub fn run_id(&self) -> &str {
        self.log.run_id()
    }

    pub fn ensure_popup(&mut self, surface: SurfaceId) -> SharedPopup {
        self.popups.get_or_create(surface)
    }

    /// Fetches the configured feed once and renders it onto `surface`.
    pub fn run(
        &mut self,
        transport: &dyn FeedTransport,
        config: &SwmapConfig,
        surface: &mut dyn MapSurface,
        now: DateTime<Utc>,
    ) -> Result<RenderSession> {
        let url = config.fetch_url();
        self.log.record("feed_url_built", json!({ "url": url }))?;

        let body = transport.fetch(&url)?;
        self.log.record(
            "feed_fetched",
            json!({ "bytes": body.len(), "sha256": sha256_hex(&body) }),
        )?;

        let events = parse_feed(&body)?;
        self.log
            .record("events_parsed", json!({ "count": events.len() }))?;

        self.render(&events, &config.markers, surface, now)
    }

    pub fn render(
        &mut self,
        raw_events: &[RawEvent],
        settings: &MarkerSettings,
        surface: &mut dyn MapSurface,
        now: DateTime<Utc>,
    ) -> Result<RenderSession> {
        let surface_id = surface.id();
        let popup = self.ensure_popup(surface_id);

        let usable = filter_usable(raw_events);
        let dropped = raw_events.len() - usable.len();
        self.log.record(
            "events_filtered",
            json!({ "kept": usable.len(), "dropped": dropped }),
        )?;

        let wiring = usable
            .iter()
            .map(|ev| {
                let annotation = Annotation::from_event(ev, settings, now);
                (surface.place_marker(&annotation), annotation)
            })
            .collect::<Vec<_>>();

        let summary = RenderSummary {
            run_id: self.log.run_id().to_string(),
            received: raw_events.len(),
            placed: wiring.len(),
            dropped,
        };
        self.log.record(
            "annotations_rendered",
            json!({ "surface": surface_id.to_string(), "placed": summary.placed }),
        )?;

        Ok(RenderSession {
            surface: surface_id,
            popup,
            wiring,
            summary,
        })
    }
}

pub(crate) fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}
