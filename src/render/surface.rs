use crate::annotate::{Annotation, LatLng};
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerId(pub usize);

/// Initial viewport of the host map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_url: String,
}

/// The host map widget. Markers are placed once; the popup is driven by
/// [`crate::render::popup::PopupSurface`].
pub trait MapSurface {
    fn id(&self) -> SurfaceId;
    fn place_marker(&mut self, annotation: &Annotation) -> MarkerId;
    fn open_popup(&mut self, content: &str, at: LatLng);
    fn close_popup(&mut self);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub id: MarkerId,
    #[serde(flatten)]
    pub annotation: Annotation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopupView {
    pub open: bool,
    pub content: Option<String>,
    pub at: Option<LatLng>,
}

/// In-memory surface that records what a map widget would display.
#[derive(Debug, Clone, Serialize)]
pub struct MapDocument {
    surface_id: SurfaceId,
    view: MapView,
    markers: Vec<PlacedMarker>,
    popup: PopupView,
}

impl MapDocument {
    pub fn new(view: MapView) -> Self {
        Self {
            surface_id: SurfaceId::new(),
            view,
            markers: Vec::new(),
            popup: PopupView::default(),
        }
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn markers(&self) -> &[PlacedMarker] {
        &self.markers
    }

    pub fn popup(&self) -> &PopupView {
        &self.popup
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl MapSurface for MapDocument {
    fn id(&self) -> SurfaceId {
        self.surface_id
    }

    fn place_marker(&mut self, annotation: &Annotation) -> MarkerId {
        let id = MarkerId(self.markers.len());
        self.markers.push(PlacedMarker {
            id,
            annotation: annotation.clone(),
        });
        id
    }

    fn open_popup(&mut self, content: &str, at: LatLng) {
        self.popup = PopupView {
            open: true,
            content: Some(content.to_string()),
            at: Some(at),
        };
    }

    fn close_popup(&mut self) {
        self.popup.open = false;
    }
}
