use crate::annotate::{Annotation, LatLng};
use crate::render::surface::{MapSurface, SurfaceId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type SharedPopup = Rc<RefCell<PopupSurface>>;

/// The one popup of a host surface. Showing new content replaces the old;
/// closing hides it but keeps the instance around for the next click.
#[derive(Debug)]
pub struct PopupSurface {
    surface: SurfaceId,
    content: Option<String>,
    anchor: Option<LatLng>,
    open: bool,
}

impl PopupSurface {
    fn new(surface: SurfaceId) -> Self {
        Self {
            surface,
            content: None,
            anchor: None,
            open: false,
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn anchor(&self) -> Option<LatLng> {
        self.anchor
    }

    /// Ignored when `surface` is not the one this popup is bound to.
    pub fn show(&mut self, surface: &mut dyn MapSurface, label: &str, anchor: &Annotation) {
        if surface.id() != self.surface {
            return;
        }
        if self.open {
            surface.close_popup();
        }
        self.content = Some(label.to_string());
        self.anchor = Some(anchor.position);
        self.open = true;
        surface.open_popup(label, anchor.position);
    }

    pub fn close(&mut self, surface: &mut dyn MapSurface) {
        if surface.id() != self.surface {
            return;
        }
        if self.open {
            surface.close_popup();
            self.open = false;
        }
    }
}

/// Lazily created popups, one per host surface.
#[derive(Debug, Default)]
pub struct PopupRegistry {
    popups: HashMap<SurfaceId, SharedPopup>,
}

impl PopupRegistry {
    pub fn get_or_create(&mut self, surface: SurfaceId) -> SharedPopup {
        self.popups
            .entry(surface)
            .or_insert_with(|| Rc::new(RefCell::new(PopupSurface::new(surface))))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.popups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{MapDocument, MapView};

    fn doc() -> MapDocument {
        MapDocument::new(MapView {
            center: LatLng { lat: 0.0, lng: 0.0 },
            zoom: 3,
            tile_url: String::new(),
        })
    }

    fn annotation(label: &str, lat: f64) -> Annotation {
        Annotation {
            position: LatLng { lat, lng: 0.5 },
            label: label.to_string(),
            color: "red".to_string(),
            show_marker_dot: true,
        }
    }

    #[test]
    fn get_or_create_is_idempotent_per_surface() {
        let mut registry = PopupRegistry::default();
        let a = doc();
        let b = doc();

        let first = registry.get_or_create(a.id());
        let second = registry.get_or_create(a.id());
        assert!(Rc::ptr_eq(&first, &second));

        let other = registry.get_or_create(b.id());
        assert!(!Rc::ptr_eq(&first, &other));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn show_replaces_previous_content() {
        let mut surface = doc();
        let mut registry = PopupRegistry::default();
        let popup = registry.get_or_create(surface.id());

        let seattle = annotation("Seattle", 47.6);
        let austin = annotation("Austin", 30.2);
        popup.borrow_mut().show(&mut surface, &seattle.label, &seattle);
        popup.borrow_mut().show(&mut surface, &austin.label, &austin);

        let popup = popup.borrow();
        assert!(popup.is_open());
        assert_eq!(popup.content(), Some("Austin"));
        assert_eq!(popup.anchor(), Some(austin.position));
        assert_eq!(surface.popup().content.as_deref(), Some("Austin"));
        assert_eq!(surface.popup().at, Some(austin.position));
    }

    #[test]
    fn close_hides_without_destroying() {
        let mut surface = doc();
        let mut registry = PopupRegistry::default();
        let popup = registry.get_or_create(surface.id());
        let boise = annotation("Boise", 43.6);

        popup.borrow_mut().show(&mut surface, &boise.label, &boise);
        popup.borrow_mut().close(&mut surface);
        assert!(!popup.borrow().is_open());
        assert!(!surface.popup().open);
        assert!(Rc::ptr_eq(&popup, &registry.get_or_create(surface.id())));

        popup.borrow_mut().show(&mut surface, &boise.label, &boise);
        assert!(surface.popup().open);
    }

    #[test]
    fn foreign_surface_is_left_untouched() {
        let mut bound = doc();
        let mut other = doc();
        let mut registry = PopupRegistry::default();
        let popup = registry.get_or_create(bound.id());
        let boise = annotation("Boise", 43.6);

        popup.borrow_mut().show(&mut other, &boise.label, &boise);
        assert!(!popup.borrow().is_open());
        assert!(!other.popup().open);

        popup.borrow_mut().show(&mut bound, &boise.label, &boise);
        popup.borrow_mut().close(&mut other);
        assert!(popup.borrow().is_open());
        assert!(bound.popup().open);
    }
}
