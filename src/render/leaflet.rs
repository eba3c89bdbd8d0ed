use crate::render::surface::MapDocument;
use anyhow::Result;

const LEAFLET_VERSION: &str = "1.9.4";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>Events</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@__LEAFLET__/dist/leaflet.css" />
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script src="https://unpkg.com/leaflet@__LEAFLET__/dist/leaflet.js"></script>
<script>
const view = __VIEW__;
const markers = __MARKERS__;
const map = L.map('map').setView([view.center.lat, view.center.lng], view.zoom);
L.tileLayer(view.tile_url, {
    attribution: '&copy; OpenStreetMap contributors',
    maxZoom: 18,
}).addTo(map);

const popup = L.popup();
markers.forEach(m => {
    const marker = L.circleMarker([m.position.lat, m.position.lng], {
        radius: 7,
        color: m.color,
        fillColor: m.color,
        weight: 2,
        fillOpacity: m.show_marker_dot ? 0.85 : 0,
    });
    marker.on('click', e => {
        L.DomEvent.stopPropagation(e);
        popup.setLatLng(e.target.getLatLng()).setContent(m.label).openOn(map);
    });
    marker.addTo(map);
});
map.on('click', () => map.closePopup(popup));
</script>
</body>
</html>
"#;

/// Standalone Leaflet page for a rendered document. All markers share a single
/// popup; clicking the map background closes it.
pub fn to_html(doc: &MapDocument) -> Result<String> {
    let view = script_json(&serde_json::to_string(doc.view())?);
    let markers = script_json(&serde_json::to_string(doc.markers())?);
    Ok(PAGE_TEMPLATE
        .replace("__LEAFLET__", LEAFLET_VERSION)
        .replace("__VIEW__", &view)
        .replace("__MARKERS__", &markers))
}

// Labels carry markup; keep a literal `</script>` from ending the block early.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
