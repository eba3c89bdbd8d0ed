use crate::annotate::LatLng;
use crate::annotate::style::{MarkerSettings, StyleOverride, StyleRule};
use crate::feed::query::{QuerySpec, build_query_url};
use crate::render::surface::MapView;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "swmap.toml";
pub const DEFAULT_FEED_URL: &str = "http://swoop.startupweekend.org/events";
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_MARKER_COLOR: &str = "red";
const DEFAULT_CENTER: LatLng = LatLng {
    lat: 39.8283,
    lng: -98.5795,
};
const DEFAULT_ZOOM: u8 = 4;
const MAX_ZOOM: u8 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SwmapConfig {
    pub url: String,
    pub query: QuerySpec,
    pub map: MapView,
    pub markers: MarkerSettings,
}

impl SwmapConfig {
    pub fn fetch_url(&self) -> String {
        build_query_url(&self.url, &self.query)
    }
}

impl Default for SwmapConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            query: QuerySpec::new(),
            map: default_map_view(),
            markers: MarkerSettings::uniform(default_style()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSwmapConfig {
    version: Option<u32>,
    url: Option<String>,
    query: Option<toml::Table>,
    map: Option<RawMapConfig>,
    markers: Option<RawMarkersConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMapConfig {
    center_lat: Option<f64>,
    center_lng: Option<f64>,
    zoom: Option<i64>,
    tile_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMarkersConfig {
    color: Option<String>,
    show_dot: Option<bool>,
    past_events: Option<RawStyleOverride>,
    future_events: Option<RawStyleOverride>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStyleOverride {
    color: Option<String>,
    show_dot: Option<bool>,
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Loads `explicit` when given, else `swmap.toml` in `dir` if present, else
/// built-in defaults.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<SwmapConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let path = config_path(dir);
    if !path.exists() {
        return Ok(SwmapConfig::default());
    }
    load_config(&path)
}

pub fn load_config(path: &Path) -> Result<SwmapConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let parsed: RawSwmapConfig =
        toml::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    validate_config(parsed, path)
}

fn validate_config(raw: RawSwmapConfig, path: &Path) -> Result<SwmapConfig> {
    if let Some(version) = raw.version
        && version != 1
    {
        bail!(
            "{} has unsupported version {version}; expected version = 1",
            path.display()
        );
    }

    let url = match raw.url {
        None => DEFAULT_FEED_URL.to_string(),
        Some(url) => {
            let url = url.trim().to_string();
            if url.is_empty() {
                bail!("{} has empty `url`", path.display());
            }
            url
        }
    };

    let query = raw
        .query
        .map(|table| validate_query(table, path))
        .transpose()?
        .unwrap_or_default();

    let map = raw
        .map
        .map(|map| validate_map(map, path))
        .transpose()?
        .unwrap_or_else(default_map_view);

    let markers = raw
        .markers
        .map(|markers| validate_markers(markers, path))
        .transpose()?
        .unwrap_or_else(|| MarkerSettings::uniform(default_style()));

    Ok(SwmapConfig {
        url,
        query,
        map,
        markers,
    })
}

fn validate_query(table: toml::Table, path: &Path) -> Result<QuerySpec> {
    let mut query = QuerySpec::new();
    for (key, value) in table {
        let value = match value {
            toml::Value::String(s) => s,
            toml::Value::Integer(n) => n.to_string(),
            toml::Value::Float(n) => n.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            toml::Value::Datetime(dt) => dt.to_string(),
            toml::Value::Array(_) | toml::Value::Table(_) => bail!(
                "{} has non-scalar `[query].{key}`; query values must be strings, numbers, booleans or dates",
                path.display()
            ),
        };
        query.insert(key, value);
    }
    Ok(query)
}

fn validate_map(raw: RawMapConfig, path: &Path) -> Result<MapView> {
    let lat = raw.center_lat.unwrap_or(DEFAULT_CENTER.lat);
    if !(-90.0..=90.0).contains(&lat) {
        bail!("{} has out-of-range `[map].center_lat = {lat}`", path.display());
    }
    let lng = raw.center_lng.unwrap_or(DEFAULT_CENTER.lng);
    if !(-180.0..=180.0).contains(&lng) {
        bail!("{} has out-of-range `[map].center_lng = {lng}`", path.display());
    }
    let zoom = match raw.zoom {
        None => DEFAULT_ZOOM,
        Some(z) if (0..=i64::from(MAX_ZOOM)).contains(&z) => z as u8,
        Some(z) => bail!(
            "{} has out-of-range `[map].zoom = {z}`; expected 0..={MAX_ZOOM}",
            path.display()
        ),
    };
    let tile_url =
        sanitize_optional(raw.tile_url).unwrap_or_else(|| DEFAULT_TILE_URL.to_string());
    Ok(MapView {
        center: LatLng { lat, lng },
        zoom,
        tile_url,
    })
}

fn validate_markers(raw: RawMarkersConfig, path: &Path) -> Result<MarkerSettings> {
    let color = match raw.color {
        None => DEFAULT_MARKER_COLOR.to_string(),
        Some(color) => validate_color(color, path, "[markers].color")?,
    };
    let default = StyleRule {
        color,
        show_dot: raw.show_dot.unwrap_or(true),
    };
    let past_events = raw
        .past_events
        .map(|o| validate_override(o, path, "[markers.past_events].color"))
        .transpose()?;
    let future_events = raw
        .future_events
        .map(|o| validate_override(o, path, "[markers.future_events].color"))
        .transpose()?;
    Ok(MarkerSettings {
        default,
        past_events,
        future_events,
    })
}

fn validate_override(raw: RawStyleOverride, path: &Path, key: &str) -> Result<StyleOverride> {
    Ok(StyleOverride {
        color: raw
            .color
            .map(|c| validate_color(c, path, key))
            .transpose()?,
        show_dot: raw.show_dot,
    })
}

fn validate_color(color: String, path: &Path, key: &str) -> Result<String> {
    let color = color.trim().to_string();
    if color.is_empty() {
        bail!("{} has empty `{key}`", path.display());
    }
    Ok(color)
}

fn sanitize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_style() -> StyleRule {
    StyleRule {
        color: DEFAULT_MARKER_COLOR.to_string(),
        show_dot: true,
    }
}

fn default_map_view() -> MapView {
    MapView {
        center: DEFAULT_CENTER,
        zoom: DEFAULT_ZOOM,
        tile_url: DEFAULT_TILE_URL.to_string(),
    }
}
