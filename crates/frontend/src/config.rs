use serde::Deserialize;

/// Map view configuration. Defaults match the production deployment;
/// deployments can ship overrides as JSON (any subset of fields).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial view center, `[latitude, longitude]`.
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: [51.1, 17.05],
            zoom: 13,
            min_zoom: 2,
            max_zoom: 19,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://openstreetmap.org/copyright\">OpenStreetMap contributors</a>".to_string(),
        }
    }
}
