use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Rounds half toward positive infinity, and never yields negative zero.
fn round6(value: f64) -> f64 {
    let rounded = (value * 1e6 + 0.5).floor() / 1e6;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LatLng({}, {})", round6(self.lat), round6(self.lng))
    }
}

/// One facility parsed from a data line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub equipment: Vec<String>,
    pub contact: String,
}

impl LocationRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Counts from one pass of the dataset loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub candidate_lines: usize,
    pub loaded: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<LocationRecord>,
    pub report: LoadReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub usize);

/// Popup attached to a marker when it is placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupSpec {
    pub content: String,
    pub auto_close: bool,
    pub close_on_click: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLng::new(53.9, -3.9),
            zoom: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub detect_retina: bool,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            min_zoom: 2,
            max_zoom: 16,
            detect_retina: true,
        }
    }
}
