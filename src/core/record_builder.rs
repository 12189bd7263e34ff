use crate::domain::model::LocationRecord;
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_FIELDS: usize = 5;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("numeric prefix pattern is valid")
});

/// Builds a record from positional tokens: name, latitude, longitude,
/// equipment, contact. Tokens past the fifth are ignored.
///
/// Returns `None` for short rows and for coordinates that are not finite
/// numbers.
pub fn build_record(fields: &[String]) -> Option<LocationRecord> {
    let [name, lat, lng, equipment_raw, contact, ..] = fields else {
        return None;
    };

    let latitude = parse_coordinate(lat)?;
    let longitude = parse_coordinate(lng)?;

    Some(LocationRecord {
        name: name.clone(),
        latitude,
        longitude,
        equipment: split_equipment(equipment_raw),
        contact: contact.clone(),
    })
}

/// Reads the longest numeric prefix after leading whitespace, the way a
/// browser `parseFloat` does, and rejects anything that is not finite.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let prefix = NUMERIC_PREFIX.find(raw.trim_start())?.as_str();
    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strips one surrounding quote on each side, then splits on `;` and trims
/// every item. An empty field gives one empty item.
pub fn split_equipment(raw: &str) -> Vec<String> {
    let raw = raw.strip_prefix('"').unwrap_or(raw);
    let raw = raw.strip_suffix('"').unwrap_or(raw);
    raw.split(';').map(|item| item.trim().to_string()).collect()
}
