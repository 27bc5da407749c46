use serde::de::Error;
use serde::{Deserialize, Deserializer};
use shared_kernel::string_key;

const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";
const UNAVAILABLE: &str = "N/A";

string_key!(CarparkNumber);

/// One carpark as returned by the lookup service, ordered nearest first.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Carpark {
    pub carpark_number: CarparkNumber,
    #[serde(default)]
    pub name: Option<String>,
    pub address: String,
    #[serde(rename = "type")]
    pub carpark_type: String,
    #[serde(deserialize_with = "lenient_count")]
    pub available_lots: i64,
    #[serde(default, deserialize_with = "lenient_optional_count")]
    pub total_lots: Option<i64>,
    #[serde(default, deserialize_with = "lenient_optional_count")]
    pub total_lots_static: Option<i64>,
    /// Meters from the searched location.
    pub distance: f64,
    #[serde(default, deserialize_with = "lenient_coordinates")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl TryFrom<&serde_json::Value> for Coordinates {
    type Error = String;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value.as_array().map(Vec::as_slice) {
            Some([lat, lng]) => match (lat.as_f64(), lng.as_f64()) {
                (Some(lat), Some(lng)) => Ok(Coordinates { lat, lng }),
                _ => Err(format!("Coordinates must be numeric, got {value}")),
            },
            _ => Err(format!("Coordinates must be a [lat, lng] pair, got {value}")),
        }
    }
}

/// Malformed coordinates only cost the map link, never the whole response.
fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Option<Coordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| {
        Coordinates::try_from(&value)
            .map_err(|err| tracing::debug!("Ignoring coordinates: {err}"))
            .ok()
    }))
}

/// Lot counts may arrive as integral floats (`352.0`).
fn count_from_number(number: &serde_json::Number) -> Result<i64, String> {
    if let Some(count) = number.as_i64() {
        return Ok(count);
    }
    match number.as_f64() {
        Some(count) if count.fract() == 0.0 && count.abs() <= i64::MAX as f64 => {
            Ok(count as i64)
        }
        _ => Err(format!("Lot count must be a whole number, got {number}")),
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    count_from_number(&number).map_err(D::Error::custom)
}

fn lenient_optional_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Number>::deserialize(deserializer)?
        .map(|number| count_from_number(&number).map_err(D::Error::custom))
        .transpose()
}

impl Carpark {
    /// First non-blank of name, address and carpark number.
    pub fn display_title(&self) -> String {
        self.name
            .as_deref()
            .into_iter()
            .chain([self.address.as_str()])
            .map(str::trim)
            .find(|candidate| !candidate.is_empty())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| self.carpark_number.inner())
    }

    pub fn total_lots_display(&self) -> String {
        self.total_lots
            .filter(|lots| *lots > 0)
            .or(self.total_lots_static)
            .map(|lots| lots.to_string())
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    pub fn distance_display(&self) -> String {
        format_distance(self.distance)
    }

    pub fn map_link(&self) -> String {
        map_link(self.coordinates.as_ref())
    }
}

pub fn format_distance(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

pub fn map_link(coordinates: Option<&Coordinates>) -> String {
    match coordinates {
        Some(Coordinates { lat, lng }) => format!("{MAP_SEARCH_URL}{lat},{lng}"),
        None => format!("{MAP_SEARCH_URL}{UNAVAILABLE},{UNAVAILABLE}"),
    }
}
