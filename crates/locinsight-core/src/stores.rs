//! Store records as they appear in the static dataset.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::DatasetError;

/// A coordinate as supplied by the dataset: either a JSON number or text.
///
/// `Missing` stands in for an absent, `null`, or non-scalar value and
/// serializes back as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Coordinate {
    /// Parsed decimal degrees, or `None` when the value is not a finite number.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            Coordinate::Number(v) => Some(*v),
            Coordinate::Text(s) => s.trim().parse::<f64>().ok(),
            Coordinate::Missing => None,
        };
        parsed.filter(|v| v.is_finite())
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One store from the dataset. Immutable once loaded.
///
/// Field names follow the published resource (`s_name`, `addr`, `lat`,
/// `lot`, `sido_name`, `gugun_name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    #[serde(rename = "s_name", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "addr", default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(rename = "lat", default, deserialize_with = "lenient_coordinate")]
    pub latitude: Coordinate,
    #[serde(rename = "lot", default, deserialize_with = "lenient_coordinate")]
    pub longitude: Coordinate,
    #[serde(rename = "sido_name", default, deserialize_with = "null_as_empty")]
    pub province: String,
    #[serde(
        rename = "gugun_name",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub district: Option<String>,
}

impl StoreRecord {
    /// Map position of the store, if both coordinates are usable.
    #[must_use]
    pub fn coordinates(&self) -> Option<LatLng> {
        let lat = self.latitude.value()?;
        let lng = self.longitude.value()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(LatLng { lat, lng })
    }

    /// District name, treating blank text as absent.
    #[must_use]
    pub fn district(&self) -> Option<&str> {
        self.district.as_deref().filter(|d| !d.trim().is_empty())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Coordinate, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map_or(Coordinate::Missing, Coordinate::Number),
        Value::String(s) => Coordinate::Text(s),
        _ => Coordinate::Missing,
    })
}

/// Parse the JSON array of store records.
///
/// # Errors
///
/// Returns [`DatasetError::Parse`] if the document is not an array of stores.
pub fn parse_dataset(json: &str) -> Result<Vec<StoreRecord>, DatasetError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse the dataset from disk.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be read, or
/// [`DatasetError::Parse`] if it is malformed.
pub fn load_dataset(path: &Path) -> Result<Vec<StoreRecord>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_dataset(&content)
}
