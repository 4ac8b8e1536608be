//! Response types for the store locator's `getStore.do` endpoint.
//!
//! The locator answers a form POST with `{"list": [...]}`. Each entry carries
//! many more fields than we use (opening hours, service flags, phone); only
//! the name, address, and coordinates are kept. `lat`/`lot` arrive as numeric
//! strings in observed responses, occasionally as bare numbers, so they share
//! the dataset's text-or-number [`Coordinate`]. A province with no stores
//! returns `"list": null`.

use locinsight_core::Coordinate;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct UpstreamStoreResponse {
    #[serde(default)]
    pub list: Option<Vec<UpstreamStore>>,
}

impl UpstreamStoreResponse {
    #[must_use]
    pub fn into_stores(self) -> Vec<UpstreamStore> {
        self.list.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamStore {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub s_name: String,

    /// Street address; the first line is the one the dataset keeps.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub addr: String,

    #[serde(default)]
    pub lat: Option<Coordinate>,

    /// Longitude, under the locator's own field name.
    #[serde(default)]
    pub lot: Option<Coordinate>,

    /// Upstream's own province label; unreliable for stores near borders.
    #[serde(default)]
    pub sido_name: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
