//! Normalization from raw locator entries to dataset [`StoreRecord`]s.

use locinsight_core::{Coordinate, ProvinceCatalog, StoreRecord};

use crate::types::UpstreamStore;

/// Province label for addresses no catalog prefix matches.
pub const UNKNOWN_PROVINCE: &str = "기타";

/// Converts one locator entry into a dataset record.
///
/// The province comes from the address prefix, not from upstream's own
/// label. The district is the second whitespace-separated address token.
/// Returns `None` when either coordinate is absent or blank; a present but
/// non-numeric coordinate is kept and left for the map layer to skip.
#[must_use]
pub fn normalize_store(raw: UpstreamStore, catalog: &ProvinceCatalog) -> Option<StoreRecord> {
    let latitude = present(raw.lat)?;
    let longitude = present(raw.lot)?;

    let first_line = raw.addr.lines().next().unwrap_or_default();
    let address = first_line.trim().to_string();
    let province = catalog
        .province_for_address(&address)
        .unwrap_or(UNKNOWN_PROVINCE)
        .to_string();
    let district = address.split_whitespace().nth(1).map(str::to_string);

    Some(StoreRecord {
        name: raw.s_name.trim().to_string(),
        address,
        latitude,
        longitude,
        province,
        district,
    })
}

fn present(coordinate: Option<Coordinate>) -> Option<Coordinate> {
    coordinate.filter(|c| match c {
        Coordinate::Number(_) => true,
        Coordinate::Text(s) => !s.trim().is_empty(),
        Coordinate::Missing => false,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
