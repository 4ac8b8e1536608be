//! Serializable outputs consumed by the map, chart, and summary cards.

use locinsight_core::{LatLng, StoreRecord};
use serde::Serialize;

use crate::classify::Classification;
use crate::histogram::{RegionCount, RegionHistogram};
use crate::selection::Selection;
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPin {
    pub name: String,
    pub address: String,
    pub province: String,
    pub district: Option<String>,
    pub position: LatLng,
}

/// Parallel label/count arrays for the bar chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl From<&RegionHistogram> for ChartSeries {
    fn from(histogram: &RegionHistogram) -> Self {
        let (labels, counts) = histogram
            .entries()
            .iter()
            .map(|e| (e.region.clone(), e.count))
            .unzip();
        Self { labels, counts }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub viewport: Viewport,
    pub total_stores: usize,
    pub filtered_count: usize,
    pub districts: Vec<String>,
    pub district_selector_enabled: bool,
    pub histogram: Vec<RegionCount>,
    pub chart: ChartSeries,
    pub classification: Option<Classification>,
    pub pins: Vec<MapPin>,
    /// Filtered stores left off the map because their coordinates are unusable.
    pub skipped_pins: usize,
}

/// Pins for stores with usable coordinates, plus how many were skipped.
#[must_use]
pub fn map_pins(filtered: &[&StoreRecord]) -> (Vec<MapPin>, usize) {
    let mut skipped = 0;
    let pins = filtered
        .iter()
        .filter_map(|store| {
            let Some(position) = store.coordinates() else {
                tracing::debug!(store = %store.name, "store has malformed coordinates");
                skipped += 1;
                return None;
            };
            Some(MapPin {
                name: store.name.clone(),
                address: store.address.clone(),
                province: store.province.clone(),
                district: store.district().map(str::to_owned),
                position,
            })
        })
        .collect();
    (pins, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::store_at;

    #[test]
    fn malformed_coordinates_are_skipped_not_fatal() {
        let stores = vec![
            store_at("ok", "", "서울", None, "37.5", "127.0"),
            store_at("bad", "", "서울", None, "", "127.0"),
            store_at("worse", "", "서울", None, "north", "east"),
        ];
        let filtered: Vec<&StoreRecord> = stores.iter().collect();
        let (pins, skipped) = map_pins(&filtered);
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].name, "ok");
        assert_eq!(skipped, 2);
    }

    #[test]
    fn records_with_absent_or_null_fields_load_and_are_skipped() {
        let stores = locinsight_core::parse_dataset(
            r#"[
                {"s_name":"ok","addr":"서울특별시 중구 1","lat":"37.56","lot":"126.97","sido_name":"서울"},
                {"s_name":"no-lat","addr":"서울특별시 중구 2","lot":"126.97","sido_name":"서울"},
                {"s_name":"null-lat","addr":"서울특별시 중구 3","lat":null,"lot":"126.97","sido_name":"서울"},
                {"s_name":null,"addr":"서울특별시 중구 4","lat":"37.55","lot":"126.98","sido_name":"서울"}
            ]"#,
        )
        .unwrap();
        let filtered: Vec<&StoreRecord> = stores.iter().collect();
        let (pins, skipped) = map_pins(&filtered);
        assert_eq!(skipped, 2);
        let names: Vec<&str> = pins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ok", ""]);
    }

    #[test]
    fn chart_series_mirrors_histogram_order() {
        let stores = crate::fixtures::sample();
        let filtered: Vec<&StoreRecord> = stores.iter().collect();
        let histogram = crate::histogram::region_histogram(&filtered, &Selection::Nationwide);
        let chart = ChartSeries::from(&histogram);
        assert_eq!(chart.labels, vec!["서울", "부산", "세종"]);
        assert_eq!(chart.counts, vec![4, 2, 1]);
    }
}
