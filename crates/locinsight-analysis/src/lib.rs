//! Derivations over the in-memory store dataset: filtering by region,
//! district drill-down, regional histogram, and location classification.
//!
//! Everything here is synchronous and pure except [`StoreRepository::load_all`],
//! the single asynchronous dataset read.

pub mod classify;
pub mod filter;
pub mod histogram;
pub mod repository;
pub mod selection;
pub mod view;
pub mod viewport;

pub use classify::{
    classify, count_signals, evaluate, rule_order, Category, Classification, SignalCounts,
};
pub use filter::{district_list, filter_stores, matches_district, matches_province};
pub use histogram::{region_histogram, RegionCount, RegionHistogram};
pub use repository::{LoadState, LoadStatus, StoreRepository};
pub use selection::{is_all, Dashboard, Selection, SelectionError, ALL_SENTINEL};
pub use view::{map_pins, ChartSeries, DashboardView, MapPin};
pub use viewport::Viewport;

use locinsight_core::{AppConfig, ClassifierThresholds};

/// Tunables for the derivation pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    pub histogram_top_n: usize,
    pub thresholds: ClassifierThresholds,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            histogram_top_n: 5,
            thresholds: ClassifierThresholds::default(),
        }
    }
}

impl AnalysisSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            histogram_top_n: config.histogram_top_n,
            thresholds: config.thresholds,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use locinsight_core::{Coordinate, StoreRecord};

    pub fn store(name: &str, address: &str, province: &str, district: Option<&str>) -> StoreRecord {
        store_at(name, address, province, district, "37.5", "127.0")
    }

    pub fn store_at(
        name: &str,
        address: &str,
        province: &str,
        district: Option<&str>,
        lat: &str,
        lng: &str,
    ) -> StoreRecord {
        StoreRecord {
            name: name.to_string(),
            address: address.to_string(),
            latitude: Coordinate::from(lat),
            longitude: Coordinate::from(lng),
            province: province.to_string(),
            district: district.map(str::to_string),
        }
    }

    const SAMPLE: &str = r#"[
        {"s_name":"강남R","addr":"서울특별시 강남구 강남대로 390","lat":"37.4979","lot":"127.0276","sido_name":"서울","gugun_name":"강남구"},
        {"s_name":"성수역","addr":"서울특별시 성동구 아차산로 100","lat":"37.5446","lot":"127.0557","sido_name":"서울","gugun_name":"성동구"},
        {"s_name":"역삼아레나빌딩","addr":"서울특별시 강남구 테헤란로 1","lat":"37.5006","lot":"127.0364","sido_name":"서울","gugun_name":"강남구"},
        {"s_name":"연남동","addr":"서울특별시 마포구 동교로 240","lat":"37.5610","lot":"126.9254","sido_name":"서울","gugun_name":"마포구"},
        {"s_name":"해운대","addr":"부산광역시 해운대구 해운대해변로 1","lat":"35.1631","lot":"129.1636","sido_name":"부산","gugun_name":"해운대구"},
        {"s_name":"서면","addr":"부산광역시 부산진구 중앙대로 1","lat":"35.1577","lot":"129.0592","sido_name":"부산","gugun_name":"부산진구"},
        {"s_name":"세종청사","addr":"세종특별자치시 도움6로 1","lat":"36.5040","lot":"127.2494","sido_name":"세종","gugun_name":""}
    ]"#;

    /// A small national sample spanning three provinces.
    pub fn sample() -> Vec<StoreRecord> {
        locinsight_core::parse_dataset(SAMPLE).expect("valid sample dataset")
    }
}
