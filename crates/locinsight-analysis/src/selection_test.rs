use super::*;
use crate::classify::Category;
use crate::fixtures::{sample, store, store_at};
use crate::viewport::{NATIONWIDE_CENTER, NATIONWIDE_ZOOM};

#[test]
fn starts_nationwide() {
    let stores = sample();
    let dashboard = Dashboard::new(&stores);
    assert_eq!(dashboard.selection(), &Selection::Nationwide);
    assert_eq!(dashboard.viewport(), Viewport::nationwide());
    assert_eq!(dashboard.filtered().len(), stores.len());
}

#[test]
fn province_jumps_to_first_matching_store() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("부산");
    assert_eq!(dashboard.selection().province(), Some("부산"));
    assert_eq!(dashboard.viewport().zoom, PROVINCE_ZOOM);
    let first_busan = stores[4].coordinates().unwrap();
    assert_eq!(dashboard.viewport().center, first_busan);
}

#[test]
fn district_jumps_tighter_than_province() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("서울");
    dashboard.set_district("마포구").unwrap();
    assert_eq!(dashboard.selection().district(), Some("마포구"));
    assert_eq!(dashboard.viewport().zoom, DISTRICT_ZOOM);
    assert!(DISTRICT_ZOOM > PROVINCE_ZOOM);
    let first_mapo = stores[3].coordinates().unwrap();
    assert_eq!(dashboard.viewport().center, first_mapo);
}

#[test]
fn selecting_all_provinces_resets_district_and_viewport() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("서울");
    dashboard.set_district("강남구").unwrap();

    dashboard.set_province(ALL_SENTINEL);
    assert_eq!(dashboard.selection(), &Selection::Nationwide);
    assert_eq!(dashboard.selection().district(), None);
    assert_eq!(dashboard.viewport().center, NATIONWIDE_CENTER);
    assert_eq!(dashboard.viewport().zoom, NATIONWIDE_ZOOM);
}

#[test]
fn changing_province_clears_district() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("서울");
    dashboard.set_district("강남구").unwrap();
    dashboard.set_province("부산");
    assert_eq!(dashboard.selection().district(), None);
}

#[test]
fn sentinel_is_case_insensitive_and_blank_means_all() {
    assert!(is_all("All"));
    assert!(is_all("all"));
    assert!(is_all(" ALL "));
    assert!(is_all(""));
    assert!(!is_all("서울"));
}

#[test]
fn district_without_province_is_rejected() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    let err = dashboard.set_district("강남구").unwrap_err();
    assert_eq!(
        err,
        SelectionError::DistrictWithoutProvince {
            district: "강남구".to_string()
        }
    );
    assert_eq!(dashboard.selection(), &Selection::Nationwide);
}

#[test]
fn all_district_under_nationwide_is_a_no_op() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    assert!(dashboard.set_district("All").is_ok());
    assert_eq!(dashboard.selection(), &Selection::Nationwide);
}

#[test]
fn unknown_district_is_rejected_and_selection_kept() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("부산");
    let err = dashboard.set_district("강남구").unwrap_err();
    assert!(matches!(err, SelectionError::UnknownDistrict { .. }));
    assert_eq!(dashboard.selection().district(), None);
}

#[test]
fn all_district_clears_but_keeps_viewport() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("서울");
    dashboard.set_district("성동구").unwrap();
    let before = dashboard.viewport();
    dashboard.set_district("All").unwrap();
    assert_eq!(dashboard.selection().district(), None);
    assert_eq!(dashboard.viewport(), before);
}

#[test]
fn province_without_stores_keeps_viewport() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("제주");
    assert_eq!(dashboard.selection().province(), Some("제주"));
    assert_eq!(dashboard.viewport(), Viewport::nationwide());
    assert!(dashboard.filtered().is_empty());
}

#[test]
fn province_whose_first_store_is_malformed_keeps_viewport() {
    let stores = vec![
        store_at("bad", "", "강원", Some("춘천시"), "?", "?"),
        store_at("good", "", "강원", Some("춘천시"), "37.88", "127.73"),
    ];
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("강원");
    assert_eq!(dashboard.viewport(), Viewport::nationwide());
    assert_eq!(dashboard.filtered().len(), 2);
}

#[test]
fn apply_sets_province_then_district() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.apply(Some("서울"), Some("강남구")).unwrap();
    assert_eq!(
        dashboard.selection(),
        &Selection::Province {
            province: "서울".to_string(),
            district: Some("강남구".to_string()),
        }
    );
    assert_eq!(dashboard.filtered().len(), 2);

    let err = Dashboard::new(&stores)
        .apply(None, Some("강남구"))
        .unwrap_err();
    assert!(matches!(
        err,
        SelectionError::DistrictWithoutProvince { .. }
    ));
}

#[test]
fn nationwide_snapshot_has_disabled_empty_district_selector() {
    let stores = sample();
    let view = Dashboard::new(&stores).snapshot(&AnalysisSettings::default());
    assert!(view.districts.is_empty());
    assert!(!view.district_selector_enabled);
    assert_eq!(view.total_stores, stores.len());
    assert_eq!(view.filtered_count, stores.len());
}

#[test]
fn snapshot_histogram_is_bounded_sorted_and_sums_to_filtered() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("서울");
    let view = dashboard.snapshot(&AnalysisSettings::default());

    assert!(view.histogram.len() <= 5);
    assert!(view.histogram.windows(2).all(|w| w[0].count >= w[1].count));
    let sum: usize = view.histogram.iter().map(|e| e.count).sum();
    assert_eq!(sum, view.filtered_count);
    assert_eq!(view.chart.labels.len(), view.histogram.len());
    assert!(view.district_selector_enabled);
    assert_eq!(view.districts, vec!["강남구", "마포구", "성동구"]);
}

#[test]
fn snapshot_respects_configured_top_n() {
    let mut stores = Vec::new();
    let districts = ["a", "b", "c", "d", "e", "f", "g", "h"];
    for (i, district) in districts.into_iter().enumerate() {
        for _ in 0..=i {
            stores.push(store("s", "", "경기", Some(district)));
        }
    }
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("경기");

    let five = dashboard.snapshot(&AnalysisSettings::default());
    assert_eq!(five.histogram.len(), 5);

    let seven = dashboard.snapshot(&AnalysisSettings {
        histogram_top_n: 7,
        ..AnalysisSettings::default()
    });
    assert_eq!(seven.histogram.len(), 7);
    assert_eq!(seven.histogram[0].region, "h");
}

#[test]
fn university_scenario_through_dashboard() {
    let stores = vec![store(
        "Gangnam Univ Branch",
        "서울특별시 강남구 강남대로 1",
        "서울",
        Some("강남구"),
    )];
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("서울");
    assert_eq!(dashboard.filtered().len(), 1);
    let classification = dashboard
        .classification(&AnalysisSettings::default())
        .expect("non-empty subset is classified");
    assert_eq!(classification.category, Category::UniversityDistrict);
}

#[test]
fn district_selection_feeds_trending_rule() {
    let stores = vec![
        store("Plain", "서울 마포구 월드컵로 1", "서울", Some("마포구")),
        store("Plain", "서울 강서구 공항대로 1", "서울", Some("강서구")),
    ];
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("서울");
    assert_eq!(
        dashboard
            .classification(&AnalysisSettings::default())
            .map(|c| c.category),
        Some(Category::Residential)
    );
    dashboard.set_district("마포구").unwrap();
    assert_eq!(
        dashboard
            .classification(&AnalysisSettings::default())
            .map(|c| c.category),
        Some(Category::TrendingDistrict)
    );
}

#[test]
fn empty_subset_snapshot_has_no_classification() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.set_province("제주");
    let view = dashboard.snapshot(&AnalysisSettings::default());
    assert_eq!(view.filtered_count, 0);
    assert!(view.classification.is_none());
    assert!(view.histogram.is_empty());
    assert!(view.pins.is_empty());
}

#[test]
fn snapshot_serializes_selection_scope() {
    let stores = sample();
    let mut dashboard = Dashboard::new(&stores);
    dashboard.apply(Some("서울"), Some("강남구")).unwrap();
    let json = serde_json::to_value(dashboard.snapshot(&AnalysisSettings::default())).unwrap();
    assert_eq!(json["selection"]["scope"], "province");
    assert_eq!(json["selection"]["district"], "강남구");
    assert_eq!(json["viewport"]["zoom"], 13);
    assert_eq!(json["pins"].as_array().map(Vec::len), Some(2));
}
