//! Region predicates and the district drill-down list.

use std::collections::BTreeSet;

use locinsight_core::StoreRecord;

use crate::selection::Selection;

/// `None` means "all provinces".
#[must_use]
pub fn matches_province(store: &StoreRecord, province: Option<&str>) -> bool {
    province.is_none_or(|p| store.province == p)
}

/// `None` means "all districts".
#[must_use]
pub fn matches_district(store: &StoreRecord, district: Option<&str>) -> bool {
    district.is_none_or(|d| store.district() == Some(d))
}

/// Stores satisfying both region predicates, in dataset order.
#[must_use]
pub fn filter_stores<'a>(stores: &'a [StoreRecord], selection: &Selection) -> Vec<&'a StoreRecord> {
    let province = selection.province();
    let district = selection.district();
    stores
        .iter()
        .filter(|s| matches_province(s, province) && matches_district(s, district))
        .collect()
}

/// Distinct non-empty districts of `province`, sorted by code point.
///
/// Empty when no province is selected.
#[must_use]
pub fn district_list(stores: &[StoreRecord], province: Option<&str>) -> Vec<String> {
    let Some(province) = province else {
        return Vec::new();
    };

    stores
        .iter()
        .filter(|s| s.province == province)
        .filter_map(StoreRecord::district)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample, store};

    fn seoul_gangnam() -> Selection {
        Selection::Province {
            province: "서울".to_string(),
            district: Some("강남구".to_string()),
        }
    }

    #[test]
    fn nationwide_selection_keeps_everything() {
        let stores = sample();
        let filtered = filter_stores(&stores, &Selection::Nationwide);
        assert_eq!(filtered.len(), stores.len());
    }

    #[test]
    fn province_and_district_narrow_the_subset() {
        let stores = sample();
        let filtered = filter_stores(&stores, &seoul_gangnam());
        let names: Vec<&str> = filtered.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["강남R", "역삼아레나빌딩"]);
    }

    #[test]
    fn filtered_is_subset_and_predicates_commute() {
        let stores = sample();
        let selection = seoul_gangnam();
        let filtered = filter_stores(&stores, &selection);

        let province_first: Vec<&StoreRecord> = stores
            .iter()
            .filter(|s| matches_province(s, selection.province()))
            .filter(|s| matches_district(s, selection.district()))
            .collect();
        let district_first: Vec<&StoreRecord> = stores
            .iter()
            .filter(|s| matches_district(s, selection.district()))
            .filter(|s| matches_province(s, selection.province()))
            .collect();

        assert_eq!(filtered, province_first);
        assert_eq!(filtered, district_first);
        for f in &filtered {
            assert!(stores.iter().any(|s| std::ptr::eq(s, *f)));
        }
        for s in &stores {
            let expected = matches_province(s, selection.province())
                && matches_district(s, selection.district());
            assert_eq!(filtered.iter().any(|f| std::ptr::eq(*f, s)), expected);
        }
    }

    #[test]
    fn district_list_empty_for_all_provinces() {
        assert!(district_list(&sample(), None).is_empty());
    }

    #[test]
    fn district_list_is_sorted_and_deduplicated() {
        let districts = district_list(&sample(), Some("서울"));
        assert_eq!(districts, vec!["강남구", "마포구", "성동구"]);
    }

    #[test]
    fn district_list_skips_missing_districts() {
        let stores = vec![
            store("a", "", "세종", None),
            store("b", "", "세종", Some("")),
            store("c", "", "세종", Some("조치원읍")),
        ];
        assert_eq!(district_list(&stores, Some("세종")), vec!["조치원읍"]);
    }
}
