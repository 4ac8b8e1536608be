//! Selection and viewport state with the province→district reset invariant.

use locinsight_core::StoreRecord;
use serde::Serialize;
use thiserror::Error;

use crate::classify::{classify, Classification};
use crate::filter::{district_list, filter_stores};
use crate::histogram::{region_histogram, RegionHistogram};
use crate::view::{map_pins, ChartSeries, DashboardView};
use crate::viewport::{first_match, Viewport, DISTRICT_ZOOM, PROVINCE_ZOOM};
use crate::AnalysisSettings;

/// Text value meaning "no restriction" at either region level.
pub const ALL_SENTINEL: &str = "All";

/// Whether `value` is the "all" sentinel (case-insensitive) or blank.
#[must_use]
pub fn is_all(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL)
}

/// Current region selection. A district can only exist under a province.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Nationwide,
    Province {
        province: String,
        district: Option<String>,
    },
}

impl Selection {
    #[must_use]
    pub fn province(&self) -> Option<&str> {
        match self {
            Selection::Nationwide => None,
            Selection::Province { province, .. } => Some(province),
        }
    }

    #[must_use]
    pub fn district(&self) -> Option<&str> {
        match self {
            Selection::Nationwide => None,
            Selection::Province { district, .. } => district.as_deref(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("district '{district}' requires a province to be selected")]
    DistrictWithoutProvince { district: String },

    #[error("district '{district}' has no stores in province '{province}'")]
    UnknownDistrict { province: String, district: String },
}

/// View state over a borrowed store list: selection plus derived viewport.
///
/// Every derived output is recomputed from `(stores, selection)` on access.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    stores: &'a [StoreRecord],
    selection: Selection,
    viewport: Viewport,
}

impl<'a> Dashboard<'a> {
    #[must_use]
    pub fn new(stores: &'a [StoreRecord]) -> Self {
        Self {
            stores,
            selection: Selection::Nationwide,
            viewport: Viewport::nationwide(),
        }
    }

    #[must_use]
    pub fn stores(&self) -> &'a [StoreRecord] {
        self.stores
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Select a province (or "all"), always clearing the district.
    ///
    /// "All" resets the viewport to the nationwide view. A concrete province
    /// jumps to the first store of that province at province zoom.
    pub fn set_province(&mut self, name: &str) {
        if is_all(name) {
            self.selection = Selection::Nationwide;
            self.viewport = Viewport::nationwide();
            return;
        }

        let name = name.trim();
        self.selection = Selection::Province {
            province: name.to_string(),
            district: None,
        };
        if let Some(viewport) = first_match(self.stores, |s| s.province == name, PROVINCE_ZOOM) {
            self.viewport = viewport;
        }
        tracing::debug!(
            province = name,
            zoom = self.viewport.zoom,
            "province selected"
        );
    }

    /// Select a district within the current province (or "all").
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::DistrictWithoutProvince`] when no province is
    /// selected, and [`SelectionError::UnknownDistrict`] when the province has
    /// no store in that district.
    pub fn set_district(&mut self, name: &str) -> Result<(), SelectionError> {
        let Selection::Province { province, district } = &mut self.selection else {
            if is_all(name) {
                return Ok(());
            }
            return Err(SelectionError::DistrictWithoutProvince {
                district: name.trim().to_string(),
            });
        };

        if is_all(name) {
            *district = None;
            return Ok(());
        }

        let name = name.trim();
        if !district_list(self.stores, Some(province.as_str()))
            .iter()
            .any(|d| d == name)
        {
            return Err(SelectionError::UnknownDistrict {
                province: province.clone(),
                district: name.to_string(),
            });
        }

        *district = Some(name.to_string());
        let province = province.as_str();
        if let Some(viewport) = first_match(
            self.stores,
            |s| s.province == province && s.district() == Some(name),
            DISTRICT_ZOOM,
        ) {
            self.viewport = viewport;
        }
        tracing::debug!(
            district = name,
            zoom = self.viewport.zoom,
            "district selected"
        );
        Ok(())
    }

    /// Apply a province then a district, as a user would in the selectors.
    ///
    /// # Errors
    ///
    /// Propagates [`Dashboard::set_district`] failures.
    pub fn apply(
        &mut self,
        province: Option<&str>,
        district: Option<&str>,
    ) -> Result<(), SelectionError> {
        self.set_province(province.unwrap_or(ALL_SENTINEL));
        match district {
            Some(district) => self.set_district(district),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<&'a StoreRecord> {
        filter_stores(self.stores, &self.selection)
    }

    #[must_use]
    pub fn districts(&self) -> Vec<String> {
        district_list(self.stores, self.selection.province())
    }

    /// Untruncated histogram of the filtered subset.
    #[must_use]
    pub fn histogram(&self) -> RegionHistogram {
        region_histogram(&self.filtered(), &self.selection)
    }

    #[must_use]
    pub fn classification(&self, settings: &AnalysisSettings) -> Option<Classification> {
        classify(
            &self.filtered(),
            self.selection.district(),
            &settings.thresholds,
        )
    }

    /// Every derived output bundled for the presentation layer.
    #[must_use]
    pub fn snapshot(&self, settings: &AnalysisSettings) -> DashboardView {
        let filtered = self.filtered();
        let histogram = region_histogram(&filtered, &self.selection).top(settings.histogram_top_n);
        let classification = classify(&filtered, self.selection.district(), &settings.thresholds);
        let (pins, skipped_pins) = map_pins(&filtered);
        if skipped_pins > 0 {
            tracing::warn!(
                skipped_pins,
                "excluded stores with malformed coordinates from map"
            );
        }

        DashboardView {
            selection: self.selection.clone(),
            viewport: self.viewport,
            total_stores: self.stores.len(),
            filtered_count: filtered.len(),
            districts: self.districts(),
            district_selector_enabled: self.selection.province().is_some(),
            chart: ChartSeries::from(&histogram),
            histogram: histogram.into_entries(),
            classification,
            pins,
            skipped_pins,
        }
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
