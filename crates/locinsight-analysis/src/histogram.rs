//! Store counts per region for the distribution chart.

use std::collections::HashMap;

use locinsight_core::StoreRecord;
use serde::Serialize;

use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

/// Region counts sorted by descending count.
///
/// Ties keep the order in which the counting pass first met each region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegionHistogram {
    entries: Vec<RegionCount>,
}

impl RegionHistogram {
    #[must_use]
    pub fn entries(&self) -> &[RegionCount] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<RegionCount> {
        self.entries
    }

    /// Keep only the `n` largest regions.
    #[must_use]
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Count `filtered` by province when nationwide, otherwise by district.
///
/// Stores without a region name at the counted level are skipped.
#[must_use]
pub fn region_histogram(filtered: &[&StoreRecord], selection: &Selection) -> RegionHistogram {
    let by_district = selection.province().is_some();
    let mut entries: Vec<RegionCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for store in filtered {
        let key = if by_district {
            store.district()
        } else {
            Some(store.province.as_str()).filter(|p| !p.trim().is_empty())
        };
        let Some(key) = key else {
            continue;
        };

        match positions.get(key) {
            Some(&idx) => entries[idx].count += 1,
            None => {
                positions.insert(key, entries.len());
                entries.push(RegionCount {
                    region: key.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    RegionHistogram { entries }
}
