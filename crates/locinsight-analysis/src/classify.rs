//! Keyword-driven location classification.
//!
//! Four independent signal counters are tallied over the filtered stores,
//! then an ordered rule table picks the first category whose condition holds.
//! Rule order is priority: a subset that is both university-heavy and
//! office-heavy is a university district.

use locinsight_core::{ClassifierThresholds, StoreRecord};
use serde::Serialize;

const UNIVERSITY_NAME_KEYWORDS: &[&str] = &["univ", "대학", "학교"];
const OFFICE_NAME_KEYWORDS: &[&str] = &["타워", "파이낸스", "삼성", "역"];
const OFFICE_ADDRESS_KEYWORDS: &[&str] = &["테헤란"];
const TRENDY_ADDRESS_KEYWORDS: &[&str] = &["성수", "가로수", "연남", "이태원"];
const DRIVE_THROUGH_NAME_KEYWORDS: &[&str] = &["dt"];

/// Districts classified as trending regardless of store signals.
const TRENDY_DISTRICTS: &[&str] = &["성동구", "마포구"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UniversityDistrict,
    OfficeDistrict,
    TrendingDistrict,
    DriveThroughHub,
    Residential,
}

impl Category {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::UniversityDistrict => "University district",
            Category::OfficeDistrict => "Office / business district",
            Category::TrendingDistrict => "Trending district",
            Category::DriveThroughHub => "Transit hub (drive-through)",
            Category::Residential => "Residential / lifestyle district",
        }
    }

    #[must_use]
    pub const fn narrative(self) -> &'static str {
        match self {
            Category::UniversityDistrict => "Many customers stay for long study sessions.",
            Category::OfficeDistrict => "Office-worker foot traffic peaks sharply during the day.",
            Category::TrendingDistrict => {
                "Trend-sensitive visitors in their twenties and thirties make up much of the traffic."
            }
            Category::DriveThroughHub => {
                "Heavy vehicle traffic drives strong drive-through demand."
            }
            Category::Residential => "Steady demand is expected from local residents.",
        }
    }

    #[must_use]
    pub const fn strategy(self) -> &'static str {
        match self {
            Category::UniversityDistrict => {
                "Secure single seats and power outlets; strengthen the study zone."
            }
            Category::OfficeDistrict => {
                "Optimize for fast turnover, expand the mobile-order pickup zone, add meeting rooms."
            }
            Category::TrendingDistrict => {
                "Photogenic interior design and location-exclusive merchandise."
            }
            Category::DriveThroughHub => {
                "Optimize vehicle flow and secure queueing space for cars."
            }
            Category::Residential => "Comfortable seating built around community space.",
        }
    }

    /// Icon identifier for the presentation layer.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Category::UniversityDistrict => "book-open",
            Category::OfficeDistrict => "building-2",
            Category::TrendingDistrict => "warehouse",
            Category::DriveThroughHub => "car",
            Category::Residential => "coffee",
        }
    }
}

/// Per-signal store counts over a filtered subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalCounts {
    pub total: usize,
    pub university: usize,
    pub office: usize,
    pub trendy: usize,
    pub drive_through: usize,
}

impl SignalCounts {
    /// `count / total`, or `0.0` for an empty subset.
    // Store counts are far below f64's exact-integer range.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn share(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Tally the four signals with case-insensitive substring tests.
pub fn count_signals<'a, I>(stores: I) -> SignalCounts
where
    I: IntoIterator<Item = &'a StoreRecord>,
{
    let mut counts = SignalCounts::default();
    for store in stores {
        let name = store.name.to_lowercase();
        let address = store.address.to_lowercase();

        counts.total += 1;
        if contains_any(&name, UNIVERSITY_NAME_KEYWORDS) {
            counts.university += 1;
        }
        if contains_any(&name, OFFICE_NAME_KEYWORDS)
            || contains_any(&address, OFFICE_ADDRESS_KEYWORDS)
        {
            counts.office += 1;
        }
        if contains_any(&address, TRENDY_ADDRESS_KEYWORDS) {
            counts.trendy += 1;
        }
        if contains_any(&name, DRIVE_THROUGH_NAME_KEYWORDS) {
            counts.drive_through += 1;
        }
    }
    counts
}

struct RuleInput<'a> {
    signals: &'a SignalCounts,
    thresholds: &'a ClassifierThresholds,
    district: Option<&'a str>,
}

struct Rule {
    category: Category,
    applies: fn(&RuleInput<'_>) -> bool,
}

/// Evaluated top to bottom; the first rule that applies wins.
const RULES: &[Rule] = &[
    Rule {
        category: Category::UniversityDistrict,
        applies: |i| i.signals.share(i.signals.university) > i.thresholds.university_share,
    },
    Rule {
        category: Category::OfficeDistrict,
        applies: |i| i.signals.share(i.signals.office) > i.thresholds.office_share,
    },
    Rule {
        category: Category::TrendingDistrict,
        applies: |i| {
            i.signals.trendy > 0 || i.district.is_some_and(|d| TRENDY_DISTRICTS.contains(&d))
        },
    },
    Rule {
        category: Category::DriveThroughHub,
        applies: |i| i.signals.share(i.signals.drive_through) > i.thresholds.drive_through_share,
    },
];

const FALLBACK: Category = Category::Residential;

/// Categories in rule priority order, ending with the fallback.
#[must_use]
pub fn rule_order() -> Vec<Category> {
    RULES
        .iter()
        .map(|r| r.category)
        .chain(std::iter::once(FALLBACK))
        .collect()
}

/// Pick the category for already-counted signals.
#[must_use]
pub fn evaluate(
    signals: &SignalCounts,
    district: Option<&str>,
    thresholds: &ClassifierThresholds,
) -> Category {
    let input = RuleInput {
        signals,
        thresholds,
        district,
    };
    RULES
        .iter()
        .find(|rule| (rule.applies)(&input))
        .map_or(FALLBACK, |rule| rule.category)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub label: &'static str,
    pub narrative: &'static str,
    pub strategy: &'static str,
    pub icon: &'static str,
    pub store_count: usize,
    pub signals: SignalCounts,
}

/// Classify the filtered subset; `None` when it is empty.
#[must_use]
pub fn classify(
    filtered: &[&StoreRecord],
    district: Option<&str>,
    thresholds: &ClassifierThresholds,
) -> Option<Classification> {
    if filtered.is_empty() {
        return None;
    }

    let signals = count_signals(filtered.iter().copied());
    let category = evaluate(&signals, district, thresholds);
    tracing::debug!(?category, total = signals.total, "classified filtered stores");

    Some(Classification {
        category,
        label: category.label(),
        narrative: category.narrative(),
        strategy: category.strategy(),
        icon: category.icon(),
        store_count: signals.total,
        signals,
    })
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
