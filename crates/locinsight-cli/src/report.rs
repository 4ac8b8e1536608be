//! Read-only commands over a local dataset file.

use std::fmt::Write as _;
use std::path::Path;

use locinsight_analysis::{
    district_list, is_all, AnalysisSettings, Dashboard, DashboardView, RegionCount,
};
use locinsight_core::{AppConfig, ProvinceCatalog, StoreRecord};

const BAR_WIDTH: usize = 40;

fn load_inputs(
    config: &AppConfig,
    dataset: Option<&Path>,
) -> anyhow::Result<(Vec<StoreRecord>, ProvinceCatalog)> {
    let dataset = dataset.unwrap_or(config.dataset_path.as_path());
    let stores = locinsight_core::load_dataset(dataset)?;
    let provinces = locinsight_core::load_provinces(&config.provinces_path)?;
    tracing::debug!(
        dataset = %dataset.display(),
        stores = stores.len(),
        "dataset loaded"
    );
    Ok((stores, provinces))
}

pub(crate) fn ensure_known_province(
    provinces: &ProvinceCatalog,
    province: Option<&str>,
) -> anyhow::Result<()> {
    match province {
        Some(name) if !is_all(name) && !provinces.contains(name.trim()) => {
            let name = name.trim();
            let known = provinces.names().collect::<Vec<_>>().join(", ");
            anyhow::bail!("unknown province '{name}'; expected one of: {known}")
        }
        _ => Ok(()),
    }
}

/// Print the dashboard for one region selection.
///
/// # Errors
///
/// Returns an error if the dataset or province catalog cannot be read, or
/// the selection is invalid.
pub(crate) fn run_report(
    config: &AppConfig,
    dataset: Option<&Path>,
    province: Option<&str>,
    district: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let (stores, provinces) = load_inputs(config, dataset)?;
    ensure_known_province(&provinces, province)?;

    let mut dashboard = Dashboard::new(&stores);
    dashboard.apply(province, district)?;
    let view = dashboard.snapshot(&AnalysisSettings::from_app_config(config));

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_report(&view));
    }
    Ok(())
}

/// List the districts of `province`, one per line.
///
/// # Errors
///
/// Returns an error if inputs cannot be read or `province` is not in the catalog.
pub(crate) fn run_districts(
    config: &AppConfig,
    dataset: Option<&Path>,
    province: &str,
) -> anyhow::Result<()> {
    let (stores, provinces) = load_inputs(config, dataset)?;
    if is_all(province) {
        anyhow::bail!("districts requires a concrete province");
    }
    ensure_known_province(&provinces, Some(province))?;

    for district in district_list(&stores, Some(province.trim())) {
        println!("{district}");
    }
    Ok(())
}

pub(crate) fn render_report(view: &DashboardView) -> String {
    let mut out = String::new();

    let scope = match (view.selection.province(), view.selection.district()) {
        (None, _) => "All provinces".to_string(),
        (Some(province), None) => province.to_string(),
        (Some(province), Some(district)) => format!("{province} {district}"),
    };
    let _ = writeln!(out, "Region: {scope}");
    let _ = writeln!(
        out,
        "Stores: {} of {} ({} without usable coordinates)",
        view.filtered_count, view.total_stores, view.skipped_pins
    );
    let _ = writeln!(
        out,
        "Map: {:.4}, {:.4} @ zoom {}",
        view.viewport.center.lat, view.viewport.center.lng, view.viewport.zoom
    );

    if !view.histogram.is_empty() {
        let _ = writeln!(out, "\nTop regions:");
        out.push_str(&render_histogram(&view.histogram));
    }

    match &view.classification {
        Some(c) => {
            let _ = writeln!(out, "\n{} [{}]", c.label, c.icon);
            let _ = writeln!(out, "  {}", c.narrative);
            let _ = writeln!(out, "  Strategy: {}", c.strategy);
        }
        None => {
            let _ = writeln!(out, "\nNo stores in this selection.");
        }
    }
    out
}

fn render_histogram(entries: &[RegionCount]) -> String {
    let max = entries.iter().map(|e| e.count).max().unwrap_or(0);
    let label_width = entries
        .iter()
        .map(|e| e.region.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in entries {
        let bar = if max == 0 {
            0
        } else {
            (entry.count * BAR_WIDTH / max).max(1)
        };
        let pad = label_width - entry.region.chars().count();
        let _ = writeln!(
            out,
            "  {}{} {:>5} {}",
            entry.region,
            " ".repeat(pad),
            entry.count,
            "#".repeat(bar)
        );
    }
    out
}
