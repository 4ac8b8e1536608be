//! Dataset collection from the public store locator.

use std::path::Path;

use locinsight_core::{AppConfig, ProvinceConfig};
use locinsight_scraper::StoreLocatorClient;

use crate::report::ensure_known_province;

/// Fetch stores from the locator and write them as the dataset resource.
///
/// Per-province failures are logged and skipped; the command fails only
/// when every requested province failed.
///
/// # Errors
///
/// Returns an error if the province catalog cannot be read, the province
/// filter is unknown, the client cannot be built, every province fails, or
/// the output cannot be written.
pub(crate) async fn run_collect(
    config: &AppConfig,
    output: &Path,
    province: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let catalog = locinsight_core::load_provinces(&config.provinces_path)?;
    ensure_known_province(&catalog, province)?;

    let selected: Vec<&ProvinceConfig> = match province.map(str::trim) {
        Some(name) => catalog.get(name).into_iter().collect(),
        None => catalog.provinces().iter().collect(),
    };

    if dry_run {
        println!(
            "dry-run: would collect {} province(s) from {}:",
            selected.len(),
            config.scraper_base_url
        );
        for p in &selected {
            println!("  {} ({})", p.name, p.code);
        }
        return Ok(());
    }

    let client = StoreLocatorClient::new(
        &config.scraper_base_url,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build store locator client: {e}"))?;

    println!("Collecting stores for {} province(s)...", selected.len());
    let outcome = client
        .collect(&selected, &catalog, config.scraper_max_concurrent_provinces)
        .await;

    if !selected.is_empty() && outcome.failed_provinces.len() == selected.len() {
        anyhow::bail!("all {} province(s) failed collection", selected.len());
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(&outcome.stores)?;
    std::fs::write(output, body)?;

    for name in &outcome.failed_provinces {
        println!("  \u{2717} {name}");
    }
    println!(
        "Wrote {} stores to {} ({} dropped without coordinates, {} province(s) failed)",
        outcome.stores.len(),
        output.display(),
        outcome.dropped,
        outcome.failed_provinces.len()
    );
    tracing::info!(
        stores = outcome.stores.len(),
        output = %output.display(),
        "collection complete"
    );
    Ok(())
}
