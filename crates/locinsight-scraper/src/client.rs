use std::time::Duration;

use futures::stream::{self, StreamExt};
use locinsight_core::{ProvinceCatalog, ProvinceConfig, StoreRecord};
use reqwest::Client;

use crate::error::ScraperError;
use crate::normalize::normalize_store;
use crate::types::{UpstreamStore, UpstreamStoreResponse};

const STORE_PATH: &str = "/store/getStore.do";

type ProvinceFetch<'a> = (usize, &'a ProvinceConfig, Result<Vec<UpstreamStore>, ScraperError>);

/// Fixed form fields the locator expects alongside the province code.
const FORM_DEFAULTS: &[(&str, &str)] = &[
    ("in_biz_cds", "0"),
    ("in_scodes", "0"),
    ("ins_lat", "37.5665"),
    ("ins_lng", "126.9780"),
    ("search_text", ""),
    ("p_gugun_cd", ""),
    ("isError", "true"),
    ("in_distance", "0"),
    ("in_biz_cd", ""),
    ("new_bool", "0"),
    ("whcroad_yn", "0"),
    ("sexn_use_yn", "0"),
    ("biz_cat_cd", ""),
    ("biz_cat_chk", ""),
    ("p_grad_cd", "0"),
    ("s_code", ""),
    ("s_sido_cd", ""),
    ("s_gugun_cd", ""),
];

/// Result of a multi-province collection run.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// Normalized records in catalog order.
    pub stores: Vec<StoreRecord>,
    /// Names of provinces whose request failed.
    pub failed_provinces: Vec<String>,
    /// Entries dropped for missing coordinates.
    pub dropped: usize,
}

/// HTTP client for the chain's public store locator.
///
/// One form POST per province, no pagination and no retry. Non-2xx
/// responses surface as [`ScraperError::UnexpectedStatus`].
pub struct StoreLocatorClient {
    client: Client,
    base_url: String,
}

impl StoreLocatorClient {
    /// Creates a client against `base_url` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL, or [`ScraperError::Http`] if the `reqwest::Client` cannot
    /// be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub(crate) fn store_url(&self) -> String {
        format!("{}{STORE_PATH}", self.base_url)
    }

    pub(crate) fn form_for(province_code: &str) -> Vec<(&str, &str)> {
        let mut form = Vec::with_capacity(FORM_DEFAULTS.len() + 1);
        form.push(("p_sido_cd", province_code));
        form.extend_from_slice(FORM_DEFAULTS);
        form
    }

    /// Fetches the raw store list for one province code.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] for network or TLS failures.
    /// - [`ScraperError::Deserialize`] when the body is not the expected JSON.
    pub async fn fetch_province(
        &self,
        province_code: &str,
    ) -> Result<Vec<UpstreamStore>, ScraperError> {
        let url = self.store_url();
        let response = self
            .client
            .post(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&Self::form_for(province_code))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<UpstreamStoreResponse>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("store list for province code {province_code}"),
                source: e,
            }
        })?;

        Ok(parsed.into_stores())
    }

    /// Collects every province in the catalog. See [`Self::collect`].
    pub async fn collect_all(
        &self,
        catalog: &ProvinceCatalog,
        max_concurrent: usize,
    ) -> CollectOutcome {
        let provinces: Vec<&ProvinceConfig> = catalog.provinces().iter().collect();
        self.collect(&provinces, catalog, max_concurrent).await
    }

    /// Fetches `provinces` with at most `max_concurrent` requests in flight
    /// and normalizes the results against `catalog`.
    ///
    /// A failing province is logged and recorded in
    /// [`CollectOutcome::failed_provinces`]; the run continues.
    pub async fn collect(
        &self,
        provinces: &[&ProvinceConfig],
        catalog: &ProvinceCatalog,
        max_concurrent: usize,
    ) -> CollectOutcome {
        let requests = provinces.iter().copied().enumerate();
        let mut results: Vec<ProvinceFetch<'_>> = stream::iter(requests)
            .map(|(idx, province)| async move {
                (idx, province, self.fetch_province(&province.code).await)
            })
            .buffer_unordered(max_concurrent.max(1))
            .collect()
            .await;
        results.sort_by_key(|(idx, _, _)| *idx);

        let mut outcome = CollectOutcome::default();
        for (_, province, result) in results {
            match result {
                Ok(raw) => {
                    let fetched = raw.len();
                    let mut kept = 0;
                    for entry in raw {
                        if let Some(record) = normalize_store(entry, catalog) {
                            outcome.stores.push(record);
                            kept += 1;
                        }
                    }
                    outcome.dropped += fetched - kept;
                    tracing::info!(
                        province = %province.name,
                        code = %province.code,
                        fetched,
                        kept,
                        "collected province"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        province = %province.name,
                        code = %province.code,
                        error = %e,
                        "province collection failed; skipping"
                    );
                    outcome.failed_provinces.push(province.name.clone());
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
