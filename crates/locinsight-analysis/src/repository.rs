//! Single source of truth for the full store list.

use std::path::Path;

use locinsight_core::{parse_dataset, DatasetError, StoreRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// What the presentation layer needs to tell "loading", "empty", and
/// "failed" apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadStatus {
    pub state: LoadState,
    pub store_count: usize,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
enum Inner {
    #[default]
    Loading,
    Ready(Vec<StoreRecord>),
    Failed(String),
}

/// Holds the dataset once it has been fetched. Loaded at most once.
#[derive(Debug, Default)]
pub struct StoreRepository {
    inner: Inner,
}

impl StoreRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository that is already loaded with `stores`.
    #[must_use]
    pub fn from_stores(stores: Vec<StoreRecord>) -> Self {
        Self {
            inner: Inner::Ready(stores),
        }
    }

    /// Read the dataset without touching any repository state.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] on I/O or parse failure.
    pub async fn fetch(path: &Path) -> Result<Vec<StoreRecord>, DatasetError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DatasetError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
        parse_dataset(&content)
    }

    /// Fetch and install the dataset. Failures are absorbed into the
    /// `Failed` state.
    pub async fn load_all(&mut self, path: &Path) {
        let result = Self::fetch(path).await;
        self.complete_load(result);
    }

    /// Record the outcome of the one dataset load.
    ///
    /// Returns `false` (and changes nothing) if a load already completed.
    pub fn complete_load(&mut self, result: Result<Vec<StoreRecord>, DatasetError>) -> bool {
        if !matches!(self.inner, Inner::Loading) {
            tracing::warn!("dataset already loaded; ignoring second load result");
            return false;
        }

        self.inner = match result {
            Ok(stores) => {
                tracing::info!(store_count = stores.len(), "store dataset loaded");
                Inner::Ready(stores)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "store dataset failed to load; continuing with no stores"
                );
                Inner::Failed(e.to_string())
            }
        };
        true
    }

    /// All stores; empty while loading or after a failed load.
    #[must_use]
    pub fn stores(&self) -> &[StoreRecord] {
        match &self.inner {
            Inner::Ready(stores) => stores,
            Inner::Loading | Inner::Failed(_) => &[],
        }
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        match self.inner {
            Inner::Loading => LoadState::Loading,
            Inner::Ready(_) => LoadState::Ready,
            Inner::Failed(_) => LoadState::Failed,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state() == LoadState::Loading
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        LoadStatus {
            state: self.state(),
            store_count: self.stores().len(),
            error: match &self.inner {
                Inner::Failed(reason) => Some(reason.clone()),
                Inner::Loading | Inner::Ready(_) => None,
            },
        }
    }
}
