use axum::{
    extract::{Query, State},
    Extension, Json,
};
use locinsight_analysis::{map_pins, LoadState, MapPin};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{select_region, ApiError, ApiResponse, AppState, RegionQuery, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct StorePinsData {
    pub load_state: LoadState,
    pub filtered_count: usize,
    pub skipped_pins: usize,
    pub pins: Vec<MapPin>,
}

/// Map pins for the filtered subset.
pub(super) async fn list_store_pins(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RegionQuery>,
) -> Result<Json<ApiResponse<StorePinsData>>, ApiError> {
    let repository = state.repository.read().await;
    let dashboard = select_region(repository.stores(), &state.provinces, &query, &req_id.0)?;

    let filtered = dashboard.filtered();
    let (pins, skipped_pins) = map_pins(&filtered);
    if skipped_pins > 0 {
        tracing::warn!(
            skipped_pins,
            "excluded stores with malformed coordinates from map"
        );
    }

    let data = StorePinsData {
        load_state: repository.state(),
        filtered_count: filtered.len(),
        skipped_pins,
        pins,
    };
    drop(repository);

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
