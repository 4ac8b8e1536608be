use axum::{
    extract::{Query, State},
    Extension, Json,
};
use locinsight_analysis::{DashboardView, LoadState};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{select_region, ApiError, ApiResponse, AppState, RegionQuery, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct DashboardData {
    pub load_state: LoadState,
    #[serde(flatten)]
    pub view: DashboardView,
}

/// Every derived output for one region selection.
pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RegionQuery>,
) -> Result<Json<ApiResponse<DashboardData>>, ApiError> {
    let repository = state.repository.read().await;
    let dashboard = select_region(repository.stores(), &state.provinces, &query, &req_id.0)?;

    let data = DashboardData {
        load_state: repository.state(),
        view: dashboard.snapshot(&state.settings),
    };
    drop(repository);

    tracing::debug!(
        province = ?query.province,
        district = ?query.district,
        filtered = data.view.filtered_count,
        "dashboard computed"
    );

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
