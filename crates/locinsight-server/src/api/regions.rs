use axum::{
    extract::{Path, State},
    Extension, Json,
};
use locinsight_analysis::district_list;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ProvinceItem {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DistrictsData {
    pub province: String,
    pub districts: Vec<String>,
}

/// Catalog provinces in selector order.
pub(super) async fn list_provinces(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ProvinceItem>>> {
    let data = state
        .provinces
        .provinces()
        .iter()
        .map(|p| ProvinceItem {
            name: p.name.clone(),
            code: p.code.clone(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn list_districts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<DistrictsData>>, ApiError> {
    let Some(province) = state.provinces.get(name.trim()) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("province '{name}' not found"),
        ));
    };

    let districts = {
        let repository = state.repository.read().await;
        district_list(repository.stores(), Some(province.name.as_str()))
    };

    Ok(Json(ApiResponse {
        data: DistrictsData {
            province: province.name.clone(),
            districts,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
