mod dashboard;
mod regions;
mod stores;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use locinsight_analysis::{is_all, AnalysisSettings, Dashboard, LoadState, StoreRepository};
use locinsight_core::ProvinceCatalog;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<RwLock<StoreRepository>>,
    pub provinces: Arc<ProvinceCatalog>,
    pub settings: AnalysisSettings,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// `?province=&district=` as sent by the region selectors.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RegionQuery {
    pub province: Option<String>,
    pub district: Option<String>,
}

/// Builds a dashboard over `stores` for the requested region.
///
/// An unknown province, a district without a province, and a district the
/// province has no store in are all `validation_error`s.
pub(super) fn select_region<'a>(
    stores: &'a [locinsight_core::StoreRecord],
    provinces: &ProvinceCatalog,
    query: &RegionQuery,
    request_id: &str,
) -> Result<Dashboard<'a>, ApiError> {
    if let Some(province) = query.province.as_deref() {
        if !is_all(province) && !provinces.contains(province.trim()) {
            return Err(ApiError::new(
                request_id,
                "validation_error",
                format!("unknown province '{}'", province.trim()),
            ));
        }
    }

    let mut dashboard = Dashboard::new(stores);
    dashboard
        .apply(query.province.as_deref(), query.district.as_deref())
        .map_err(|e| ApiError::new(request_id, "validation_error", e.to_string()))?;
    Ok(dashboard)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn api_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/provinces", get(regions::list_provinces))
        .route(
            "/api/v1/provinces/{name}/districts",
            get(regions::list_districts),
        )
        .route("/api/v1/stores", get(stores::list_store_pins))
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(api_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(
                        |request: &axum::http::Request<_>| {
                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                path = %request.uri().path(),
                            )
                        },
                    ),
                )
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Repository load status. `503` once the dataset load has failed.
async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let status = state.repository.read().await.status();
    let code = if status.state == LoadState::Failed {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        code,
        Json(ApiResponse {
            data: status,
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
