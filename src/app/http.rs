//! HTTP surface: `POST /api/hd-type` plus the CORS/preflight middleware.

use crate::config::toml_config::CorsConfig;
use crate::core::engine::HdTypeEngine;
use crate::domain::model::{BirthRequest, HdTypeResponse};
use crate::utils::error::{HdError, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

pub const HD_TYPE_PATH: &str = "/api/hd-type";

#[derive(Clone)]
pub struct AppState {
    pub engine: HdTypeEngine,
}

/// 錯誤回應 `{ "error": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.into(),
            },
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: "Internal server error".to_string(),
            },
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<HdError> for ApiErrorResponse {
    fn from(error: HdError) -> Self {
        if error.is_client_error() {
            tracing::debug!("Rejected request: {}", error);
            return Self::bad_request(error.to_string());
        }

        // 外部服務的錯誤不回傳細節給客戶端
        tracing::error!(
            "❌ Request failed: {} (Category: {:?})",
            error,
            error.category()
        );
        tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());
        Self::internal_error()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::bad_request("Invalid request body")
    }
}

pub async fn hd_type(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BirthRequest>, JsonRejection>,
) -> std::result::Result<Json<HdTypeResponse>, ApiErrorResponse> {
    let Json(request) = payload?;
    let hd_type = state.engine.run(&request).await?;
    Ok(Json(HdTypeResponse { hd_type }))
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[derive(Clone)]
struct CorsPolicy {
    allow_origin: HeaderValue,
}

/// 所有回應都帶 CORS 標頭；OPTIONS 一律 204 不進路由
async fn cors_preflight(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        policy.allow_origin.clone(),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

pub fn router(engine: HdTypeEngine, cors: &CorsConfig) -> Result<Router> {
    let allow_origin = HeaderValue::from_str(cors.allow_origin.trim()).map_err(|e| {
        HdError::InvalidConfigValueError {
            field: "cors.allow_origin".to_string(),
            value: cors.allow_origin.clone(),
            reason: format!("Not a valid header value: {}", e),
        }
    })?;

    let router = Router::new()
        .route(HD_TYPE_PATH, post(hd_type))
        .fallback(not_found)
        .with_state(AppState { engine })
        .layer(middleware::from_fn_with_state(
            CorsPolicy { allow_origin },
            cors_preflight,
        ))
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
