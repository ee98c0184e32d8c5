use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::CityRecord;
use crate::label::render_label;
use crate::resolver::{Lang, MatchSource, ResolveError};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn parse_lang(raw: Option<&str>) -> Result<Lang, ApiError> {
    match raw {
        None => Ok(Lang::Ru),
        Some(s) => s
            .parse()
            .map_err(|e: String| api_error(StatusCode::BAD_REQUEST, e)),
    }
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub query: Option<String>,
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub code: String,
    pub source: MatchSource,
    pub label: String,
}

pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let query = params.query.as_deref().unwrap_or("").trim().to_string();
    if query.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'query' parameter"));
    }
    let lang = parse_lang(params.lang.as_deref())?;

    // The remote strategy does blocking I/O; run the cascade off the
    // scheduler so a slow remote call degrades one request, not the server.
    let engine = Arc::clone(&state.engine);
    let outcome = tokio::task::spawn_blocking(move || engine.resolve(&query))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match outcome {
        Ok(resolution) => {
            let label = render_label(&state.catalog, &resolution.code, lang);
            Ok(Json(ResolveResponse {
                code: resolution.code,
                source: resolution.source,
                label,
            }))
        }
        Err(e @ ResolveError::EmptyInput) => {
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e @ ResolveError::NotFound(_)) => {
            Err(api_error(StatusCode::NOT_FOUND, e.to_string()))
        }
    }
}

// ─── GET /api/label ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LabelQuery {
    pub code: Option<String>,
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct LabelResponse {
    pub code: String,
    pub label: String,
}

pub async fn label(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LabelQuery>,
) -> Result<Json<LabelResponse>, ApiError> {
    let code = params.code.as_deref().unwrap_or("").trim().to_uppercase();
    if code.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'code' parameter"));
    }
    let lang = parse_lang(params.lang.as_deref())?;

    let label = render_label(&state.catalog, &code, lang);
    Ok(Json(LabelResponse { code, label }))
}

// ─── GET /api/cities ─────────────────────────────────────────────

pub async fn cities(State(state): State<Arc<AppState>>) -> Json<Vec<CityRecord>> {
    Json(state.catalog.records().to_vec())
}
