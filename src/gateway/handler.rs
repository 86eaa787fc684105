use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analysis::{Analysis, CompanyResult, UserContext};
use crate::cache::{CacheStatus, ESG_CACHE_STATUS_HEADER};
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::history::RecentSearch;

pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug, Deserialize)]
pub struct EsgQuery {
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// `CompanyResult` fields plus per-response metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgResponse<'a> {
    #[serde(flatten)]
    pub result: &'a CompanyResult,
    pub cache_status: CacheStatus,
    pub generated_at_display: String,
    pub low_confidence_items: usize,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub searches: Vec<RecentSearch>,
}

#[instrument(skip(state, headers, query))]
pub async fn esg_handler(
    State(state): State<HandlerState>,
    headers: HeaderMap,
    Query(query): Query<EsgQuery>,
) -> Result<Response, GatewayError> {
    let company = query
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| GatewayError::InvalidRequest("missing 'company' parameter".to_string()))?;

    let user = user_from_headers(&headers);
    let analysis = state.analyzer.analyze(company, user.as_ref()).await?;
    make_response(&analysis)
}

#[instrument(skip(state, headers, query))]
pub async fn history_handler(
    State(state): State<HandlerState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let limit = query
        .limit
        .unwrap_or(state.history_limit)
        .clamp(1, state.history_limit);

    let searches = match user_from_headers(&headers) {
        Some(user) => state.history().recent(&user.user_id, limit),
        None => {
            debug!("No user id header, returning empty history");
            Vec::new()
        }
    };

    (StatusCode::OK, Json(HistoryResponse { searches })).into_response()
}

pub(crate) fn make_response(analysis: &Analysis) -> Result<Response, GatewayError> {
    let result = analysis.result.as_ref();
    let body = EsgResponse {
        result,
        cache_status: analysis.cache_status,
        generated_at_display: result.generated_at_display(),
        low_confidence_items: result
            .items()
            .iter()
            .filter(|item| item.is_low_confidence())
            .count(),
    };

    let json = serde_json::to_vec(&body)
        .map_err(|e| GatewayError::InternalError(format!("serialization failed: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        ESG_CACHE_STATUS_HEADER,
        HeaderValue::from_static(analysis.cache_status.as_header_value()),
    );
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Ok((StatusCode::OK, headers, json).into_response())
}

pub(crate) fn user_from_headers(headers: &HeaderMap) -> Option<UserContext> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(UserContext::new)
}
