use std::path::Path;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::{header, StatusCode},
    web::{Data, Json, Query},
    Error, HttpRequest, HttpResponse,
};

use crate::config::{AppState, SERVICE_NAME};
use crate::error::{json_error_with_code, LeaderboardError};
use crate::leaderboard::{now_rfc3339, sanitize, total_pages, PageRequest, SUBMIT_SUCCESS_MESSAGE};
use crate::types::{
    HealthResponse, LeaderboardPage, LeaderboardQuery, SubmitScoreRequest, SubmitScoreResponse,
};

pub(crate) async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        timestamp: now_rfc3339(),
    })
}

pub(crate) async fn list_scores(
    state: Data<AppState>,
    query: Query<LeaderboardQuery>,
) -> Result<HttpResponse, LeaderboardError> {
    let request = PageRequest::from_query(&query, state.pages);
    let total_scores = state.store.count()?;
    let scores = state.store.page(request.offset(), request.limit)?;

    Ok(HttpResponse::Ok().json(LeaderboardPage {
        scores,
        current_page: request.page,
        total_pages: total_pages(total_scores, request.limit),
        total_scores,
    }))
}

pub(crate) async fn submit_score(
    state: Data<AppState>,
    body: Json<SubmitScoreRequest>,
) -> Result<HttpResponse, LeaderboardError> {
    let entry = sanitize(&body)?.into_new_entry();
    let rank = state.store.submit(&entry)?;

    tracing::info!(
        id = %entry.id,
        score = entry.score,
        rank,
        "score submitted"
    );

    Ok(HttpResponse::Created().json(SubmitScoreResponse {
        message: SUBMIT_SUCCESS_MESSAGE,
        score: entry,
        rank,
    }))
}

pub(crate) async fn download_resume(state: Data<AppState>) -> Result<HttpResponse, LeaderboardError> {
    let resume = &state.resume;
    let bytes = tokio::fs::read(&resume.path).await.map_err(|e| {
        tracing::warn!(path = %resume.path.display(), "resume download failed: {e}");
        LeaderboardError::not_found("Resume not found", "resume_not_found")
    })?;

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&resume.path))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", resume.download_name),
        ))
        .body(bytes))
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let (status, code) = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large")
        }
        JsonPayloadError::ContentType => (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_content_type"),
        _ => (StatusCode::BAD_REQUEST, "invalid_json"),
    };
    let response = json_error_with_code(status, &format!("invalid request body: {err}"), Some(code));
    actix_web::error::InternalError::from_response(err, response).into()
}

pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let response = json_error_with_code(
        StatusCode::BAD_REQUEST,
        &format!("invalid query string: {err}"),
        Some("invalid_query"),
    );
    actix_web::error::InternalError::from_response(err, response).into()
}
