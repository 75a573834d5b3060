//! Property file handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::FileNo;
use domain_registry::{PropertyFile, Statement};

use crate::dto::files::{EnrollFileRequest, FileListResponse, SearchQuery};
use crate::{error::ApiError, AppState};

/// Lists files matching `?q=`
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<FileListResponse> {
    let portal = state.portal.read().await;
    let files = portal.summaries(query.q.as_deref().unwrap_or_default());

    Json(FileListResponse {
        count: files.len(),
        files,
    })
}

/// Enrolls a new file
pub async fn enroll_file(
    State(state): State<AppState>,
    Json(request): Json<EnrollFileRequest>,
) -> Result<(StatusCode, Json<PropertyFile>), ApiError> {
    request.validate()?;

    let mut portal = state.portal.write().await;
    let file = portal.enroll(request.into())?;

    Ok((StatusCode::CREATED, Json(file.clone())))
}

/// Gets a file with its full ledger
pub async fn get_file(
    State(state): State<AppState>,
    Path(file_no): Path<String>,
) -> Result<Json<PropertyFile>, ApiError> {
    let portal = state.portal.read().await;
    let file = portal.get(&FileNo::new(file_no))?;
    Ok(Json(file.clone()))
}

/// Statement preview of a file
pub async fn preview_statement(
    State(state): State<AppState>,
    Path(file_no): Path<String>,
) -> Result<Json<Statement>, ApiError> {
    let portal = state.portal.read().await;
    let statement = portal.preview_statement(&FileNo::new(file_no))?;
    Ok(Json(statement))
}
