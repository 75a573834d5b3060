//! Registry export handler

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{error::ApiError, AppState};

/// Downloads the registry as CSV
///
/// Responds `204 No Content` when the registry is empty.
pub async fn export_registry(State(state): State<AppState>) -> Result<Response, ApiError> {
    let portal = state.portal.read().await;
    let today = portal.today();

    let Some(document) = portal.export(today)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.file_name),
        ),
    ];

    Ok((headers, document.content).into_response())
}
