//! Ledger editing handlers
//!
//! One ledger is open at a time across all clients.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::FileNo;
use domain_registry::{RegistryError, TransactionField};

use crate::dto::ledger::{
    BeginEditResponse, CommitResponse, EntryResponse, LedgerResponse, UpdateEntryRequest,
};
use crate::{error::ApiError, AppState};

/// Opens a file's ledger for editing
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(file_no): Path<String>,
) -> Result<Json<BeginEditResponse>, ApiError> {
    let mut portal = state.portal.write().await;
    let displaced = portal.begin_edit(&FileNo::new(file_no))?;

    let session = portal
        .session()
        .ok_or_else(|| ApiError::Internal("ledger session did not open".to_string()))?;

    Ok(Json(BeginEditResponse {
        ledger: LedgerResponse::from(session),
        discarded: displaced.map(|s| s.file_no().clone()),
    }))
}

/// The open working copy
pub async fn get_ledger(State(state): State<AppState>) -> Result<Json<LedgerResponse>, ApiError> {
    let portal = state.portal.read().await;
    let session = portal
        .session()
        .ok_or(RegistryError::NoActiveSession)?;
    Ok(Json(LedgerResponse::from(session)))
}

/// Appends an installment line
pub async fn add_entry(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<EntryResponse>), ApiError> {
    let mut portal = state.portal.write().await;
    let entry = portal.add_entry()?.clone();

    let session = portal
        .session()
        .ok_or(RegistryError::NoActiveSession)?;

    Ok((
        StatusCode::CREATED,
        Json(EntryResponse {
            index: session.entries().len() - 1,
            entry,
            totals: session.totals(),
        }),
    ))
}

/// Sets one field of a working entry
pub async fn update_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(request): Json<UpdateEntryRequest>,
) -> Result<Json<EntryResponse>, ApiError> {
    let field: TransactionField = request.field.parse()?;

    let mut portal = state.portal.write().await;
    let entry = portal.update_field(index, field, request.value)?.clone();

    let totals = portal
        .session()
        .map(|s| s.totals())
        .unwrap_or_default();

    Ok(Json(EntryResponse {
        index,
        entry,
        totals,
    }))
}

/// Removes a working entry
pub async fn remove_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let mut portal = state.portal.write().await;
    portal.remove_entry(index)?;

    let session = portal
        .session()
        .ok_or(RegistryError::NoActiveSession)?;
    Ok(Json(LedgerResponse::from(session)))
}

/// Commits the working copy into the registry
pub async fn commit_ledger(State(state): State<AppState>) -> Result<Json<CommitResponse>, ApiError> {
    let mut portal = state.portal.write().await;
    let file_no = portal
        .session()
        .map(|s| s.file_no().clone())
        .ok_or(RegistryError::NoActiveSession)?;

    let outcome = portal.commit()?;
    Ok(Json(CommitResponse::new(file_no, outcome)))
}

/// Closes the working copy without committing
pub async fn discard_ledger(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let mut portal = state.portal.write().await;
    portal
        .discard()
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| RegistryError::NoActiveSession.into())
}
