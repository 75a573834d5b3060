//! Registry overview handler

use axum::{extract::State, Json};

use core_kernel::Money;

use crate::dto::registry::RegistryInfoResponse;
use crate::AppState;

/// Provenance label and headline figures
pub async fn registry_info(State(state): State<AppState>) -> Json<RegistryInfoResponse> {
    let portal = state.portal.read().await;
    let files = portal.files();

    Json(RegistryInfoResponse {
        provenance: portal.provenance(),
        label: portal.provenance_label(),
        file_count: files.len(),
        total_value: files.iter().map(|f| f.plot_value).sum::<Money>(),
        total_received: files.iter().map(|f| f.payment_received()).sum::<Money>(),
        total_outstanding: files.iter().map(|f| f.balance()).sum::<Money>(),
        editing: portal.session().map(|s| s.file_no().clone()),
        timezone: portal.timezone().to_string(),
        export_prefix: state.config.export_prefix.clone(),
    })
}
