//! Registry overview DTOs

use serde::Serialize;

use core_kernel::{FileNo, Money};
use domain_registry::Provenance;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryInfoResponse {
    pub provenance: Provenance,
    /// Badge text, present for imported registries
    pub label: Option<&'static str>,
    pub file_count: usize,
    pub total_value: Money,
    pub total_received: Money,
    pub total_outstanding: Money,
    /// File whose ledger is open, if any
    pub editing: Option<FileNo>,
    pub timezone: String,
    pub export_prefix: String,
}
