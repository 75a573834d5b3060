//! Ledger editing DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::FileNo;
use domain_registry::{CommitOutcome, LedgerSession, LedgerTotals, Transaction};

/// The open working copy
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub file_no: FileNo,
    pub entries: Vec<Transaction>,
    /// Totals the working copy would commit with
    pub totals: LedgerTotals,
}

impl From<&LedgerSession> for LedgerResponse {
    fn from(session: &LedgerSession) -> Self {
        Self {
            file_no: session.file_no().clone(),
            entries: session.entries().to_vec(),
            totals: session.totals(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginEditResponse {
    pub ledger: LedgerResponse,
    /// File whose unsaved session was closed by this one
    pub discarded: Option<FileNo>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    /// Wire name of the ledger field, e.g. `amount_paid`
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub index: usize,
    pub entry: Transaction,
    pub totals: LedgerTotals,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitStatus {
    Committed,
    FileMissing,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    pub file_no: FileNo,
    pub status: CommitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<LedgerTotals>,
}

impl CommitResponse {
    pub fn new(file_no: FileNo, outcome: CommitOutcome) -> Self {
        match outcome {
            CommitOutcome::Committed(totals) => Self {
                file_no,
                status: CommitStatus::Committed,
                totals: Some(totals),
            },
            CommitOutcome::FileMissing => Self {
                file_no,
                status: CommitStatus::FileMissing,
                totals: None,
            },
        }
    }
}
