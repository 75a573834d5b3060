//! Read-only views of property files
//!
//! Listing rows and statement previews carry data only; how they are drawn
//! is up to the front end.

use serde::Serialize;

use core_kernel::{FileNo, Money};

use crate::property_file::PropertyFile;
use crate::transaction::Transaction;

/// Receives statement preview requests
///
/// Implemented for any `Fn(&PropertyFile)`, so a closure can be installed
/// directly.
pub trait StatementPreview: Send + Sync {
    fn preview(&self, file: &PropertyFile);
}

impl<F> StatementPreview for F
where
    F: Fn(&PropertyFile) + Send + Sync,
{
    fn preview(&self, file: &PropertyFile) {
        self(file)
    }
}

/// `Plot: 14 Block: C`, leaving out descriptors marked `-`
pub fn location_label(file: &PropertyFile) -> String {
    let plot = file.plot_no.value().map(|v| format!("Plot: {}", v));
    let block = file.block.value().map(|v| format!("Block: {}", v));

    plot.into_iter().chain(block).collect::<Vec<_>>().join(" ")
}

/// One row of the registry listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub file_no: FileNo,
    pub owner_name: String,
    #[serde(rename = "ownerCNIC")]
    pub owner_cnic: String,
    pub plot_value: Money,
    pub payment_received: Money,
    pub balance: Money,
    /// Formatted plot value, e.g. `Rs 2,500,000`
    pub value_display: String,
    pub paid_display: String,
    pub outstanding_display: String,
    pub location: String,
    pub plot_size: String,
}

impl From<&PropertyFile> for RegistrySummary {
    fn from(file: &PropertyFile) -> Self {
        Self {
            file_no: file.file_no.clone(),
            owner_name: file.owner_name.clone(),
            owner_cnic: file.owner_cnic.clone(),
            plot_value: file.plot_value,
            payment_received: file.payment_received(),
            balance: file.balance(),
            value_display: file.plot_value.to_string(),
            paid_display: file.payment_received().to_string(),
            outstanding_display: file.balance().to_string(),
            location: location_label(file),
            plot_size: file.plot_size.to_string(),
        }
    }
}

/// Account statement of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub file_no: FileNo,
    pub owner_name: String,
    #[serde(rename = "ownerCNIC")]
    pub owner_cnic: String,
    pub father_name: String,
    pub cell_no: String,
    pub address: String,
    pub plot_size: String,
    pub location: String,
    pub reg_date: String,
    pub plot_value: Money,
    pub payment_received: Money,
    pub balance: Money,
    /// Ledger lines ordered by `seq`
    pub entries: Vec<Transaction>,
}

impl From<&PropertyFile> for Statement {
    fn from(file: &PropertyFile) -> Self {
        let mut entries = file.transactions().to_vec();
        entries.sort_by_key(|t| t.seq);

        Self {
            file_no: file.file_no.clone(),
            owner_name: file.owner_name.clone(),
            owner_cnic: file.owner_cnic.clone(),
            father_name: file.father_name.clone(),
            cell_no: file.cell_no.clone(),
            address: file.address.clone(),
            plot_size: file.plot_size.to_string(),
            location: location_label(file),
            reg_date: file.reg_date.clone(),
            plot_value: file.plot_value,
            payment_received: file.payment_received(),
            balance: file.balance(),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[test]
    fn test_location_label() {
        let mut file = PropertyFile::new("F1", "Owner", "1");
        assert_eq!(location_label(&file), "");

        file.block = "C".into();
        assert_eq!(location_label(&file), "Block: C");

        file.plot_no = "14".into();
        assert_eq!(location_label(&file), "Plot: 14 Block: C");
    }

    #[test]
    fn test_summary_formats_money() {
        let mut file = PropertyFile::new("F1", "Owner", "1");
        file.plot_value = Money::new(2_500_000);
        let summary = RegistrySummary::from(&file);
        assert_eq!(summary.value_display, "Rs 2,500,000");
        assert_eq!(summary.paid_display, "Rs 0");
        assert_eq!(summary.plot_size, "5 Marla-Residential");
    }

    #[test]
    fn test_statement_orders_entries() {
        let file = PropertyFile::new("F1", "Owner", "1");
        let due = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let file = file.clone().with_ledger(vec![
            Transaction::installment(3, &file, due),
            Transaction::installment(1, &file, due),
        ]);

        let statement = Statement::from(&file);
        let seqs: Vec<u32> = statement.entries.iter().map(|t| t.seq).collect();
        assert_eq!(seqs, vec![1, 3]);
    }

    #[test]
    fn test_closure_is_a_preview_hook() {
        let seen = Mutex::new(Vec::new());
        let hook = |file: &PropertyFile| seen.lock().unwrap().push(file.file_no.clone());
        hook.preview(&PropertyFile::new("F5", "Owner", "1"));
        assert_eq!(seen.lock().unwrap().as_slice(), &[FileNo::new("F5")]);
    }
}
