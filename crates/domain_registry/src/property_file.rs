//! Property files
//!
//! A property file is one enrolled plot with its owner identity, plot
//! descriptors, and installment ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{format_registration_date, FileNo, Money};

use crate::error::RegistryError;
use crate::ledger::LedgerTotals;
use crate::transaction::Transaction;

/// Plot size given to a new enrollment
pub const DEFAULT_PLOT_SIZE: &str = "5 Marla-Residential";

/// A plot attribute that may be marked not applicable with `-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotDescriptor(String);

impl PlotDescriptor {
    /// The "not applicable" sentinel
    pub const NOT_APPLICABLE: &'static str = "-";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn not_applicable() -> Self {
        Self(Self::NOT_APPLICABLE.to_string())
    }

    /// Raw stored text, sentinel included
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The real value, or `None` for the sentinel
    pub fn value(&self) -> Option<&str> {
        if self.is_applicable() {
            Some(&self.0)
        } else {
            None
        }
    }

    pub fn is_applicable(&self) -> bool {
        self.0 != Self::NOT_APPLICABLE
    }
}

impl Default for PlotDescriptor {
    fn default() -> Self {
        Self::not_applicable()
    }
}

impl fmt::Display for PlotDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlotDescriptor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One enrolled plot/ownership record
///
/// # Invariants
///
/// `payment_received` and `balance` are caches of the ledger totals. They are
/// only rewritten by a ledger commit (or [`PropertyFile::with_ledger`]) and
/// are not settable on their own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyFile {
    /// Unique file number
    pub file_no: FileNo,
    pub owner_name: String,
    /// National identity number, kept as an opaque string
    #[serde(rename = "ownerCNIC")]
    pub owner_cnic: String,
    pub father_name: String,
    pub cell_no: String,
    /// Postal address, may span several lines
    pub address: String,
    pub plot_size: PlotDescriptor,
    pub plot_no: PlotDescriptor,
    pub block: PlotDescriptor,
    pub park: PlotDescriptor,
    pub corner: PlotDescriptor,
    pub main_boulevard: PlotDescriptor,
    /// Total plot value
    pub plot_value: Money,
    /// Registration date as displayed, e.g. `05 Mar 2024`
    pub reg_date: String,
    pub currency_no: String,
    payment_received: Money,
    balance: Money,
    transactions: Vec<Transaction>,
}

impl PropertyFile {
    /// Creates a file with identity only; everything else takes its default
    ///
    /// # Arguments
    ///
    /// * `file_no` - Registry file number
    /// * `owner_name` - Owner's full name
    /// * `owner_cnic` - Owner's national identity number
    pub fn new(
        file_no: impl Into<FileNo>,
        owner_name: impl Into<String>,
        owner_cnic: impl Into<String>,
    ) -> Self {
        Self {
            file_no: file_no.into(),
            owner_name: owner_name.into(),
            owner_cnic: owner_cnic.into(),
            plot_size: PlotDescriptor::new(DEFAULT_PLOT_SIZE),
            currency_no: PlotDescriptor::NOT_APPLICABLE.to_string(),
            ..Default::default()
        }
    }

    /// Builds a new file from an enrollment form
    ///
    /// # Arguments
    ///
    /// * `form` - Operator input
    /// * `today` - Local date used when the form has no registration date
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] if the file number is blank
    pub fn enroll(form: EnrollmentForm, today: NaiveDate) -> Result<Self, RegistryError> {
        let file_no = FileNo::new(form.file_no.trim());
        if file_no.is_blank() {
            return Err(RegistryError::validation("file number is required"));
        }

        let descriptor = |value: Option<String>| value.map(PlotDescriptor::new).unwrap_or_default();

        Ok(Self {
            file_no,
            owner_name: form.owner_name,
            owner_cnic: form.owner_cnic,
            father_name: form.father_name,
            cell_no: form.cell_no,
            address: form.address,
            plot_size: form
                .plot_size
                .map(PlotDescriptor::new)
                .unwrap_or_else(|| PlotDescriptor::new(DEFAULT_PLOT_SIZE)),
            plot_no: descriptor(form.plot_no),
            block: descriptor(form.block),
            park: descriptor(form.park),
            corner: descriptor(form.corner),
            main_boulevard: descriptor(form.main_boulevard),
            plot_value: form.plot_value.unwrap_or_default(),
            reg_date: form
                .reg_date
                .unwrap_or_else(|| format_registration_date(today)),
            currency_no: form
                .currency_no
                .unwrap_or_else(|| PlotDescriptor::NOT_APPLICABLE.to_string()),
            payment_received: Money::zero(),
            balance: Money::zero(),
            transactions: Vec::new(),
        })
    }

    /// Replaces the ledger and recomputes the cached totals from it
    pub fn with_ledger(mut self, transactions: Vec<Transaction>) -> Self {
        let totals = LedgerTotals::from_entries(&transactions);
        self.set_ledger(transactions, totals);
        self
    }

    /// Ledger lines in stored order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Cached sum of amounts paid
    pub fn payment_received(&self) -> Money {
        self.payment_received
    }

    /// Cached sum of outstanding balances (O/S)
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Cached totals as a pair
    pub fn totals(&self) -> LedgerTotals {
        LedgerTotals {
            payment_received: self.payment_received,
            balance: self.balance,
        }
    }

    pub(crate) fn set_ledger(&mut self, transactions: Vec<Transaction>, totals: LedgerTotals) {
        self.transactions = transactions;
        self.payment_received = totals.payment_received;
        self.balance = totals.balance;
    }
}

/// Operator input for enrolling a new file
///
/// Absent optional fields take the registry defaults: plot size
/// `5 Marla-Residential`, plot value zero, today's registration date, and
/// `-` for the currency number and every plot descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentForm {
    pub file_no: String,
    pub owner_name: String,
    #[serde(rename = "ownerCNIC")]
    pub owner_cnic: String,
    pub father_name: String,
    pub cell_no: String,
    pub address: String,
    pub plot_size: Option<String>,
    pub plot_no: Option<String>,
    pub block: Option<String>,
    pub park: Option<String>,
    pub corner: Option<String>,
    pub main_boulevard: Option<String>,
    pub plot_value: Option<Money>,
    pub reg_date: Option<String>,
    pub currency_no: Option<String>,
}
