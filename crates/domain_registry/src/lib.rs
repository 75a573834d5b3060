//! Registry Domain - Plot Files and Installment Ledgers
//!
//! This crate holds the plot registry: enrolled property files, their
//! installment ledgers, and the operations the registry office runs on them.
//!
//! # Ledger Reconciliation
//!
//! A ledger is edited on an isolated working copy ([`LedgerSession`]). Each
//! line keeps its outstanding balance (`balduedeb`) as
//! `max(0, receivable - amount_paid)`. Committing replaces the file's ledger
//! in the [`RecordStore`] and recomputes the file's `paymentReceived` and
//! `balance` from the full committed ledger.
//!
//! # Registry Operations
//!
//! - **Search**: substring match over file number, owner name, and CNIC
//! - **Export**: the whole registry flattened to CSV
//! - **Enrollment**: new files with registry defaults
//! - **Statements**: read-only views for listing and preview
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_registry::{RegistryPortal, TransactionField};
//!
//! let mut portal = RegistryPortal::default();
//! portal.enroll(form)?;
//!
//! portal.begin_edit(&file_no)?;
//! portal.add_entry()?;
//! portal.update_field(0, TransactionField::Receivable, 1000)?;
//! portal.update_field(0, TransactionField::AmountPaid, "400")?;
//! portal.commit()?;
//! ```

pub mod error;
pub mod transaction;
pub mod property_file;
pub mod ledger;
pub mod store;
pub mod search;
pub mod export;
pub mod statement;
pub mod portal;

pub use error::RegistryError;
pub use transaction::{Transaction, TransactionField};
pub use property_file::{EnrollmentForm, PlotDescriptor, PropertyFile, DEFAULT_PLOT_SIZE};
pub use ledger::{CommitOutcome, EditorState, LedgerSession, LedgerTotals};
pub use store::{InMemoryRecordStore, Provenance, RecordStore};
pub use search::{filter, matches};
pub use export::{
    export_file_name, export_registry, ExportDocument, DEFAULT_EXPORT_PREFIX, REGISTRY_HEADERS,
};
pub use statement::{location_label, RegistrySummary, Statement, StatementPreview};
pub use portal::RegistryPortal;
