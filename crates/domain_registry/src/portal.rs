//! Registry portal
//!
//! The portal composes a record store with the single-editor ledger state,
//! search, enrollment, statements, and export. It is the surface front ends
//! talk to.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use core_kernel::{FileNo, Timezone};

use crate::error::RegistryError;
use crate::export::{export_file_name, export_registry, ExportDocument, DEFAULT_EXPORT_PREFIX};
use crate::ledger::{CommitOutcome, EditorState, LedgerSession};
use crate::property_file::{EnrollmentForm, PropertyFile};
use crate::search;
use crate::statement::{RegistrySummary, Statement, StatementPreview};
use crate::store::{InMemoryRecordStore, Provenance, RecordStore};
use crate::transaction::{Transaction, TransactionField};

/// Registry front door
pub struct RegistryPortal<S: RecordStore = InMemoryRecordStore> {
    store: S,
    editor: EditorState,
    provenance: Provenance,
    timezone: Timezone,
    export_prefix: String,
    preview_hook: Option<Arc<dyn StatementPreview>>,
}

impl<S: RecordStore> RegistryPortal<S> {
    /// Creates a portal over `store` with Karachi time and the default
    /// export prefix
    pub fn new(store: S) -> Self {
        Self {
            store,
            editor: EditorState::Idle,
            provenance: Provenance::Native,
            timezone: Timezone::default(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            preview_hook: None,
        }
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = prefix.into();
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Installs the hook called by [`RegistryPortal::preview_statement`]
    pub fn with_preview_hook(mut self, hook: impl StatementPreview + 'static) -> Self {
        self.preview_hook = Some(Arc::new(hook));
        self
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn provenance_label(&self) -> Option<&'static str> {
        self.provenance.label()
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Local calendar date in the portal's timezone
    pub fn today(&self) -> NaiveDate {
        self.timezone.today()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn files(&self) -> &[PropertyFile] {
        self.store.files()
    }

    /// # Errors
    ///
    /// Returns [`RegistryError::FileNotFound`] if no file has this number
    pub fn get(&self, file_no: &FileNo) -> Result<&PropertyFile, RegistryError> {
        self.store
            .get(file_no)
            .ok_or_else(|| RegistryError::FileNotFound(file_no.clone()))
    }

    pub fn search(&self, term: &str) -> Vec<&PropertyFile> {
        search::filter(self.store.files(), term)
    }

    /// Listing rows of the files matching `term`
    pub fn summaries(&self, term: &str) -> Vec<RegistrySummary> {
        self.search(term).into_iter().map(RegistrySummary::from).collect()
    }

    /// Replaces the whole collection and records where it came from
    ///
    /// An open ledger session stays open; committing it later is dropped if
    /// its file is not in the new collection.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateFile`] if two files share a number
    pub fn replace_all(
        &mut self,
        files: Vec<PropertyFile>,
        provenance: Provenance,
    ) -> Result<(), RegistryError> {
        self.store.replace_all(files)?;
        self.provenance = provenance;
        Ok(())
    }

    /// Enrolls a new file from the form
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] if the file number is blank
    /// - [`RegistryError::DuplicateFile`] if the number is taken
    pub fn enroll(&mut self, form: EnrollmentForm) -> Result<&PropertyFile, RegistryError> {
        let file = PropertyFile::enroll(form, self.today())?;
        let file_no = file.file_no.clone();

        self.store.insert(file)?;
        info!(file_no = %file_no, "File enrolled");

        self.get(&file_no)
    }

    /// Opens the ledger of `file_no`, returning the session it displaced
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::FileNotFound`] if no file has this number;
    /// the current session is left open in that case.
    pub fn begin_edit(&mut self, file_no: &FileNo) -> Result<Option<LedgerSession>, RegistryError> {
        let file = self
            .store
            .get(file_no)
            .ok_or_else(|| RegistryError::FileNotFound(file_no.clone()))?;
        Ok(self.editor.begin(file))
    }

    pub fn session(&self) -> Option<&LedgerSession> {
        self.editor.session()
    }

    /// # Errors
    ///
    /// - [`RegistryError::NoActiveSession`] when no ledger is open
    /// - see [`LedgerSession::update_field`]
    pub fn update_field(
        &mut self,
        index: usize,
        field: TransactionField,
        value: impl Into<Value>,
    ) -> Result<&Transaction, RegistryError> {
        self.editor.session_mut()?.update_field(index, field, value)
    }

    /// Appends an installment line due today
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoActiveSession`] when no ledger is open
    pub fn add_entry(&mut self) -> Result<&Transaction, RegistryError> {
        let due = self.today();
        Ok(self.editor.session_mut()?.add_entry(due))
    }

    /// # Errors
    ///
    /// - [`RegistryError::NoActiveSession`] when no ledger is open
    /// - [`RegistryError::EntryOutOfRange`] if `index` is past the end
    pub fn remove_entry(&mut self, index: usize) -> Result<Transaction, RegistryError> {
        self.editor.session_mut()?.remove_entry(index)
    }

    /// Commits the open ledger into the store and closes the editor
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoActiveSession`] when no ledger is open
    pub fn commit(&mut self) -> Result<CommitOutcome, RegistryError> {
        let session = self.editor.take()?;
        Ok(session.commit_to(&mut self.store))
    }

    /// Closes the editor without committing
    pub fn discard(&mut self) -> Option<LedgerSession> {
        let discarded = self.editor.discard();
        if let Some(ref session) = discarded {
            info!(file_no = %session.file_no(), "Ledger edits discarded");
        }
        discarded
    }

    /// # Errors
    ///
    /// Returns [`RegistryError::FileNotFound`] if no file has this number
    pub fn statement(&self, file_no: &FileNo) -> Result<Statement, RegistryError> {
        self.get(file_no).map(Statement::from)
    }

    /// Builds the statement of `file_no` and hands the file to the preview
    /// hook, if one is installed
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::FileNotFound`] if no file has this number
    pub fn preview_statement(&self, file_no: &FileNo) -> Result<Statement, RegistryError> {
        let file = self.get(file_no)?;
        if let Some(hook) = &self.preview_hook {
            hook.preview(file);
        }
        Ok(Statement::from(file))
    }

    /// Exports the registry as of `date`
    ///
    /// Returns `Ok(None)` when the registry is empty.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Export`] if the CSV writer fails
    pub fn export(&self, date: NaiveDate) -> Result<Option<ExportDocument>, RegistryError> {
        let Some(content) = export_registry(self.store.files())? else {
            return Ok(None);
        };

        let file_name = export_file_name(&self.export_prefix, date);
        info!(file_name = %file_name, files = self.store.len(), "Registry exported");

        Ok(Some(ExportDocument { file_name, content }))
    }
}

impl Default for RegistryPortal {
    fn default() -> Self {
        Self::new(InMemoryRecordStore::new())
    }
}

impl<S: RecordStore + fmt::Debug> fmt::Debug for RegistryPortal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryPortal")
            .field("store", &self.store)
            .field("editor", &self.editor)
            .field("provenance", &self.provenance)
            .field("timezone", &self.timezone)
            .field("export_prefix", &self.export_prefix)
            .field("preview_hook", &self.preview_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerTotals;
    use core_kernel::Money;
    use std::sync::Mutex;

    fn form(file_no: &str, owner: &str) -> EnrollmentForm {
        EnrollmentForm {
            file_no: file_no.to_string(),
            owner_name: owner.to_string(),
            owner_cnic: "35202-1234567-1".to_string(),
            ..Default::default()
        }
    }

    fn portal() -> RegistryPortal {
        let mut portal = RegistryPortal::default();
        portal.enroll(form("DIN-001", "Ayesha Khan")).unwrap();
        portal.enroll(form("DIN-002", "Bilal Ahmed")).unwrap();
        portal
    }

    #[test]
    fn test_enroll_and_search() {
        let mut portal = portal();
        assert_eq!(portal.files().len(), 2);
        assert!(matches!(
            portal.enroll(form("DIN-001", "Again")),
            Err(RegistryError::DuplicateFile(_))
        ));

        let rows = portal.summaries("bilal");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].file_no, FileNo::new("DIN-002"));
    }

    #[test]
    fn test_edit_cycle() {
        let mut portal = portal();
        let file_no = FileNo::new("DIN-001");

        assert!(matches!(portal.add_entry(), Err(RegistryError::NoActiveSession)));

        portal.begin_edit(&file_no).unwrap();
        portal.add_entry().unwrap();
        portal.add_entry().unwrap();
        portal.update_field(0, TransactionField::Receivable, 1000).unwrap();
        portal.update_field(0, TransactionField::AmountPaid, "400").unwrap();
        portal.update_field(1, TransactionField::Receivable, 500).unwrap();
        portal.update_field(1, TransactionField::AmountPaid, 500).unwrap();

        // Store is untouched until commit
        assert!(portal.get(&file_no).unwrap().transactions().is_empty());

        let outcome = portal.commit().unwrap();
        assert_eq!(
            outcome,
            CommitOutcome::Committed(LedgerTotals {
                payment_received: Money::new(900),
                balance: Money::new(600),
            })
        );
        assert!(portal.session().is_none());
        assert_eq!(portal.get(&file_no).unwrap().transactions().len(), 2);
    }

    #[test]
    fn test_begin_edit_unknown_file_keeps_session() {
        let mut portal = portal();
        portal.begin_edit(&FileNo::new("DIN-002")).unwrap();
        assert!(matches!(
            portal.begin_edit(&FileNo::new("NOPE")),
            Err(RegistryError::FileNotFound(_))
        ));
        assert_eq!(portal.session().unwrap().file_no(), &FileNo::new("DIN-002"));
    }

    #[test]
    fn test_commit_after_file_removed_is_dropped() {
        let mut portal = portal();
        portal.begin_edit(&FileNo::new("DIN-001")).unwrap();
        portal.add_entry().unwrap();
        portal
            .replace_all(vec![PropertyFile::new("X", "Other", "1")], Provenance::Imported)
            .unwrap();

        assert_eq!(portal.commit().unwrap(), CommitOutcome::FileMissing);
        assert_eq!(portal.provenance_label(), Some("Imported"));
        assert!(portal.files()[0].transactions().is_empty());
    }

    #[test]
    fn test_discard() {
        let mut portal = portal();
        portal.begin_edit(&FileNo::new("DIN-001")).unwrap();
        portal.add_entry().unwrap();
        assert!(portal.discard().is_some());
        assert!(matches!(portal.commit(), Err(RegistryError::NoActiveSession)));
        assert!(portal.get(&FileNo::new("DIN-001")).unwrap().transactions().is_empty());
    }

    #[test]
    fn test_preview_hook_receives_file() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut portal = RegistryPortal::default().with_preview_hook(move |file: &PropertyFile| {
            sink.lock().unwrap().push(file.file_no.clone());
        });
        portal.enroll(form("DIN-009", "Sana Malik")).unwrap();

        let statement = portal.preview_statement(&FileNo::new("DIN-009")).unwrap();
        assert_eq!(statement.owner_name, "Sana Malik");
        assert_eq!(seen.lock().unwrap().as_slice(), &[FileNo::new("DIN-009")]);
    }

    #[test]
    fn test_export() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(RegistryPortal::default().export(date).unwrap().is_none());

        let doc = portal().with_export_prefix("Registry").export(date).unwrap().unwrap();
        assert_eq!(doc.file_name, "Registry_2026-10-19.csv");
        assert_eq!(doc.content.lines().count(), 3);
    }
}
