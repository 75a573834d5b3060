//! Ledger reconciliation
//!
//! Editing happens on an isolated working copy of one file's transactions.
//! Nothing reaches the record collection until the session is committed, at
//! which point the file's cached totals are recomputed from the full
//! committed ledger.
//!
//! # Invariants
//!
//! - Totals are pure reductions over the committed ledger, never running
//!   counters
//! - Only one ledger is open at a time ([`EditorState`])
//! - Removing an entry never renumbers the remaining `seq` values

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use core_kernel::{FileNo, Money};

use crate::error::RegistryError;
use crate::property_file::PropertyFile;
use crate::store::RecordStore;
use crate::transaction::{Transaction, TransactionField};

/// Aggregate figures of a ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    /// Sum of `amount_paid`
    pub payment_received: Money,
    /// Sum of `balduedeb` (O/S)
    pub balance: Money,
}

impl LedgerTotals {
    /// Reduces a ledger to its totals
    pub fn from_entries(entries: &[Transaction]) -> Self {
        Self {
            payment_received: entries.iter().map(|t| t.amount_paid).sum(),
            balance: entries.iter().map(|t| t.balduedeb()).sum(),
        }
    }
}

/// Result of committing a session into a record store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The file was rewritten with these totals
    Committed(LedgerTotals),
    /// The file is no longer in the store; the edit was dropped
    FileMissing,
}

/// Working copy of one file's ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSession {
    file: PropertyFile,
    entries: Vec<Transaction>,
}

impl LedgerSession {
    /// Opens a working copy of `file`'s ledger, ordered by `seq`
    ///
    /// The sort is stable, so lines sharing a `seq` keep their stored order.
    pub fn begin(file: &PropertyFile) -> Self {
        let mut entries = file.transactions().to_vec();
        entries.sort_by_key(|t| t.seq);

        info!(file_no = %file.file_no, entries = entries.len(), "Ledger opened for editing");

        Self {
            file: file.clone(),
            entries,
        }
    }

    /// Number of the file being edited
    pub fn file_no(&self) -> &FileNo {
        &self.file.file_no
    }

    /// Snapshot of the file taken when the session began
    pub fn file(&self) -> &PropertyFile {
        &self.file
    }

    /// Working entries in their current order
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    /// Totals the working copy would commit with
    pub fn totals(&self) -> LedgerTotals {
        LedgerTotals::from_entries(&self.entries)
    }

    /// Replaces one field of the entry at `index`
    ///
    /// See [`Transaction::set_field`] for how values are interpreted.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::EntryOutOfRange`] if `index` is past the end
    /// - [`RegistryError::InvalidFieldValue`] if the value does not fit
    pub fn update_field(
        &mut self,
        index: usize,
        field: TransactionField,
        value: impl Into<Value>,
    ) -> Result<&Transaction, RegistryError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(RegistryError::EntryOutOfRange { index, len })?;

        let value = value.into();
        entry.set_field(field, &value)?;

        debug!(
            file_no = %self.file.file_no,
            index,
            field = %field,
            balduedeb = entry.balduedeb().amount(),
            "Ledger entry updated"
        );

        Ok(entry)
    }

    /// Appends a new installment line
    ///
    /// The line gets `seq` and `u_intno` of `len + 1`; existing entries are
    /// not renumbered.
    ///
    /// # Arguments
    ///
    /// * `due` - Initial due date of the line
    pub fn add_entry(&mut self, due: NaiveDate) -> &Transaction {
        let seq = u32::try_from(self.entries.len() + 1).unwrap_or(u32::MAX);
        let entry = Transaction::installment(seq, &self.file, due);

        debug!(file_no = %self.file.file_no, seq, transid = %entry.transid, "Ledger entry added");

        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Removes the entry at `index`, leaving gaps in `seq` as they fall
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EntryOutOfRange`] if `index` is past the end
    pub fn remove_entry(&mut self, index: usize) -> Result<Transaction, RegistryError> {
        let len = self.entries.len();
        if index >= len {
            return Err(RegistryError::EntryOutOfRange { index, len });
        }

        let removed = self.entries.remove(index);
        debug!(file_no = %self.file.file_no, index, seq = removed.seq, "Ledger entry removed");
        Ok(removed)
    }

    /// Commits against a caller-owned collection
    ///
    /// Returns a new collection equal to `all_files` except that every file
    /// with this session's number carries the committed ledger and freshly
    /// reduced totals. If no file matches, the collection comes back
    /// unchanged and the edit is dropped.
    pub fn commit(self, all_files: &[PropertyFile]) -> Vec<PropertyFile> {
        let (file_no, entries, totals) = self.finish();
        let mut matched = false;

        let updated = all_files
            .iter()
            .map(|f| {
                if f.file_no == file_no {
                    matched = true;
                    let mut committed = f.clone();
                    committed.set_ledger(entries.clone(), totals);
                    committed
                } else {
                    f.clone()
                }
            })
            .collect();

        log_commit(&file_no, matched, totals);
        updated
    }

    /// Commits into a keyed record store
    ///
    /// Same semantics as [`LedgerSession::commit`], applied through
    /// [`RecordStore::update`].
    pub fn commit_to<S: RecordStore>(self, store: &mut S) -> CommitOutcome {
        let (file_no, entries, totals) = self.finish();

        let applied = store.update(&file_no, |f| f.set_ledger(entries, totals));

        log_commit(&file_no, applied, totals);
        if applied {
            CommitOutcome::Committed(totals)
        } else {
            CommitOutcome::FileMissing
        }
    }

    fn finish(self) -> (FileNo, Vec<Transaction>, LedgerTotals) {
        let mut entries = self.entries;
        entries.sort_by_key(|t| t.seq);
        let totals = LedgerTotals::from_entries(&entries);
        (self.file.file_no, entries, totals)
    }
}

fn log_commit(file_no: &FileNo, applied: bool, totals: LedgerTotals) {
    if applied {
        info!(
            file_no = %file_no,
            payment_received = totals.payment_received.amount(),
            balance = totals.balance.amount(),
            "Ledger committed"
        );
    } else {
        warn!(file_no = %file_no, "Ledger commit dropped: file no longer in registry");
    }
}

/// Single-editor state
///
/// At most one ledger is open. Beginning a new edit closes the previous
/// session without committing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    /// No ledger is open
    #[default]
    Idle,
    /// A ledger is open for editing
    Editing(LedgerSession),
}

impl EditorState {
    /// Opens `file`'s ledger, returning any session it displaced
    pub fn begin(&mut self, file: &PropertyFile) -> Option<LedgerSession> {
        let previous = self.discard();
        if let Some(ref session) = previous {
            warn!(
                file_no = %session.file_no(),
                "Unsaved ledger edits discarded by a new edit session"
            );
        }
        *self = EditorState::Editing(LedgerSession::begin(file));
        previous
    }

    /// Returns true while a ledger is open
    pub fn is_editing(&self) -> bool {
        matches!(self, EditorState::Editing(_))
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&LedgerSession> {
        match self {
            EditorState::Editing(session) => Some(session),
            EditorState::Idle => None,
        }
    }

    /// The open session for mutation
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoActiveSession`] when idle
    pub fn session_mut(&mut self) -> Result<&mut LedgerSession, RegistryError> {
        match self {
            EditorState::Editing(session) => Ok(session),
            EditorState::Idle => Err(RegistryError::NoActiveSession),
        }
    }

    /// Closes the editor and hands the session over for commit
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoActiveSession`] when idle
    pub fn take(&mut self) -> Result<LedgerSession, RegistryError> {
        self.discard().ok_or(RegistryError::NoActiveSession)
    }

    /// Closes the editor without committing
    pub fn discard(&mut self) -> Option<LedgerSession> {
        match std::mem::take(self) {
            EditorState::Editing(session) => Some(session),
            EditorState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRecordStore;
    use serde_json::json;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn line(file: &PropertyFile, seq: u32, receivable: i64, paid: i64) -> Transaction {
        Transaction::installment(seq, file, due())
            .with_receivable(Money::new(receivable))
            .with_amount_paid(Money::new(paid))
    }

    fn sample_file() -> PropertyFile {
        let file = PropertyFile::new("F1", "Ayesha Khan", "35202-1234567-1");
        let lines = vec![line(&file, 2, 500, 500), line(&file, 1, 1000, 400)];
        file.with_ledger(lines)
    }

    #[test]
    fn test_begin_sorts_by_seq() {
        let session = LedgerSession::begin(&sample_file());
        let seqs: Vec<u32> = session.entries().iter().map(|t| t.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn test_begin_sort_is_stable_for_duplicate_seq() {
        let file = PropertyFile::new("F2", "Owner", "1");
        let mut a = line(&file, 1, 10, 0);
        a.description = "first".to_string();
        let mut b = line(&file, 1, 20, 0);
        b.description = "second".to_string();
        let file = file.with_ledger(vec![a, b]);

        let session = LedgerSession::begin(&file);
        assert_eq!(session.entries()[0].description, "first");
        assert_eq!(session.entries()[1].description, "second");
    }

    #[test]
    fn test_commit_totals_scenario() {
        let file = sample_file();
        let all = vec![file.clone()];

        let committed = LedgerSession::begin(&file).commit(&all);
        assert_eq!(committed[0].payment_received(), Money::new(900));
        assert_eq!(committed[0].balance(), Money::new(600));
    }

    #[test]
    fn test_overpayment_clamps_line() {
        let mut session = LedgerSession::begin(&sample_file());
        let entry = session
            .update_field(0, TransactionField::AmountPaid, json!(1200))
            .unwrap();
        assert_eq!(entry.receivable, Money::new(1000));
        assert_eq!(entry.balduedeb(), Money::zero());
    }

    #[test]
    fn test_remove_keeps_seq() {
        let mut session = LedgerSession::begin(&sample_file());
        let removed = session.remove_entry(0).unwrap();
        assert_eq!(removed.seq, 1);
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.entries()[0].seq, 2);
    }

    #[test]
    fn test_add_after_remove_can_duplicate_seq() {
        let mut session = LedgerSession::begin(&sample_file());
        session.remove_entry(0).unwrap();
        let added = session.add_entry(due());
        assert_eq!(added.seq, 2);
        assert_eq!(added.u_intno, 2);
        assert_eq!(added.itemcode, FileNo::new("F1"));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut session = LedgerSession::begin(&sample_file());
        assert!(matches!(
            session.update_field(5, TransactionField::Status, "Paid"),
            Err(RegistryError::EntryOutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            session.remove_entry(2),
            Err(RegistryError::EntryOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_commit_without_match_leaves_collection() {
        let file = sample_file();
        let other = PropertyFile::new("F9", "Someone", "9");
        let all = vec![other.clone()];

        let mut session = LedgerSession::begin(&file);
        session.update_field(0, TransactionField::AmountPaid, 1000).unwrap();
        assert_eq!(session.commit(&all), all);
    }

    #[test]
    fn test_commit_to_store() {
        let file = sample_file();
        let mut store = InMemoryRecordStore::from_files(vec![file.clone()]).unwrap();

        let mut session = LedgerSession::begin(&file);
        session.update_field(0, TransactionField::AmountPaid, 1000).unwrap();
        let outcome = session.commit_to(&mut store);

        let expected = LedgerTotals {
            payment_received: Money::new(1500),
            balance: Money::zero(),
        };
        assert_eq!(outcome, CommitOutcome::Committed(expected));
        assert_eq!(store.get(&FileNo::new("F1")).unwrap().totals(), expected);
    }

    #[test]
    fn test_commit_to_store_missing_file() {
        let mut store = InMemoryRecordStore::new();
        let outcome = LedgerSession::begin(&sample_file()).commit_to(&mut store);
        assert_eq!(outcome, CommitOutcome::FileMissing);
        assert!(store.is_empty());
    }

    #[test]
    fn test_editor_state_single_session() {
        let mut editor = EditorState::default();
        assert!(!editor.is_editing());
        assert!(matches!(editor.session_mut(), Err(RegistryError::NoActiveSession)));

        assert!(editor.begin(&sample_file()).is_none());
        assert!(editor.is_editing());

        let other = PropertyFile::new("F2", "Other", "2");
        let displaced = editor.begin(&other).unwrap();
        assert_eq!(displaced.file_no(), &FileNo::new("F1"));
        assert_eq!(editor.session().unwrap().file_no(), &FileNo::new("F2"));

        assert!(editor.take().is_ok());
        assert!(!editor.is_editing());
        assert!(editor.discard().is_none());
    }
}
