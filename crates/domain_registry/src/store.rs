//! Record store
//!
//! The authoritative, ordered collection of property files. Reads expose the
//! collection in enrollment order; writes are either a wholesale replace or a
//! keyed `update(file_no, mutator)`.

use std::collections::HashMap;
use tracing::{info, warn};

use core_kernel::FileNo;

use crate::error::RegistryError;
use crate::property_file::PropertyFile;

/// Port for the property file collection
pub trait RecordStore {
    /// All files in collection order
    fn files(&self) -> &[PropertyFile];

    /// Looks up a file by number
    fn get(&self, file_no: &FileNo) -> Option<&PropertyFile>;

    /// Replaces the whole collection
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateFile`] if two files share a number;
    /// the store is left unchanged in that case.
    fn replace_all(&mut self, files: Vec<PropertyFile>) -> Result<(), RegistryError>;

    /// Applies `mutator` to the file with this number
    ///
    /// Returns `false`, without calling `mutator`, when no such file exists.
    /// The mutator must not change the file number; if it does, the original
    /// number is restored.
    fn update<F>(&mut self, file_no: &FileNo, mutator: F) -> bool
    where
        F: FnOnce(&mut PropertyFile);

    /// Appends a newly enrolled file
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] if the file number is blank
    /// - [`RegistryError::DuplicateFile`] if the number is taken
    fn insert(&mut self, file: PropertyFile) -> Result<(), RegistryError>;

    fn len(&self) -> usize {
        self.files().len()
    }

    fn is_empty(&self) -> bool {
        self.files().is_empty()
    }
}

/// In-memory store keyed by file number
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    files: Vec<PropertyFile>,
    index: HashMap<FileNo, usize>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `files`
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateFile`] if two files share a number
    pub fn from_files(files: Vec<PropertyFile>) -> Result<Self, RegistryError> {
        let mut store = Self::new();
        store.replace_all(files)?;
        Ok(store)
    }

    /// Consumes the store, returning the collection
    pub fn into_files(self) -> Vec<PropertyFile> {
        self.files
    }
}

fn build_index(files: &[PropertyFile]) -> Result<HashMap<FileNo, usize>, RegistryError> {
    let mut index = HashMap::with_capacity(files.len());
    for (position, file) in files.iter().enumerate() {
        if index.insert(file.file_no.clone(), position).is_some() {
            return Err(RegistryError::DuplicateFile(file.file_no.clone()));
        }
    }
    Ok(index)
}

impl RecordStore for InMemoryRecordStore {
    fn files(&self) -> &[PropertyFile] {
        &self.files
    }

    fn get(&self, file_no: &FileNo) -> Option<&PropertyFile> {
        self.index.get(file_no).map(|&position| &self.files[position])
    }

    fn replace_all(&mut self, files: Vec<PropertyFile>) -> Result<(), RegistryError> {
        let index = build_index(&files)?;
        info!(count = files.len(), "Registry collection replaced");
        self.files = files;
        self.index = index;
        Ok(())
    }

    fn update<F>(&mut self, file_no: &FileNo, mutator: F) -> bool
    where
        F: FnOnce(&mut PropertyFile),
    {
        let Some(&position) = self.index.get(file_no) else {
            return false;
        };

        let file = &mut self.files[position];
        mutator(file);

        if &file.file_no != file_no {
            warn!(
                file_no = %file_no,
                attempted = %file.file_no,
                "File number changes are not allowed through update; restored"
            );
            file.file_no = file_no.clone();
        }

        true
    }

    fn insert(&mut self, file: PropertyFile) -> Result<(), RegistryError> {
        if file.file_no.is_blank() {
            return Err(RegistryError::validation("file number is required"));
        }
        if self.index.contains_key(&file.file_no) {
            return Err(RegistryError::DuplicateFile(file.file_no));
        }

        self.index.insert(file.file_no.clone(), self.files.len());
        self.files.push(file);
        Ok(())
    }
}

/// Where the current collection came from
///
/// Purely informational; the registry behaves the same either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Created in this registry
    #[default]
    Native,
    /// Loaded from an external ("pinned") source
    Imported,
}

impl Provenance {
    /// Builds from the caller's "pinned" flag
    pub fn from_pinned(pinned: bool) -> Self {
        if pinned {
            Provenance::Imported
        } else {
            Provenance::Native
        }
    }

    /// Badge shown next to the registry title
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Provenance::Native => None,
            Provenance::Imported => Some("Imported"),
        }
    }
}
