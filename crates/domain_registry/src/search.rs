//! Identity search over the registry

use crate::property_file::PropertyFile;

/// Returns true if `file` matches the search term
///
/// File number and owner name match case-insensitively; the CNIC matches as
/// a literal substring. An empty term matches everything.
pub fn matches(file: &PropertyFile, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    file.file_no.as_str().to_lowercase().contains(&needle)
        || file.owner_name.to_lowercase().contains(&needle)
        || file.owner_cnic.contains(term)
}

/// Files matching `term`, in collection order
pub fn filter<'a>(files: &'a [PropertyFile], term: &str) -> Vec<&'a PropertyFile> {
    files.iter().filter(|file| matches(file, term)).collect()
}
