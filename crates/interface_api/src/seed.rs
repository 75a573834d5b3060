//! Startup registry construction
//!
//! Builds the portal from configuration, loading the optional seed file of
//! property files. A seeded registry is marked as imported.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use domain_registry::{PropertyFile, Provenance, RegistryError, RegistryPortal};

use crate::config::RegistryConfig;

/// Errors loading the seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Cannot read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Seed file {path} is not a JSON array of property files: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Reads a JSON array of property files
pub fn load_seed(path: &Path) -> Result<Vec<PropertyFile>, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates the portal described by `config`
pub fn build_portal(config: &RegistryConfig) -> Result<RegistryPortal, SeedError> {
    let mut portal = RegistryPortal::default()
        .with_timezone(config.timezone)
        .with_export_prefix(config.export_prefix.clone())
        .with_preview_hook(|file: &PropertyFile| {
            info!(
                file_no = %file.file_no,
                entries = file.transactions().len(),
                "Statement preview requested"
            );
        });

    if let Some(path) = &config.seed_path {
        let files = load_seed(path)?;
        let count = files.len();
        portal.replace_all(files, Provenance::Imported)?;
        info!(path = %path.display(), files = count, "Registry seeded");
    }

    Ok(portal)
}
