//! Catalog file storage: the production document on disk.
//!
//! The host keeps its production catalog as one JSON document. This module
//! loads it before ingestion and writes the merged result back.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::model::Production;

/// Errors that can occur loading or saving the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, CatalogError>;

/// Loads the production catalog from `path`.
pub fn load_catalog(path: &Path) -> Result<Production> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&json)?)
}

/// Writes the production catalog to `path`, creating parent directories.
pub fn save_catalog(path: &Path, production: &Production) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(production)?;
    fs::write(path, json)?;
    Ok(())
}
