//! Recipe file discovery: find and parse user-authored recipe files.
//!
//! Walks the recipes directory recursively and parses every `.json` file
//! into a JSON object. Discovery is always total: each file yields one
//! [`LoadedFile`], carrying either the parsed object or the reason it is
//! unusable. Nothing here aborts the batch.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ignore::WalkBuilder;
use serde_json::{Map, Value};

/// A parsed recipe document's top-level object.
pub type JsonObject = Map<String, Value>;

/// One discovered file and what came of parsing it.
#[derive(Debug)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub outcome: Result<JsonObject, LoadError>,
}

/// Why a file (or the recipes directory itself) produced no usable object.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("recipes directory not found; create {}", .expected.display())]
    DirectoryMissing { expected: PathBuf },

    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to walk recipes directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("parsed result is empty")]
    Empty,

    #[error("top-level value must be an object, not an array or primitive")]
    NotAnObject,
}

/// Discover and parse every recipe file under `root`.
///
/// A missing `root` produces a single [`LoadError::DirectoryMissing`] entry
/// rather than an error. A directory with no recipe files produces nothing.
/// Files are visited in file-name order at each level. A part of the tree
/// that cannot be walked produces a [`LoadError::Walk`] entry in its place.
pub fn load_recipe_files(root: &Path) -> Vec<LoadedFile> {
    if !root.is_dir() {
        return vec![LoadedFile {
            path: root.to_path_buf(),
            outcome: Err(LoadError::DirectoryMissing {
                expected: root.to_path_buf(),
            }),
        }];
    }

    // Hidden and gitignored files are included: every file under the recipes
    // directory was put there on purpose.
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_name(Ord::cmp)
        .build();

    walker
        .filter_map(|entry| match entry {
            Ok(entry) => {
                let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                let path = entry.into_path();
                (is_file && has_json_extension(&path)).then(|| {
                    let outcome = parse_recipe_file(&path);
                    LoadedFile { path, outcome }
                })
            }
            Err(err) => Some(LoadedFile {
                path: walk_error_path(&err).unwrap_or(root).to_path_buf(),
                outcome: Err(LoadError::Walk(err)),
            }),
        })
        .collect()
}

/// The path a walk error is about, if it names one.
fn walk_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(walk_error_path),
        _ => None,
    }
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read a file and classify it as an object, wrong shape, or unreadable.
fn parse_recipe_file(path: &Path) -> Result<JsonObject, LoadError> {
    let text = fs::read_to_string(path)?;
    // Editors on Windows like to start UTF-8 files with a byte order mark.
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    match serde_json::from_str::<Value>(text)? {
        Value::Object(obj) => Ok(obj),
        Value::Null => Err(LoadError::Empty),
        _ => Err(LoadError::NotAnObject),
    }
}
