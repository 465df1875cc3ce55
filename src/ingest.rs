//! Recipe ingestion: merge user-authored recipe files into the catalog.
//!
//! Each loaded file is processed fully before the next: it is either
//! appended to the catalog as a complete entry or skipped with a logged
//! reason. The only state shared between files is the set of identifiers
//! already taken, seeded from the catalog and grown as entries are accepted.

mod candidate;

use std::{collections::HashSet, path::PathBuf};

use tracing::{error, info};

use crate::discover::{JsonObject, LoadError, LoadedFile};
use crate::model::{Production, RecipeEntry, RecipeId};

pub use candidate::{CandidateFields, build_requirements};

/// The catalog cannot be merged into at all.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("production catalog has no recipe list")]
    MissingRecipes,
}

/// What one ingestion run did.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub injected: Vec<Injected>,
    pub rejected: Vec<Rejection>,
}

impl IngestReport {
    pub fn injected_count(&self) -> usize {
        self.injected.len()
    }
}

/// A recipe that made it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub path: PathBuf,
    pub friendly_id: String,
    pub id: RecipeId,
}

/// A file that contributed nothing, and why.
#[derive(Debug)]
pub struct Rejection {
    pub path: PathBuf,
    pub reason: RejectReason,
}

#[derive(Debug, thiserror::Error)]
pub enum RejectReason {
    #[error(transparent)]
    Unreadable(#[from] LoadError),

    #[error("missing _id or endProduct")]
    MissingField,

    #[error("duplicate recipe id '{friendly_id}' (id={id})")]
    Duplicate { friendly_id: String, id: RecipeId },
}

/// Identifiers already present in the catalog or accepted this run.
#[derive(Debug, Default)]
pub struct IdRegistry(HashSet<RecipeId>);

impl IdRegistry {
    pub fn seeded_from<'a>(entries: impl IntoIterator<Item = &'a RecipeEntry>) -> Self {
        Self(entries.into_iter().map(|e| e.id.clone()).collect())
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.0.contains(id)
    }

    /// Claims `id`. Returns `false` if it was already taken.
    pub fn claim(&mut self, id: RecipeId) -> bool {
        self.0.insert(id)
    }
}

/// Merge loaded recipe files into the catalog, in order.
///
/// Per-file problems are logged and recorded in the report; they never stop
/// the run. The only fatal condition is a catalog without a recipe list, in
/// which case no file is looked at.
pub fn ingest(
    production: &mut Production,
    files: impl IntoIterator<Item = LoadedFile>,
) -> Result<IngestReport, IngestError> {
    let Some(recipes) = production.recipes.as_mut() else {
        error!("production catalog has no recipe list; nothing ingested");
        return Err(IngestError::MissingRecipes);
    };

    info!(count = recipes.len(), "existing recipe count");

    let mut registry = IdRegistry::seeded_from(recipes.iter());
    let mut report = IngestReport::default();

    for file in files {
        match ingest_file(file.outcome, &registry) {
            Ok((friendly_id, entry)) => {
                info!(
                    outcome = "injected",
                    path = %file.path.display(),
                    friendly_id = %friendly_id,
                    id = %entry.id,
                    "injected recipe"
                );
                let claimed = registry.claim(entry.id.clone());
                debug_assert!(claimed, "accepted id {} was already claimed", entry.id);
                report.injected.push(Injected {
                    path: file.path,
                    friendly_id,
                    id: entry.id.clone(),
                });
                recipes.push(entry);
            }
            Err(reason) => {
                error!(path = %file.path.display(), %reason, "rejected recipe file");
                report.rejected.push(Rejection {
                    path: file.path,
                    reason,
                });
            }
        }
    }

    info!(
        injected = report.injected_count(),
        rejected = report.rejected.len(),
        total = recipes.len(),
        "recipe ingestion complete"
    );

    Ok(report)
}

/// Turn one file's parse outcome into a catalog entry, without side effects.
///
/// Returns the friendly id alongside the entry for logging.
fn ingest_file(
    outcome: Result<JsonObject, LoadError>,
    registry: &IdRegistry,
) -> Result<(String, RecipeEntry), RejectReason> {
    let obj = outcome?;

    let (Some(friendly_id), Some(end_product)) = (
        candidate::non_blank_str(&obj, "_id"),
        candidate::non_blank_str(&obj, "endProduct"),
    ) else {
        return Err(RejectReason::MissingField);
    };

    let id = RecipeId::derive(friendly_id);
    if registry.contains(&id) {
        return Err(RejectReason::Duplicate {
            friendly_id: friendly_id.to_string(),
            id,
        });
    }

    let fields = CandidateFields::from_object(&obj);
    let requirements = build_requirements(&obj, fields.area_type, fields.required_level);

    let entry = RecipeEntry {
        id,
        area_type: fields.area_type,
        requirements: requirements.into_iter().map(Into::into).collect(),
        production_time: fields.production_time,
        need_fuel_for_all_production_time: fields.need_fuel_for_all_production_time,
        locked: false,
        end_product: end_product.to_string(),
        continuous: false,
        count: fields.count,
        production_limit_count: 0,
        is_encoded: false,
        is_code_production: false,
        extra: serde_json::Map::new(),
    };

    Ok((friendly_id.to_string(), entry))
}
