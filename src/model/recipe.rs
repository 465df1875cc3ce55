//! Catalog entries and the production catalog that holds them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CatalogRequirement, RecipeId};

/// A production recipe as the catalog stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeEntry {
    #[serde(rename = "_id")]
    pub id: RecipeId,
    pub area_type: i32,
    pub requirements: Vec<CatalogRequirement>,
    pub production_time: f64,
    pub need_fuel_for_all_production_time: bool,
    pub locked: bool,
    pub end_product: String,
    pub continuous: bool,
    pub count: i32,
    pub production_limit_count: i32,
    pub is_encoded: bool,
    pub is_code_production: bool,

    /// Host fields this crate does not interpret, kept for round-tripping.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The host's production catalog.
///
/// `recipes` is optional because the host document may lack it; without a
/// recipe list there is nothing to merge into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Production {
    #[serde(default)]
    pub recipes: Option<Vec<RecipeEntry>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Production {
    /// A catalog with an empty recipe list.
    pub fn empty() -> Self {
        Self {
            recipes: Some(Vec::new()),
            extra: Map::new(),
        }
    }
}
