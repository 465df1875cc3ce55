//! Core data model: the production catalog and what goes into it.
//!
//! A catalog is a list of recipe entries, each keyed by a canonical
//! [`RecipeId`] and carrying an ordered list of [`Requirement`]s.

mod recipe;
mod recipe_id;
mod requirement;

pub use recipe::{Production, RecipeEntry};
pub use recipe_id::{InvalidRecipeId, RECIPE_ID_LEN, RecipeId, is_recipe_id};
pub use requirement::{CatalogRequirement, ItemRequirement, Requirement};
