//! Recipe intake: merge user-authored production recipes into a catalog.
//!
//! Recipe files are discovered under a recipes directory ([`discover`]),
//! mapped onto canonical identifiers and validated ([`ingest`]), and appended
//! to the host's production catalog ([`model::Production`]) without
//! colliding with anything already there.

pub mod catalog;
pub mod config;
pub mod discover;
pub mod ingest;
pub mod model;
