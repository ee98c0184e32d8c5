//! aviacode — multilingual city-name resolution engine.
//!
//! Resolves free-form Russian/Uzbek place names (misspelled, transliterated,
//! or grammatically inflected) to canonical IATA-style city codes, and
//! renders codes back into localized labels.

pub mod catalog;
pub mod label;
pub mod resolver;
pub mod server;

pub use catalog::{Catalog, CatalogError, CityRecord};
pub use label::render_label;
pub use resolver::{
    AliasStore, HttpDirectory, Lang, MatchSource, RemoteConfig, RemoteDirectory, Resolution,
    ResolutionEngine, ResolveError,
};
