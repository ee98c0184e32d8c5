//! City-name resolution subsystem.
//!
//! Turns free-form, possibly misspelled or transliterated user input into
//! catalog codes via an ordered strategy cascade, learning aliases as it
//! goes, with a remote directory as the last resort.

pub mod aliases;
pub mod engine;
pub mod fuzzy;
pub mod remote;
pub mod translit;
pub mod types;

pub use aliases::AliasStore;
pub use engine::ResolutionEngine;
pub use remote::{HttpDirectory, RemoteCity, RemoteConfig, RemoteDirectory};
pub use types::{AliasError, Lang, MatchSource, RemoteError, Resolution, ResolveError};
