//! Core types for the resolution subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ru,
    Uz,
}

impl Lang {
    /// Language tag used as a key in `name_translations`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::Uz => "uz",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" => Ok(Self::Ru),
            "uz" => Ok(Self::Uz),
            other => Err(format!("Unknown language '{}'. Use 'ru' or 'uz'.", other)),
        }
    }
}

/// Which strategy produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Alias,
    Exact,
    Transliterated,
    Fuzzy,
    Remote,
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alias => write!(f, "alias"),
            Self::Exact => write!(f, "exact"),
            Self::Transliterated => write!(f, "transliterated"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// A successful resolution with provenance.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub code: String,
    pub source: MatchSource,
}

/// Resolution errors surfaced to the caller.
///
/// `NotFound` is the expected miss outcome, not a fault: strategy-level
/// failures (remote transport errors included) never escape the cascade.
#[derive(Debug)]
pub enum ResolveError {
    EmptyInput,
    NotFound(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "No city name given"),
            Self::NotFound(q) => write!(f, "City not recognized: '{}'", q),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Remote directory client errors. Recoverable: the cascade treats them
/// as a failed strategy.
#[derive(Debug)]
pub enum RemoteError {
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Alias persistence errors. Recoverable: the in-memory entry survives
/// and the write is retried on the next learned resolution.
#[derive(Debug)]
pub enum AliasError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for AliasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Cannot write alias store: {}", e),
            Self::Serialize(e) => write!(f, "Cannot serialize alias store: {}", e),
        }
    }
}

impl std::error::Error for AliasError {}

impl From<std::io::Error> for AliasError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for AliasError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_lang_roundtrip() {
        assert_eq!(Lang::from_str("ru").unwrap(), Lang::Ru);
        assert_eq!(Lang::from_str("UZ").unwrap(), Lang::Uz);
        assert!(Lang::from_str("en").is_err());
        assert_eq!(Lang::Uz.tag(), "uz");
    }

    #[test]
    fn test_source_display() {
        assert_eq!(MatchSource::Transliterated.to_string(), "transliterated");
        assert_eq!(MatchSource::Alias.to_string(), "alias");
    }
}
