//! The static city directory.
//!
//! Loaded once at startup from the JSON resource compiled into the binary.
//! A catalog that fails to parse or validate is fatal: the engine cannot
//! resolve anything without it. After loading the catalog is read-only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Embedded directory source. Schema: array of records with `code`,
/// `name`, `name_translations` (lang tag → name) and `cases`
/// (grammatical-case label → inflected form).
const CITIES_JSON: &str = include_str!("../data/cities.json");

/// One known city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityRecord {
    /// Stable 3-letter uppercase IATA-style code, unique across the catalog.
    pub code: String,
    /// Canonical display name in the base language (Russian).
    pub name: String,
    /// Localized names keyed by language tag ("ru", "uz").
    #[serde(default)]
    pub name_translations: HashMap<String, String>,
    /// Inflected Russian surface forms keyed by case label
    /// ("ro", "da", "vi", "tv", "pr"). Users type "в Ташкенте",
    /// not "Ташкент", so these are first-class match targets.
    #[serde(default)]
    pub cases: HashMap<String, String>,
}

impl CityRecord {
    /// Localized name for `lang`, falling back to the canonical name.
    pub fn localized_name(&self, lang: &str) -> &str {
        self.name_translations
            .get(lang)
            .map(String::as_str)
            .unwrap_or(&self.name)
    }
}

/// Catalog load/validation errors. All fatal at startup.
#[derive(Debug)]
pub enum CatalogError {
    Parse(String),
    Empty,
    BadCode(String),
    DuplicateCode(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Cannot parse city directory: {}", msg),
            Self::Empty => write!(f, "City directory is empty"),
            Self::BadCode(c) => write!(f, "Invalid city code '{}': expected 3 uppercase letters", c),
            Self::DuplicateCode(c) => write!(f, "Duplicate city code '{}'", c),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The immutable in-memory city directory.
pub struct Catalog {
    records: Vec<CityRecord>,
    by_code: HashMap<String, usize>,
}

impl Catalog {
    /// Load the compiled-in directory.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(CITIES_JSON)
    }

    /// Parse and validate a directory from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CityRecord> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_code = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if record.code.len() != 3 || !record.code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(CatalogError::BadCode(record.code.clone()));
            }
            if by_code.insert(record.code.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateCode(record.code.clone()));
            }
        }

        Ok(Self { records, by_code })
    }

    /// Look up a record by code, case-insensitively.
    pub fn get(&self, code: &str) -> Option<&CityRecord> {
        let key = code.trim().to_uppercase();
        self.by_code.get(&key).map(|&idx| &self.records[idx])
    }

    /// All records in load order.
    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every surface form a user might type, lower-cased, paired with its
    /// code: the code itself, the canonical name, every translation and
    /// every inflected case. This is the candidate pool for fuzzy matching.
    pub fn surface_forms(&self) -> Vec<(String, &str)> {
        let mut forms = Vec::new();
        for record in &self.records {
            forms.push((record.code.to_lowercase(), record.code.as_str()));
            forms.push((record.name.to_lowercase(), record.code.as_str()));
            for name in record.name_translations.values() {
                forms.push((name.to_lowercase(), record.code.as_str()));
            }
            for name in record.cases.values() {
                forms.push((name.to_lowercase(), record.code.as_str()));
            }
        }
        forms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.get("TAS").is_some());
    }

    #[test]
    fn test_get_case_insensitive() {
        let catalog = Catalog::embedded().unwrap();
        let record = catalog.get(" tas ").unwrap();
        assert_eq!(record.code, "TAS");
        assert_eq!(record.name, "Ташкент");
    }

    #[test]
    fn test_get_unknown() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.get("XXX").is_none());
    }

    #[test]
    fn test_localized_name_fallback() {
        let catalog = Catalog::embedded().unwrap();
        let record = catalog.get("TAS").unwrap();
        assert_eq!(record.localized_name("uz"), "Toshkent");
        assert_eq!(record.localized_name("de"), "Ташкент");
    }

    #[test]
    fn test_codes_unique_and_well_formed() {
        let catalog = Catalog::embedded().unwrap();
        let mut seen = std::collections::HashSet::new();
        for record in catalog.records() {
            assert_eq!(record.code.len(), 3);
            assert!(record.code.chars().all(|c| c.is_ascii_uppercase()));
            assert!(seen.insert(record.code.clone()));
        }
    }

    #[test]
    fn test_every_record_has_both_languages() {
        let catalog = Catalog::embedded().unwrap();
        for record in catalog.records() {
            assert!(record.name_translations.contains_key("ru"), "{}", record.code);
            assert!(record.name_translations.contains_key("uz"), "{}", record.code);
        }
    }

    #[test]
    fn test_reject_invalid_json() {
        assert!(matches!(Catalog::from_json("not json"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_reject_empty() {
        assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_reject_bad_code() {
        let json = r#"[{"code": "tas", "name": "Ташкент"}]"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::BadCode(_))));
    }

    #[test]
    fn test_reject_duplicate_code() {
        let json = r#"[
            {"code": "TAS", "name": "Ташкент"},
            {"code": "TAS", "name": "Другой"}
        ]"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::DuplicateCode(_))));
    }

    #[test]
    fn test_surface_forms_cover_inflections() {
        let catalog = Catalog::embedded().unwrap();
        let forms = catalog.surface_forms();
        assert!(forms.iter().any(|(form, code)| form == "ташкенте" && *code == "TAS"));
        assert!(forms.iter().any(|(form, code)| form == "toshkent" && *code == "TAS"));
        assert!(forms.iter().any(|(form, code)| form == "tas" && *code == "TAS"));
    }
}
