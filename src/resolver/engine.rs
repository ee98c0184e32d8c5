//! The matcher cascade — orchestrates resolution strategies in order.
//!
//! Strategy order: alias → exact → transliterated → fuzzy → remote.
//! Cheapest and most precise first; each strategy runs only if the previous
//! one failed, and the first hit terminates the cascade. Every hit beyond
//! alias/exact is written back to the alias store so the same misspelling
//! is an O(1) lookup on the next occurrence, by any user.

use super::aliases::AliasStore;
use super::fuzzy;
use super::remote::{RemoteCity, RemoteDirectory};
use super::translit;
use super::types::{MatchSource, Resolution, ResolveError};
use crate::catalog::Catalog;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A normalized query, with its transliteration computed once up front.
pub struct Query {
    pub normalized: String,
    pub transliterated: String,
}

impl Query {
    /// Trim and case-fold raw input. Returns `None` for blank text.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        let transliterated = translit::to_cyrillic(&normalized);
        Some(Self {
            normalized,
            transliterated,
        })
    }
}

/// A successful strategy outcome. `learn` marks results worth caching.
struct Hit {
    code: String,
    source: MatchSource,
    learn: bool,
}

/// One matching capability in the cascade.
trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn attempt(&self, query: &Query) -> Option<Hit>;
}

// ─── 1. Alias lookup ─────────────────────────────────────────────

struct AliasLookup {
    aliases: Arc<AliasStore>,
}

impl Strategy for AliasLookup {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn attempt(&self, query: &Query) -> Option<Hit> {
        self.aliases.get(&query.normalized).map(|code| Hit {
            code,
            source: MatchSource::Alias,
            learn: false,
        })
    }
}

// ─── 2. Exact structural match ───────────────────────────────────

struct ExactMatch {
    catalog: Arc<Catalog>,
}

impl Strategy for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn attempt(&self, query: &Query) -> Option<Hit> {
        let q = query.normalized.as_str();
        for record in self.catalog.records() {
            let hit = record.code.to_lowercase() == q
                || record.name.to_lowercase() == q
                || record.name_translations.values().any(|v| v.to_lowercase() == q)
                || record.cases.values().any(|v| v.to_lowercase() == q);
            if hit {
                return Some(Hit {
                    code: record.code.clone(),
                    source: MatchSource::Exact,
                    learn: false,
                });
            }
        }
        None
    }
}

// ─── 3. Transliterated exact match ───────────────────────────────

/// Repeats the exact match with the query folded into Cyrillic, against
/// names and translations only: inflected transliterations are not
/// generated, so `cases` stays out of this pass.
struct TranslitMatch {
    catalog: Arc<Catalog>,
}

impl Strategy for TranslitMatch {
    fn name(&self) -> &'static str {
        "transliterated"
    }

    fn attempt(&self, query: &Query) -> Option<Hit> {
        if query.transliterated == query.normalized {
            // Already Cyrillic; the exact pass covered this.
            return None;
        }
        let t = query.transliterated.as_str();
        for record in self.catalog.records() {
            let hit = record.name.to_lowercase() == t
                || record.name_translations.values().any(|v| v.to_lowercase() == t);
            if hit {
                return Some(Hit {
                    code: record.code.clone(),
                    source: MatchSource::Transliterated,
                    learn: true,
                });
            }
        }
        None
    }
}

// ─── 4. Fuzzy match ──────────────────────────────────────────────

struct FuzzyMatch {
    catalog: Arc<Catalog>,
}

impl Strategy for FuzzyMatch {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn attempt(&self, query: &Query) -> Option<Hit> {
        let forms = self.catalog.surface_forms();

        let mut best = fuzzy::best_match(&query.normalized, &forms);
        if query.transliterated != query.normalized {
            let translit_best = fuzzy::best_match(&query.transliterated, &forms);
            best = match (best, translit_best) {
                (Some(a), Some(b)) => Some(if b.2 > a.2 { b } else { a }),
                (a, b) => a.or(b),
            };
        }

        best.map(|(code, form, score)| {
            debug!(query = %query.normalized, matched = form, score, "fuzzy candidate accepted");
            Hit {
                code: code.to_string(),
                source: MatchSource::Fuzzy,
                learn: true,
            }
        })
    }
}

// ─── 5. Remote directory lookup ──────────────────────────────────

struct RemoteLookup {
    remote: Arc<dyn RemoteDirectory>,
}

impl RemoteLookup {
    fn scan(query: &Query, cities: &[RemoteCity]) -> Option<String> {
        for city in cities {
            if city.code.is_empty() {
                continue;
            }
            let matched = city.name.to_lowercase() == query.normalized
                || city.name.to_lowercase() == query.transliterated
                || city
                    .name_translations
                    .values()
                    .any(|v| {
                        let v = v.to_lowercase();
                        v == query.normalized || v == query.transliterated
                    });
            if matched {
                return Some(city.code.clone());
            }
        }
        None
    }
}

impl Strategy for RemoteLookup {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn attempt(&self, query: &Query) -> Option<Hit> {
        // Transport errors are a failed strategy, never a resolution error.
        let cities = match self.remote.search(&query.normalized) {
            Ok(cities) => cities,
            Err(e) => {
                warn!(query = %query.normalized, error = %e, "remote directory lookup failed");
                return None;
            }
        };

        Self::scan(query, &cities).map(|code| Hit {
            code,
            source: MatchSource::Remote,
            learn: true,
        })
    }
}

// ─── Engine ──────────────────────────────────────────────────────

/// The resolution engine: an ordered cascade over a shared catalog and
/// alias store. Cheap to share across requests (`Arc<ResolutionEngine>`);
/// all interior mutability lives in the alias store.
pub struct ResolutionEngine {
    aliases: Arc<AliasStore>,
    strategies: Vec<Box<dyn Strategy>>,
}

impl ResolutionEngine {
    /// Build the cascade. `remote: None` runs offline: the remote strategy
    /// is simply absent and the cascade ends at fuzzy matching.
    pub fn new(
        catalog: Arc<Catalog>,
        aliases: Arc<AliasStore>,
        remote: Option<Arc<dyn RemoteDirectory>>,
    ) -> Self {
        let mut strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(AliasLookup {
                aliases: Arc::clone(&aliases),
            }),
            Box::new(ExactMatch {
                catalog: Arc::clone(&catalog),
            }),
            Box::new(TranslitMatch {
                catalog: Arc::clone(&catalog),
            }),
            Box::new(FuzzyMatch { catalog }),
        ];
        if let Some(remote) = remote {
            strategies.push(Box::new(RemoteLookup { remote }));
        }
        Self { aliases, strategies }
    }

    /// Resolve free-form user text to a city code.
    pub fn resolve(&self, raw: &str) -> Result<Resolution, ResolveError> {
        let query = Query::new(raw).ok_or(ResolveError::EmptyInput)?;
        debug!(input = %query.normalized, "resolving");

        for strategy in &self.strategies {
            let Some(hit) = strategy.attempt(&query) else {
                continue;
            };
            info!(
                input = %query.normalized,
                code = %hit.code,
                strategy = strategy.name(),
                "resolved"
            );
            if hit.learn {
                if let Err(e) = self.aliases.put(&query.normalized, &hit.code) {
                    // Non-fatal: the resolution stands, the write is
                    // retried on a later learned resolution.
                    warn!(alias = %query.normalized, error = %e, "alias persist failed");
                } else {
                    debug!(alias = %query.normalized, code = %hit.code, "alias learned");
                }
            }
            return Ok(Resolution {
                code: hit.code,
                source: hit.source,
            });
        }

        debug!(input = %query.normalized, "no strategy matched");
        Err(ResolveError::NotFound(query.normalized))
    }
}
