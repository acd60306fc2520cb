use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::errors::LexiconError;

/// Built-in vocabulary in declaration order.
const BUILTIN_WEIGHTS: [(&str, f64); 19] = [
    ("explore", 0.3),
    ("the", 0.15),
    ("ancient", 0.2),
    ("ruins", 0.1),
    ("rest", 0.12),
    ("at", 0.16),
    ("a", 0.14),
    ("quiet", 0.1),
    ("inn", 0.2),
    ("climb", 0.18),
    ("towering", 0.2),
    ("mountains", 0.2),
    ("venture", 0.12),
    ("into", 0.17),
    ("dense", 0.16),
    ("jungle", 0.14),
    ("follow", 0.12),
    ("mysterious", 0.14),
    ("map", 0.13),
];

/// Built-in token categories. "the", "at" and "a" have no category.
const BUILTIN_CLUSTERS: [(&str, &str); 16] = [
    ("explore", "Exploration"),
    ("ancient", "Exploration"),
    ("ruins", "Exploration"),
    ("rest", "Relaxation"),
    ("quiet", "Relaxation"),
    ("inn", "Relaxation"),
    ("climb", "Exploration"),
    ("towering", "Exploration"),
    ("mountains", "Exploration"),
    ("venture", "Adventure"),
    ("into", "Adventure"),
    ("dense", "Adventure"),
    ("jungle", "Adventure"),
    ("follow", "Adventure"),
    ("mysterious", "Adventure"),
    ("map", "Adventure"),
];

/// A candidate token and its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub token: String,
    pub weight: f64,
}

/// Fixed, ordered token → weight mapping.
///
/// Weights are relative desirability scores in `(0, 1]`; they are not required
/// to sum to one. Declaration order is preserved and is observable through
/// [`Lexicon::entries`] and the strategies that break ties by it.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    index: HashMap<String, usize>,
}

impl Lexicon {
    /// Build a lexicon from `(token, weight)` pairs in declaration order.
    pub fn new<I, S>(entries: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut lexicon = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for (token, weight) in entries {
            let token = token.into();
            if token.trim().is_empty() {
                return Err(LexiconError::EmptyToken);
            }
            if weight.is_nan() || weight <= 0.0 || weight > 1.0 {
                return Err(LexiconError::InvalidWeight { token, weight });
            }
            if lexicon.index.contains_key(&token) {
                return Err(LexiconError::DuplicateToken(token));
            }
            lexicon.index.insert(token.clone(), lexicon.entries.len());
            lexicon.entries.push(LexiconEntry { token, weight });
        }

        if lexicon.entries.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(lexicon)
    }

    /// The travel-story vocabulary used when no override is configured.
    pub fn builtin() -> Self {
        let mut entries = Vec::with_capacity(BUILTIN_WEIGHTS.len());
        let mut index = HashMap::with_capacity(BUILTIN_WEIGHTS.len());
        for (position, (token, weight)) in BUILTIN_WEIGHTS.iter().enumerate() {
            index.insert((*token).to_string(), position);
            entries.push(LexiconEntry {
                token: (*token).to_string(),
                weight: *weight,
            });
        }
        Self { entries, index }
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// All tokens in declaration order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.token.as_str())
    }

    /// Weight of `token`, if it is part of the lexicon.
    pub fn weight(&self, token: &str) -> Option<f64> {
        self.index.get(token).map(|&i| self.entries[i].weight)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed lexicon; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all raw weights.
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }

    /// Entries ranked by weight, highest first.
    ///
    /// The sort is stable, so equal weights keep declaration order.
    pub fn ranked(&self) -> Vec<&LexiconEntry> {
        let mut ranked: Vec<&LexiconEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        ranked
    }
}

/// Ordered token → category assignment used by stratified and cluster sampling.
#[derive(Debug, Clone)]
pub struct ClusterMap {
    assignments: Vec<(String, String)>,
}

impl ClusterMap {
    /// Build a cluster map, checking every token against `lexicon`.
    pub fn new<I, T, C>(lexicon: &Lexicon, assignments: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<String>,
        C: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for (token, category) in assignments {
            let token = token.into();
            let category = category.into();
            if !lexicon.contains(&token) {
                return Err(LexiconError::UnknownClusteredToken(token));
            }
            if category.trim().is_empty() {
                return Err(LexiconError::EmptyCategory(token));
            }
            if !seen.insert(token.clone()) {
                return Err(LexiconError::DuplicateToken(token));
            }
            pairs.push((token, category));
        }
        Ok(Self { assignments: pairs })
    }

    /// Categories of the built-in vocabulary.
    pub fn builtin() -> Self {
        Self {
            assignments: BUILTIN_CLUSTERS
                .iter()
                .map(|(token, category)| ((*token).to_string(), (*category).to_string()))
                .collect(),
        }
    }

    /// Every `(token, category)` pair in declaration order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(token, category)| (token.as_str(), category.as_str()))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for (_, category) in &self.assignments {
            if !categories.contains(&category.as_str()) {
                categories.push(category);
            }
        }
        categories
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.assignments.iter().any(|(_, c)| c == category)
    }

    /// Tokens assigned to `category`, in declaration order.
    pub fn tokens_in(&self, category: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, c)| c == category)
            .map(|(token, _)| token.as_str())
            .collect()
    }

    pub fn category_of(&self, token: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, category)| category.as_str())
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// A lexicon together with its cluster map.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub lexicon: Lexicon,
    pub clusters: ClusterMap,
}

impl Vocabulary {
    pub fn builtin() -> Self {
        Self {
            lexicon: Lexicon::builtin(),
            clusters: ClusterMap::builtin(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
