//! The point schedule for attestation categories.
//!
//! A `ScoringTable` is a read-only value: build one with [`standard`] (the
//! hand-maintained schedule below) or [`from_entries`] (alternate schedules),
//! then only look points up. An attestation's points are computed once at
//! submission and frozen on the record, so later schedule changes never touch
//! historical scores.
//!
//! [`standard`]: ScoringTable::standard
//! [`from_entries`]: ScoringTable::from_entries

use std::collections::HashMap;

/// The hand-maintained schedule: (category, sub-category, points).
///
/// Category and sub-category labels are matched exactly (case-sensitive,
/// accents included) against what the submission form sends.
const STANDARD_SCHEDULE: &[(&str, &str, i64)] = &[
    ("Cursus Médecine", "UE supplémentaire facultative", 10),
    ("Cursus Hors Médecine", "Année(s) de formation", 10),
    ("Cursus Hors Médecine", "Master 1", 40),
    ("Cursus Hors Médecine", "Master 2", 60),
    ("Cursus Hors Médecine", "Thèse d'université", 60),
    ("Cursus Hors Médecine", "Publication d'articles", 10),
    ("Engagement Étudiant", "UE d'engagement associatif", 40),
    ("Engagement Étudiant", "UE d'engagement pédagogique", 40),
    ("Engagement Étudiant", "UE d'engagement social et civique", 40),
    ("Expérience Professionnelle", "70h", 10),
    ("Expérience Professionnelle", "140h", 20),
    ("Mobilité", "Stage court hors subdivision", 15),
    ("Mobilité", "Stage court international", 20),
    ("Mobilité", "Stage Erasmus 1 semestre", 40),
    ("Mobilité", "Stage Erasmus 2 semestres", 60),
    ("Linguistique", "Niveau de langue B2", 10),
    ("Linguistique", "Niveau de langue C1", 20),
    ("Linguistique", "Niveau de langue C2", 30),
];

/// Mapping from (category, sub-category) to the points an attestation earns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringTable {
    entries: HashMap<(String, String), i64>,
}

impl ScoringTable {
    /// The standard schedule.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_SCHEDULE.iter().copied())
    }

    /// Build a table from explicit entries (alternate or test schedules).
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, i64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(category, sub, points)| ((category.to_string(), sub.to_string()), points))
                .collect(),
        }
    }

    /// An empty table: every lookup scores zero.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Points for a (category, sub-category) pair.
    ///
    /// Total function: unknown combinations score 0 rather than failing, so
    /// a submission is never blocked at intake; review is the control point.
    #[must_use]
    pub fn points(&self, category: &str, sub_category: &str) -> i64 {
        self.entries
            .get(&(category.to_string(), sub_category.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of scheduled (category, sub-category) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::standard()
    }
}
