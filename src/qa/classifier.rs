//! Keyword-rule question classifier.
//!
//! A fixed, ordered rule table: the first rule whose keyword set hits the
//! lowercased input wins, so declaration order is the tie-break. Unmatched
//! text falls through to `General`.

use serde::{Deserialize, Serialize};

use crate::astro::gateway::Endpoint;

/// Question categories the bot can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Career,
    Marriage,
    Health,
    Timing,
    General,
}

impl QuestionCategory {
    /// Supplementary endpoint consulted for this category, if any.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Career => Some(Endpoint::D10Chart),
            Self::Marriage => Some(Endpoint::NavamsaChart),
            Self::Health => Some(Endpoint::D30Chart),
            Self::Timing => Some(Endpoint::AbhijitMuhurat),
            Self::General => None,
        }
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Career => "career",
            Self::Marriage => "marriage",
            Self::Health => "health",
            Self::Timing => "timing",
            Self::General => "general",
        };
        f.write_str(s)
    }
}

struct Rule {
    category: QuestionCategory,
    keywords: &'static [&'static str],
}

/// Declaration order is the tie-break: text matching several rules takes
/// the first one listed here.
const RULES: &[Rule] = &[
    Rule {
        category: QuestionCategory::Career,
        keywords: &["job", "career", "work", "business", "profession"],
    },
    Rule {
        category: QuestionCategory::Marriage,
        keywords: &[
            "marriage",
            "married",
            "marry",
            "spouse",
            "partner",
            "wedding",
            "relationship",
        ],
    },
    Rule {
        category: QuestionCategory::Health,
        keywords: &["health", "disease", "illness", "sick"],
    },
    Rule {
        category: QuestionCategory::Timing,
        keywords: &["when", "timing", "muhurat", "today"],
    },
];

/// Classify a free-text question. Total and deterministic: every input maps
/// to exactly one category via case-insensitive substring containment.
pub fn classify(text: &str) -> QuestionCategory {
    let lower = text.to_lowercase();
    for rule in RULES {
        if rule.keywords.iter().any(|kw| lower.contains(kw)) {
            return rule.category;
        }
    }
    QuestionCategory::General
}
