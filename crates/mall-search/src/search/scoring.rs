//! Field-boost tables for relevance scoring.

use serde::Serialize;

use crate::search::fields;

/// How scores from multiple functions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    Sum,
}

impl ScoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Sum => "sum",
        }
    }
}

/// A field and the weight of its contribution to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBoost {
    pub field: &'static str,
    pub boost: u32,
}

impl FieldBoost {
    pub const fn new(field: &'static str, boost: u32) -> Self {
        Self { field, boost }
    }

    /// Multi-match field spec, e.g. `name^10`. Unit weight is left bare.
    pub fn field_spec(&self) -> String {
        if self.boost == 1 {
            self.field.to_string()
        } else {
            format!("{}^{}", self.field, self.boost)
        }
    }
}

/// A named boost table with optional score combination and threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub boosts: &'static [FieldBoost],
    pub score_mode: Option<ScoreMode>,
    /// Documents scoring below this are dropped even if they match.
    pub min_score: Option<u32>,
}

impl ScoringPolicy {
    /// Keyword relevance for filtered search.
    pub const FILTERED_SEARCH: ScoringPolicy = ScoringPolicy {
        boosts: &[
            FieldBoost::new(fields::NAME, 10),
            FieldBoost::new(fields::SUB_TITLE, 5),
            FieldBoost::new(fields::KEYWORDS, 1),
        ],
        score_mode: Some(ScoreMode::Sum),
        min_score: Some(2),
    };

    /// Similarity to a source product. Every entry is an optional clause.
    pub const RECOMMENDATION: ScoringPolicy = ScoringPolicy {
        boosts: &[
            FieldBoost::new(fields::NAME, 8),
            FieldBoost::new(fields::SUB_TITLE, 2),
            FieldBoost::new(fields::KEYWORDS, 2),
            FieldBoost::new(fields::BRAND_ID, 5),
            FieldBoost::new(fields::PRODUCT_CATEGORY_ID, 3),
        ],
        score_mode: None,
        min_score: None,
    };

    /// Field specs for a multi-match clause.
    pub fn field_specs(&self) -> Vec<String> {
        self.boosts.iter().map(FieldBoost::field_spec).collect()
    }

    /// Boost for a field, if the table weights it.
    pub fn boost_for(&self, field: &str) -> Option<u32> {
        self.boosts.iter().find(|b| b.field == field).map(|b| b.boost)
    }
}
