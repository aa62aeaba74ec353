//! Sort policy for filtered search.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::search::fields;

/// Relevance score pseudo-field understood by the engine.
pub const SCORE_FIELD: &str = "_score";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort options, addressed by the integer codes callers send.
///
/// | code | order |
/// |---|---|
/// | 1 | newest first (`id` desc) |
/// | 2 | best selling (`sale` desc) |
/// | 3 | price, low to high |
/// | 4 | price, high to low |
/// | anything else | relevance |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    #[default]
    Relevance,
    Newest,
    BestSelling,
    PriceAsc,
    PriceDesc,
}

impl SortOption {
    /// Map a sort code to an option. Total: unknown codes mean relevance.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SortOption::Newest,
            2 => SortOption::BestSelling,
            3 => SortOption::PriceAsc,
            4 => SortOption::PriceDesc,
            _ => SortOption::Relevance,
        }
    }

    /// Resolve a sort code straight to its `(field, direction)` pair.
    pub fn resolve(code: i32) -> (&'static str, SortDirection) {
        let option = Self::from_code(code);
        (option.field(), option.direction())
    }

    /// Canonical code for this option.
    pub fn code(&self) -> i32 {
        match self {
            SortOption::Relevance => 0,
            SortOption::Newest => 1,
            SortOption::BestSelling => 2,
            SortOption::PriceAsc => 3,
            SortOption::PriceDesc => 4,
        }
    }

    /// Document field to sort on.
    pub fn field(&self) -> &'static str {
        match self {
            SortOption::Relevance => SCORE_FIELD,
            SortOption::Newest => fields::ID,
            SortOption::BestSelling => fields::SALE,
            SortOption::PriceAsc | SortOption::PriceDesc => fields::PRICE,
        }
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            SortOption::PriceAsc => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::Newest => "Newest",
            SortOption::BestSelling => "Best Selling",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }

    /// Single sort directive: `{ field: { "order": direction } }`.
    pub fn to_sort_clause(&self) -> Value {
        let mut clause = serde_json::Map::new();
        clause.insert(
            self.field().to_string(),
            json!({ "order": self.direction().as_str() }),
        );
        Value::Object(clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table() {
        assert_eq!(SortOption::resolve(1), ("id", SortDirection::Desc));
        assert_eq!(SortOption::resolve(2), ("sale", SortDirection::Desc));
        assert_eq!(SortOption::resolve(3), ("price", SortDirection::Asc));
        assert_eq!(SortOption::resolve(4), ("price", SortDirection::Desc));
        assert_eq!(SortOption::resolve(0), ("_score", SortDirection::Desc));
    }

    #[test]
    fn test_resolve_is_total() {
        for code in [i32::MIN, -1, 5, 42, i32::MAX] {
            assert_eq!(SortOption::resolve(code), (SCORE_FIELD, SortDirection::Desc));
        }
    }

    #[test]
    fn test_code_round_trip() {
        for code in 0..=4 {
            assert_eq!(SortOption::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_sort_clause_shape() {
        let clause = SortOption::PriceAsc.to_sort_clause();
        assert_eq!(clause, json!({ "price": { "order": "asc" } }));
    }
}
