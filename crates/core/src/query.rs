//! Filter, sort and pagination model for creature retrieval.
//!
//! The `db` crate turns a [`CreatureQuery`] into SQL; this module owns the
//! rules for what a well-formed query is.

use serde::Deserialize;

use crate::creature::{MAX_DANGER_LEVEL, MIN_DANGER_LEVEL};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Column a result set is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    DangerLevel,
}

impl SortKey {
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DangerLevel => "danger_level",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A validated `LIMIT`/`OFFSET` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// Build a page from raw query parameters.
    ///
    /// Out-of-range values are rejected rather than clamped.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, CoreError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {limit}"
            )));
        }

        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(CoreError::Validation(format!(
                "offset must be >= 0, got {offset}"
            )));
        }

        Ok(Self { limit, offset })
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Predicates combined with logical AND. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatureFilter {
    /// Case-insensitive match against the start of `name` (see [`fold_name`]).
    pub name_prefix: Option<String>,
    /// Exact match on `category`.
    pub category: Option<String>,
    /// Inclusive lower bound on `danger_level`.
    pub min_danger: Option<i32>,
    /// Inclusive upper bound on `danger_level`.
    pub max_danger: Option<i32>,
}

impl CreatureFilter {
    /// Build a filter from raw request values, treating blank strings as absent.
    pub fn new(
        name_prefix: Option<String>,
        category: Option<String>,
        min_danger: Option<i32>,
        max_danger: Option<i32>,
    ) -> Result<Self, CoreError> {
        let filter = Self {
            name_prefix: non_blank(name_prefix),
            category: non_blank(category),
            min_danger,
            max_danger,
        };
        filter.validate()?;
        Ok(filter)
    }

    /// Filter matching a single category exactly.
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.name_prefix.is_none()
            && self.category.is_none()
            && self.min_danger.is_none()
            && self.max_danger.is_none()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_danger_bound("min_danger", self.min_danger)?;
        validate_danger_bound("max_danger", self.max_danger)?;

        if let (Some(min), Some(max)) = (self.min_danger, self.max_danger) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "min_danger ({min}) must not exceed max_danger ({max})"
                )));
            }
        }
        Ok(())
    }
}

fn validate_danger_bound(field: &str, value: Option<i32>) -> Result<(), CoreError> {
    match value {
        Some(v) if !(MIN_DANGER_LEVEL..=MAX_DANGER_LEVEL).contains(&v) => {
            Err(CoreError::Validation(format!(
                "{field} must be between {MIN_DANGER_LEVEL} and {MAX_DANGER_LEVEL}, got {v}"
            )))
        }
        _ => Ok(()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A complete retrieval request: filter, ordering and window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatureQuery {
    pub filter: CreatureFilter,
    pub sort: SortKey,
    pub order: SortOrder,
    pub page: Page,
}

// ---------------------------------------------------------------------------
// LIKE helpers
// ---------------------------------------------------------------------------

/// Case-folded form of a creature name.
///
/// Stored next to `name` and applied to search prefixes, so prefix matching
/// ignores case for every script, not only ASCII.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Escape character used with `LIKE ... ESCAPE`.
pub const LIKE_ESCAPE: char = '\\';

/// Build a `LIKE` pattern matching values that start with `prefix`.
///
/// `%`, `_` and the escape character itself are escaped so user input is
/// matched literally.
pub fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- Page ---------------------------------------------------------------

    #[test]
    fn page_defaults() {
        assert_eq!(Page::new(None, None).unwrap(), Page { limit: 10, offset: 0 });
    }

    #[test]
    fn page_accepts_bounds() {
        assert_eq!(Page::new(Some(1), Some(0)).unwrap().limit, 1);
        assert_eq!(Page::new(Some(100), Some(5)).unwrap().limit, 100);
    }

    #[test]
    fn page_rejects_zero_and_oversized_limit() {
        assert_matches!(Page::new(Some(0), None), Err(CoreError::Validation(_)));
        assert_matches!(Page::new(Some(101), None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn page_rejects_negative_offset() {
        assert_matches!(Page::new(None, Some(-1)), Err(CoreError::Validation(_)));
    }

    // -- CreatureFilter -----------------------------------------------------

    #[test]
    fn blank_strings_are_absent() {
        let filter = CreatureFilter::new(Some("  ".into()), Some(String::new()), None, None)
            .unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn prefix_is_trimmed() {
        let filter = CreatureFilter::new(Some(" Yog ".into()), None, None, None).unwrap();
        assert_eq!(filter.name_prefix.as_deref(), Some("Yog"));
    }

    #[test]
    fn inverted_danger_range_is_rejected() {
        assert_matches!(
            CreatureFilter::new(None, None, Some(80), Some(20)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn danger_bound_outside_scale_is_rejected() {
        assert_matches!(
            CreatureFilter::new(None, None, Some(0), None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            CreatureFilter::new(None, None, None, Some(101)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn equal_bounds_are_allowed() {
        assert!(CreatureFilter::new(None, None, Some(40), Some(40)).is_ok());
    }

    // -- Sorting ------------------------------------------------------------

    #[test]
    fn sort_defaults_to_name_ascending() {
        let query = CreatureQuery::default();
        assert_eq!(query.sort.column(), "name");
        assert_eq!(query.order.keyword(), "ASC");
    }

    #[test]
    fn sort_key_deserializes_snake_case() {
        let key: SortKey = serde_json::from_str("\"danger_level\"").unwrap();
        assert_eq!(key, SortKey::DangerLevel);
        let order: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(order, SortOrder::Desc);
    }

    // -- fold_name ----------------------------------------------------------

    #[test]
    fn fold_name_lowercases_non_ascii() {
        assert_eq!(fold_name("Йог-Сотот"), "йог-сотот");
        assert_eq!(fold_name("Shub-Niggurath"), "shub-niggurath");
    }

    #[test]
    fn folded_prefix_pattern_matches_folded_name() {
        let pattern = like_prefix_pattern(&fold_name("ЙОГ"));
        assert_eq!(pattern, "йог%");
        assert!(fold_name("Йог-Сотот").starts_with(pattern.trim_end_matches('%')));
    }

    // -- like_prefix_pattern ------------------------------------------------

    #[test]
    fn prefix_pattern_appends_wildcard() {
        assert_eq!(like_prefix_pattern("Yog"), "Yog%");
    }

    #[test]
    fn prefix_pattern_escapes_wildcards() {
        assert_eq!(like_prefix_pattern("50%_a\\b"), "50\\%\\_a\\\\b%");
    }
}
