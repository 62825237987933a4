//! Query parameter types for the bestiary handlers.
//!
//! Each struct deserializes straight from the query string and converts into
//! the validated query model from `bestiary_core::query`.

use bestiary_core::creature::{MAX_DANGER_LEVEL, MIN_DANGER_LEVEL};
use bestiary_core::error::CoreError;
use bestiary_core::query::{CreatureFilter, CreatureQuery, Page, SortKey, SortOrder};
use serde::Deserialize;

/// Default exclusive lower bound for `GET /dangerous`: a creature is
/// dangerous when its level is strictly above this.
pub const DEFAULT_DANGER_THRESHOLD: i32 = 50;

/// Default upper bound for `GET /dangerous`.
pub const DEFAULT_DANGEROUS_MAX: i32 = 100;

/// Sorting and pagination (`?limit=&offset=&sort_by=&order=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<SortKey>,
    pub order: Option<SortOrder>,
}

impl ListParams {
    /// Build an unfiltered query, or a query over the given filter.
    pub fn into_query(self, filter: CreatureFilter) -> Result<CreatureQuery, CoreError> {
        Ok(CreatureQuery {
            filter,
            sort: self.sort_by.unwrap_or_default(),
            order: self.order.unwrap_or_default(),
            page: Page::new(self.limit, self.offset)?,
        })
    }
}

/// Parameters for `GET /search`.
///
/// Kept flat rather than `#[serde(flatten)]`-ing [`ListParams`]: flattened
/// query structs lose their numeric parsing.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Name prefix, matched case-insensitively.
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_danger: Option<i32>,
    pub max_danger: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<SortKey>,
    pub order: Option<SortOrder>,
}

impl SearchParams {
    pub fn into_query(self) -> Result<CreatureQuery, CoreError> {
        let filter = CreatureFilter::new(self.q, self.category, self.min_danger, self.max_danger)?;
        ListParams {
            limit: self.limit,
            offset: self.offset,
            sort_by: self.sort_by,
            order: self.order,
        }
        .into_query(filter)
    }
}

/// Danger range for `GET /dangerous`.
///
/// The lower bound is either `threshold` (exclusive) or `min` (inclusive),
/// never both. Without either, levels above [`DEFAULT_DANGER_THRESHOLD`]
/// qualify.
#[derive(Debug, Default, Deserialize)]
pub struct DangerRangeParams {
    pub threshold: Option<i32>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl DangerRangeParams {
    /// Resolve into an inclusive `(min, max)` pair and validate it.
    pub fn resolve(self) -> Result<(i32, i32), CoreError> {
        let min = match (self.threshold, self.min) {
            (Some(_), Some(_)) => {
                return Err(CoreError::Validation(
                    "threshold and min cannot be combined".into(),
                ))
            }
            (Some(threshold), None) => exclusive_to_inclusive(threshold)?,
            (None, Some(min)) => min,
            (None, None) => DEFAULT_DANGER_THRESHOLD + 1,
        };
        let max = self.max.unwrap_or(DEFAULT_DANGEROUS_MAX);
        CreatureFilter::new(None, None, Some(min), Some(max))?;
        Ok((min, max))
    }
}

fn exclusive_to_inclusive(threshold: i32) -> Result<i32, CoreError> {
    if !(MIN_DANGER_LEVEL - 1..MAX_DANGER_LEVEL).contains(&threshold) {
        return Err(CoreError::Validation(format!(
            "threshold must be between {} and {}, got {threshold}",
            MIN_DANGER_LEVEL - 1,
            MAX_DANGER_LEVEL - 1
        )));
    }
    Ok(threshold + 1)
}

/// Optional category restriction for `GET /random`.
#[derive(Debug, Default, Deserialize)]
pub struct RandomParams {
    pub category: Option<String>,
}

impl RandomParams {
    /// The category, with blank values treated as absent.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Output format for `GET /export`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}
