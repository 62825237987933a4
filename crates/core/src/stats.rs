//! Aggregate statistics over the whole bestiary.

use serde::Serialize;

use crate::types::DbId;

/// Summary of one creature at a danger extremum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DangerStat {
    pub id: DbId,
    pub name: String,
    pub danger_level: i32,
}

/// Number of creatures sharing an exact category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

/// Bestiary-wide statistics.
///
/// `safest` and `most_dangerous` are `None` only when the bestiary is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureStats {
    pub total: i64,
    pub average_danger_level: f64,
    pub safest: Option<DangerStat>,
    pub most_dangerous: Option<DangerStat>,
}

impl CreatureStats {
    /// Assemble statistics from raw aggregates.
    ///
    /// `average` is the unrounded mean as reported by the store (`None` for an
    /// empty set).
    pub fn new(
        total: i64,
        average: Option<f64>,
        safest: Option<DangerStat>,
        most_dangerous: Option<DangerStat>,
    ) -> Self {
        Self {
            total,
            average_danger_level: round_to_tenth(average.unwrap_or(0.0)),
            safest,
            most_dangerous,
        }
    }
}

/// Round to one decimal place, half away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_tenth_rounds_half_up() {
        assert_eq!(round_to_tenth(75.0), 75.0);
        assert_eq!(round_to_tenth(66.666_666), 66.7);
        assert_eq!(round_to_tenth(12.25), 12.3);
        assert_eq!(round_to_tenth(12.24), 12.2);
    }

    #[test]
    fn empty_set_has_zero_average_and_no_extrema() {
        let stats = CreatureStats::new(0, None, None, None);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_danger_level, 0.0);
        assert!(stats.safest.is_none());
        assert!(stats.most_dangerous.is_none());
    }

    #[test]
    fn empty_extrema_serialize_as_null() {
        let json = serde_json::to_value(CreatureStats::new(0, None, None, None)).unwrap();
        assert!(json["safest"].is_null());
        assert!(json["most_dangerous"].is_null());
        assert_eq!(json["average_danger_level"], 0.0);
    }
}
