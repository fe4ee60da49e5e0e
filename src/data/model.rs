use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome, stored in the source data as the 0/1 `class` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a `class` flag. Anything other than 0 or 1 is rejected.
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn flag(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// `Launch Site`
    pub site: String,
    /// `Payload Mass (kg)`, non-negative.
    pub payload_mass: f64,
    /// `class`
    pub outcome: Outcome,
    /// `Booster Version Category`, only used to colour the scatter view.
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// PayloadRange – the numeric range selector value
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error("payload range bounds must be finite numbers, got [{low}, {high}]")]
    NonFiniteBound { low: f64, high: f64 },
}

/// Inclusive payload interval `[low, high]` in kilograms.
///
/// `low > high` is representable on purpose: it simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Range accepting every finite payload.
    pub fn unbounded() -> Self {
        Self {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
        }
    }

    pub fn contains(&self, payload_mass: f64) -> bool {
        self.low <= payload_mass && payload_mass <= self.high
    }

    /// Inverted ranges select no rows.
    pub fn is_empty(&self) -> bool {
        !(self.low <= self.high)
    }

    /// Reject NaN bounds. Infinite bounds are fine (see [`PayloadRange::unbounded`]).
    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.low.is_nan() || self.high.is_nan() {
            return Err(SelectionError::NonFiniteBound {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.0}, {:.0}] kg", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable in-memory table with pre-computed summaries.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    payload_bounds: Option<PayloadRange>,
    booster_categories: Vec<String>,
}

impl LaunchTable {
    /// Build the table and its summaries from loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut payload_bounds: Option<PayloadRange> = None;
        let mut booster_categories: Vec<String> = Vec::new();

        for rec in &records {
            payload_bounds = Some(match payload_bounds {
                None => PayloadRange::new(rec.payload_mass, rec.payload_mass),
                Some(b) => PayloadRange::new(b.low.min(rec.payload_mass), b.high.max(rec.payload_mass)),
            });
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
        }

        LaunchTable {
            records,
            payload_bounds,
            booster_categories,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&LaunchRecord> {
        self.records.get(index)
    }

    /// Observed `[min, max]` payload, `None` when the table is empty.
    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        self.payload_bounds
    }

    /// Distinct booster categories in first-seen order.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, payload_mass: f64, class: i64, booster: &str) -> LaunchRecord {
    LaunchRecord {
        site: site.to_string(),
        payload_mass,
        outcome: Outcome::from_flag(class).expect("test class flag is 0 or 1"),
        booster_version_category: booster.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_flags_round_trip_only_for_zero_and_one() {
        assert_eq!(Outcome::from_flag(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_flag(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_flag(2), None);
        assert_eq!(Outcome::Success.to_string(), "1");
    }

    #[test]
    fn table_summaries_track_bounds_and_boosters() {
        let table = LaunchTable::from_records(vec![
            record("A", 500.0, 1, "v1.0"),
            record("B", 9600.0, 0, "FT"),
            record("A", 0.0, 1, "v1.0"),
            record("C", 4200.0, 1, "B4"),
        ]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.payload_bounds(), Some(PayloadRange::new(0.0, 9600.0)));
        assert_eq!(table.booster_categories(), ["v1.0", "FT", "B4"]);
    }

    #[test]
    fn empty_table_has_no_bounds() {
        let table = LaunchTable::from_records(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.payload_bounds(), None);
    }

    #[test]
    fn range_edges_are_inclusive() {
        let r = PayloadRange::new(1000.0, 2000.0);
        assert!(r.contains(1000.0));
        assert!(r.contains(2000.0));
        assert!(!r.contains(2000.5));
        assert!(PayloadRange::new(5.0, 1.0).is_empty());
        assert!(PayloadRange::unbounded().contains(1e9));
    }

    #[test]
    fn nan_bounds_fail_validation() {
        let err = PayloadRange::new(f64::NAN, 10.0).validate().unwrap_err();
        assert!(matches!(err, SelectionError::NonFiniteBound { .. }));
        assert!(PayloadRange::unbounded().validate().is_ok());
    }
}
