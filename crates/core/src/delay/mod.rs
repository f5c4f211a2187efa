//! Checkout-delay analytics over a static rental dataset.
//!
//! [`DelayDataset`] is loaded once and never mutated; every aggregate in
//! [`stats`] and [`simulation`] is a pure function of the dataset and the
//! caller's parameters, recomputed on demand.

pub mod report;
pub mod simulation;
pub mod stats;

use serde::Serialize;

use crate::error::CoreError;

/// Rows returned by [`preview`] when no limit is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 100;
pub const MAX_PREVIEW_ROWS: usize = 1000;

/// One rental as read from the delay spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalRecord {
    pub rental_id: Option<i64>,
    pub car_id: Option<i64>,
    pub checkin_type: String,
    pub state: Option<String>,
    /// Minutes returned after the scheduled end; `<= 0` is on time.
    pub delay_at_checkout_in_minutes: Option<f64>,
    /// Minutes between the previous rental's end and this one's start.
    pub time_delta_with_previous_rental_in_minutes: Option<f64>,
}

impl RentalRecord {
    pub fn is_late(&self) -> bool {
        self.delay_at_checkout_in_minutes.is_some_and(|d| d > 0.0)
    }

    /// Turnaround gap, if this rental followed another one on the same car.
    pub fn gap(&self) -> Option<f64> {
        self.time_delta_with_previous_rental_in_minutes
    }

    /// A late return that actually overlaps the next scheduled start.
    pub fn is_problematic(&self) -> bool {
        match (self.delay_at_checkout_in_minutes, self.gap()) {
            (Some(delay), Some(gap)) => delay > 0.0 && delay > gap,
            _ => false,
        }
    }
}

/// Immutable table of rentals plus the checkin categories it contains.
#[derive(Debug, Clone, Default)]
pub struct DelayDataset {
    records: Vec<RentalRecord>,
    categories: Vec<String>,
}

impl DelayDataset {
    /// Build the dataset. Negative turnaround gaps are treated as missing.
    pub fn new(mut records: Vec<RentalRecord>) -> Self {
        let mut discarded = 0usize;
        for record in &mut records {
            if record.gap().is_some_and(|gap| gap < 0.0) {
                record.time_delta_with_previous_rental_in_minutes = None;
                discarded += 1;
            }
        }
        if discarded > 0 {
            tracing::warn!(discarded, "Negative turnaround gaps treated as missing");
        }

        let mut categories: Vec<String> = Vec::new();
        for record in &records {
            if !categories.contains(&record.checkin_type) {
                categories.push(record.checkin_type.clone());
            }
        }

        Self {
            records,
            categories,
        }
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    /// Checkin types in order of first appearance.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose checkin type passes `filter`.
    pub fn filtered(&self, filter: &CheckinFilter) -> Result<Vec<&RentalRecord>, CoreError> {
        filter.validate(self)?;
        Ok(self
            .records
            .iter()
            .filter(|r| filter.accepts(&r.checkin_type))
            .collect())
    }

    fn ensure_category(&self, name: &str) -> Result<(), CoreError> {
        if self.categories.iter().any(|c| c == name) {
            Ok(())
        } else {
            Err(CoreError::InvalidInput(format!(
                "unknown checkin type '{name}', expected one of: {}",
                self.categories.join(", ")
            )))
        }
    }
}

/// First `limit` records of an already filtered selection.
pub fn preview<'a>(
    records: &[&'a RentalRecord],
    limit: usize,
) -> Result<Vec<&'a RentalRecord>, CoreError> {
    if limit == 0 || limit > MAX_PREVIEW_ROWS {
        return Err(CoreError::InvalidInput(format!(
            "limit must be between 1 and {MAX_PREVIEW_ROWS}, got {limit}"
        )));
    }
    Ok(records.iter().copied().take(limit).collect())
}

/// Selected checkin types. An empty selection keeps every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckinFilter(Vec<String>);

impl CheckinFilter {
    pub fn new(types: Vec<String>) -> Self {
        Self(types)
    }

    /// Parse a comma-separated list such as `"mobile,connect"`.
    pub fn parse(raw: Option<&str>) -> Self {
        let types = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self(types)
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn selected(&self) -> &[String] {
        &self.0
    }

    fn accepts(&self, checkin_type: &str) -> bool {
        self.is_all() || self.0.iter().any(|t| t == checkin_type)
    }

    fn validate(&self, dataset: &DelayDataset) -> Result<(), CoreError> {
        self.0.iter().try_for_each(|t| dataset.ensure_category(t))
    }
}

/// Population a threshold is simulated on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    All,
    CheckinType(String),
}

impl Scope {
    /// `None`, `""` and `"all"` select every record; anything else names a
    /// checkin type that must exist in `dataset`.
    pub fn parse(raw: Option<&str>, dataset: &DelayDataset) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(Self::All),
            Some(s) => {
                dataset.ensure_category(s)?;
                Ok(Self::CheckinType(s.to_string()))
            }
        }
    }

    pub fn contains(&self, record: &RentalRecord) -> bool {
        match self {
            Self::All => true,
            Self::CheckinType(t) => record.checkin_type == *t,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::CheckinType(t) => t,
        }
    }
}


#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::test_support::{record, sample_dataset};
    use super::*;

    #[test]
    fn problematic_requires_late_and_overlap() {
        assert!(record("mobile", Some(90.0), Some(60.0)).is_problematic());
        assert!(!record("mobile", Some(60.0), Some(60.0)).is_problematic());
        assert!(!record("mobile", Some(-5.0), Some(-10.0)).is_problematic());
        assert!(!record("mobile", Some(90.0), None).is_problematic());
        assert!(!record("mobile", None, Some(0.0)).is_problematic());
    }

    #[test]
    fn preview_takes_leading_rows() {
        let dataset = sample_dataset();
        let connect = dataset
            .filtered(&CheckinFilter::parse(Some("connect")))
            .unwrap();
        let rows = preview(&connect, 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].delay_at_checkout_in_minutes, Some(15.0));
        assert_eq!(preview(&connect, 1000).unwrap().len(), 4);
        assert_matches!(preview(&connect, 0), Err(CoreError::InvalidInput(_)));
        assert_matches!(preview(&connect, 1001), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        assert_eq!(sample_dataset().categories(), ["mobile", "connect"]);
    }

    #[test]
    fn negative_gaps_become_missing() {
        let dataset = DelayDataset::new(vec![record("connect", Some(5.0), Some(-30.0))]);
        assert_eq!(dataset.records()[0].gap(), None);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let dataset = sample_dataset();
        let all = dataset.filtered(&CheckinFilter::parse(Some(" , "))).unwrap();
        assert_eq!(all.len(), dataset.len());
    }

    #[test]
    fn filter_selects_named_types() {
        let dataset = sample_dataset();
        let connect = dataset
            .filtered(&CheckinFilter::parse(Some("connect")))
            .unwrap();
        assert_eq!(connect.len(), 4);
        assert!(connect.iter().all(|r| r.checkin_type == "connect"));
    }

    #[test]
    fn filter_rejects_unknown_type() {
        let dataset = sample_dataset();
        assert_matches!(
            dataset.filtered(&CheckinFilter::parse(Some("mobile,kiosk"))),
            Err(CoreError::InvalidInput(msg)) if msg.contains("'kiosk'")
        );
    }

    #[test]
    fn scope_parsing() {
        let dataset = sample_dataset();
        assert_eq!(Scope::parse(None, &dataset).unwrap(), Scope::All);
        assert_eq!(Scope::parse(Some("ALL"), &dataset).unwrap(), Scope::All);
        assert_eq!(
            Scope::parse(Some("mobile"), &dataset).unwrap(),
            Scope::CheckinType("mobile".into())
        );
        assert_matches!(
            Scope::parse(Some("kiosk"), &dataset),
            Err(CoreError::InvalidInput(_))
        );
    }
}
