//! Descriptive statistics over (filtered) rental records.

use serde::Serialize;

use super::RentalRecord;
use crate::error::CoreError;

/// Default number of histogram bins for the delay distribution.
pub const DEFAULT_HISTOGRAM_BINS: usize = 100;
/// Upper bound on requested histogram bins.
pub const MAX_HISTOGRAM_BINS: usize = 500;

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Headline figures for the current filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_rentals: usize,
    pub late_rentals: usize,
    /// Late rentals over all rentals (rentals without a delay count as not late).
    pub lateness_rate: f64,
    /// Mean checkout delay among late rentals only.
    pub mean_delay_minutes: Option<f64>,
    pub mean_delay_hours: Option<f64>,
    /// Rentals that followed another rental on the same car.
    pub consecutive_rentals: usize,
    pub problematic_rentals: usize,
    /// Problematic rentals over consecutive rentals.
    pub problematic_rate: f64,
}

pub fn overview(records: &[&RentalRecord]) -> Overview {
    let late = late_delays(records.iter().copied());
    let consecutive = records.iter().filter(|r| r.gap().is_some()).count();
    let problematic = records.iter().filter(|r| r.is_problematic()).count();
    let mean_delay = mean(&late);

    Overview {
        total_rentals: records.len(),
        late_rentals: late.len(),
        lateness_rate: ratio(late.len(), records.len()),
        mean_delay_minutes: mean_delay,
        mean_delay_hours: mean_delay.map(|m| m / 60.0),
        consecutive_rentals: consecutive,
        problematic_rentals: problematic,
        problematic_rate: ratio(problematic, consecutive),
    }
}

// ---------------------------------------------------------------------------
// Per checkin type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckinTypeStats {
    pub checkin_type: String,
    pub total: usize,
    pub late: usize,
    pub lateness_rate: f64,
    pub mean_delay_minutes: Option<f64>,
    pub median_delay_minutes: Option<f64>,
}

/// Lateness breakdown per checkin type, in order of first appearance.
pub fn by_checkin_type(records: &[&RentalRecord]) -> Vec<CheckinTypeStats> {
    let mut order: Vec<&str> = Vec::new();
    for record in records {
        if !order.contains(&record.checkin_type.as_str()) {
            order.push(&record.checkin_type);
        }
    }

    order
        .into_iter()
        .map(|checkin_type| {
            let subset: Vec<&RentalRecord> = records
                .iter()
                .copied()
                .filter(|r| r.checkin_type == checkin_type)
                .collect();
            let late = late_delays(subset.iter().copied());
            CheckinTypeStats {
                checkin_type: checkin_type.to_string(),
                total: subset.len(),
                late: late.len(),
                lateness_rate: ratio(late.len(), subset.len()),
                mean_delay_minutes: mean(&late),
                median_delay_minutes: median(&late),
            }
        })
        .collect()
}

/// The type with the highest lateness rate; the first one wins ties.
pub fn most_late_checkin_type(stats: &[CheckinTypeStats]) -> Option<&str> {
    stats
        .iter()
        .fold(None::<&CheckinTypeStats>, |best, s| match best {
            Some(b) if b.lateness_rate >= s.lateness_rate => Some(b),
            _ => Some(s),
        })
        .map(|s| s.checkin_type.as_str())
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayDistribution {
    pub on_time_rentals: usize,
    pub late_rentals: usize,
    pub bins: Vec<HistogramBin>,
}

pub fn validate_bins(bins: usize) -> Result<usize, CoreError> {
    if bins == 0 || bins > MAX_HISTOGRAM_BINS {
        return Err(CoreError::InvalidInput(format!(
            "bins must be between 1 and {MAX_HISTOGRAM_BINS}, got {bins}"
        )));
    }
    Ok(bins)
}

/// On-time vs late split plus an equal-width histogram of known delays.
pub fn delay_distribution(records: &[&RentalRecord], bins: usize) -> DelayDistribution {
    let late = records.iter().filter(|r| r.is_late()).count();
    let delays: Vec<f64> = records
        .iter()
        .filter_map(|r| r.delay_at_checkout_in_minutes)
        .collect();

    DelayDistribution {
        on_time_rentals: records.len() - late,
        late_rentals: late,
        bins: histogram(&delays, bins),
    }
}

/// Equal-width histogram spanning `[min, max]`; the last bin is closed.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Column summaries
// ---------------------------------------------------------------------------

/// Descriptive statistics for one numeric column (nulls excluded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub delay_at_checkout_in_minutes: Option<ColumnSummary>,
    pub time_delta_with_previous_rental_in_minutes: Option<ColumnSummary>,
}

pub fn summary(records: &[&RentalRecord]) -> DatasetSummary {
    let delays: Vec<f64> = records
        .iter()
        .filter_map(|r| r.delay_at_checkout_in_minutes)
        .collect();
    let gaps: Vec<f64> = records.iter().filter_map(|r| r.gap()).collect();

    DatasetSummary {
        rows: records.len(),
        delay_at_checkout_in_minutes: describe(&delays),
        time_delta_with_previous_rental_in_minutes: describe(&gaps),
    }
}

pub fn describe(values: &[f64]) -> Option<ColumnSummary> {
    let mean = mean(values)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let std = (values.len() > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (values.len() - 1) as f64).sqrt()
    });

    Some(ColumnSummary {
        count: values.len(),
        mean,
        std,
        min: sorted[0],
        p25: quantile_sorted(&sorted, 0.25),
        p50: quantile_sorted(&sorted, 0.5),
        p75: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn late_delays<'a>(records: impl Iterator<Item = &'a RentalRecord>) -> Vec<f64> {
    records
        .filter_map(|r| r.delay_at_checkout_in_minutes)
        .filter(|d| *d > 0.0)
        .collect()
}

/// `part / whole`, or `0.0` when `whole` is zero.
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, 0.5))
}

/// Linear-interpolation quantile of a non-empty, sorted slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
