//! What-if simulation of a minimum turnaround threshold between rentals.
//!
//! Only rentals with a known turnaround gap take part: a rental is *blocked*
//! under threshold `T` when its gap is strictly below `T`, and a problem is
//! *solved* when a problematic rental is blocked.

use serde::Serialize;

use super::stats::ratio;
use super::{RentalRecord, Scope};
use crate::error::CoreError;

/// Thresholds (minutes) evaluated by [`sweep`] by default.
pub const CANDIDATE_THRESHOLDS: [u32; 9] = [0, 30, 60, 120, 180, 240, 360, 480, 720];
pub const DEFAULT_THRESHOLD_MINUTES: u32 = 120;
pub const MAX_THRESHOLD_MINUTES: u32 = 720;

/// Outcome of enforcing one threshold on one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub threshold_minutes: u32,
    pub threshold_hours: f64,
    /// Consecutive rentals inside the scope.
    pub rentals_in_scope: usize,
    pub problematic_in_scope: usize,
    pub blocked: usize,
    pub blocked_rate: f64,
    pub problems_solved: usize,
    pub solved_rate: f64,
    /// Rough revenue loss estimate: the share of blocked rentals, in percent.
    pub revenue_impact_pct: f64,
}

impl Simulation {
    pub fn blocked_pct(&self) -> f64 {
        self.blocked_rate * 100.0
    }

    pub fn solved_pct(&self) -> f64 {
        self.solved_rate * 100.0
    }
}

pub fn validate_threshold(threshold: u32) -> Result<u32, CoreError> {
    if threshold > MAX_THRESHOLD_MINUTES {
        return Err(CoreError::InvalidInput(format!(
            "threshold must be between 0 and {MAX_THRESHOLD_MINUTES} minutes, got {threshold}"
        )));
    }
    Ok(threshold)
}

/// Consecutive rentals (gap known) that fall inside `scope`.
pub fn consecutive_in_scope<'a>(
    records: &[&'a RentalRecord],
    scope: &Scope,
) -> Vec<&'a RentalRecord> {
    records
        .iter()
        .copied()
        .filter(|r| r.gap().is_some() && scope.contains(r))
        .collect()
}

/// Simulate `threshold` on rentals already restricted by [`consecutive_in_scope`].
pub fn simulate(consecutive: &[&RentalRecord], threshold: u32) -> Simulation {
    let limit = f64::from(threshold);
    let is_blocked = |r: &&RentalRecord| r.gap().is_some_and(|gap| gap < limit);

    let problematic = consecutive.iter().filter(|r| r.is_problematic()).count();
    let blocked = consecutive.iter().filter(|r| is_blocked(*r)).count();
    let solved = consecutive
        .iter()
        .filter(|r| r.is_problematic() && is_blocked(*r))
        .count();
    let blocked_rate = ratio(blocked, consecutive.len());

    Simulation {
        threshold_minutes: threshold,
        threshold_hours: limit / 60.0,
        rentals_in_scope: consecutive.len(),
        problematic_in_scope: problematic,
        blocked,
        blocked_rate,
        problems_solved: solved,
        solved_rate: ratio(solved, problematic),
        revenue_impact_pct: blocked_rate * 100.0,
    }
}

/// Simulate every threshold in `thresholds`, in order.
pub fn sweep(consecutive: &[&RentalRecord], thresholds: &[u32]) -> Vec<Simulation> {
    thresholds
        .iter()
        .map(|t| simulate(consecutive, *t))
        .collect()
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Objective used to pick a recommended threshold from a sweep.
pub trait ThresholdScorer {
    fn score(&self, point: &Simulation) -> f64;
}

/// `solved_pct / (blocked_pct + offset)`, on percentage points.
///
/// Rewards solving many problems per point of blocked bookings; the offset
/// keeps a zero-blocking threshold from dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioScorer {
    pub offset: f64,
}

impl Default for RatioScorer {
    fn default() -> Self {
        Self { offset: 1.0 }
    }
}

impl ThresholdScorer for RatioScorer {
    fn score(&self, point: &Simulation) -> f64 {
        point.solved_pct() / (point.blocked_pct() + self.offset)
    }
}

/// The sweep point with the highest score. Ties keep the earliest point and
/// NaN scores never win.
pub fn recommend<'a>(
    points: &'a [Simulation],
    scorer: &dyn ThresholdScorer,
) -> Option<&'a Simulation> {
    let mut best: Option<(&Simulation, f64)> = None;
    for point in points {
        let score = scorer.score(point);
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((point, score)),
        }
    }
    best.map(|(point, _)| point)
}
