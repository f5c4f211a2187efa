//! Full analysis for one parameter set, as rendered by the report service.

use serde::Serialize;

use super::simulation::{self, Simulation, ThresholdScorer, CANDIDATE_THRESHOLDS};
use super::stats::{self, CheckinTypeStats, Overview};
use super::{CheckinFilter, DelayDataset, Scope};
use crate::error::CoreError;

/// Widget selections driving every derived figure.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    pub filter: CheckinFilter,
    pub threshold: u32,
    pub scope: Scope,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub checkin_types: Vec<String>,
    pub scope: String,
    pub overview: Overview,
    pub by_checkin_type: Vec<CheckinTypeStats>,
    pub most_late_checkin_type: Option<String>,
    pub simulation: Simulation,
    pub sweep: Vec<Simulation>,
    pub recommended: Option<Simulation>,
}

/// Sweep the candidate thresholds for `filter` and `scope`.
pub fn sweep_for(
    dataset: &DelayDataset,
    filter: &CheckinFilter,
    scope: &Scope,
) -> Result<Vec<Simulation>, CoreError> {
    let filtered = dataset.filtered(filter)?;
    let consecutive = simulation::consecutive_in_scope(&filtered, scope);
    Ok(simulation::sweep(&consecutive, &CANDIDATE_THRESHOLDS))
}

/// Simulate a single threshold for `filter` and `scope`.
pub fn simulate_for(
    dataset: &DelayDataset,
    filter: &CheckinFilter,
    scope: &Scope,
    threshold: u32,
) -> Result<Simulation, CoreError> {
    let threshold = simulation::validate_threshold(threshold)?;
    let filtered = dataset.filtered(filter)?;
    let consecutive = simulation::consecutive_in_scope(&filtered, scope);
    Ok(simulation::simulate(&consecutive, threshold))
}

pub fn build(
    dataset: &DelayDataset,
    params: &AnalysisParams,
    scorer: &dyn ThresholdScorer,
) -> Result<Report, CoreError> {
    let threshold = simulation::validate_threshold(params.threshold)?;
    let filtered = dataset.filtered(&params.filter)?;
    let consecutive = simulation::consecutive_in_scope(&filtered, &params.scope);

    let by_type = stats::by_checkin_type(&filtered);
    let most_late = stats::most_late_checkin_type(&by_type).map(str::to_string);
    let sweep = simulation::sweep(&consecutive, &CANDIDATE_THRESHOLDS);
    let recommended = simulation::recommend(&sweep, scorer).cloned();

    let checkin_types = if params.filter.is_all() {
        dataset.categories().to_vec()
    } else {
        params.filter.selected().to_vec()
    };

    Ok(Report {
        checkin_types,
        scope: params.scope.label().to_string(),
        overview: stats::overview(&filtered),
        by_checkin_type: by_type,
        most_late_checkin_type: most_late,
        simulation: simulation::simulate(&consecutive, threshold),
        sweep,
        recommended,
    })
}
