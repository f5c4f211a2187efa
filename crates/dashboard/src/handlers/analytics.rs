//! Handlers for the delay analytics endpoints.
//!
//! Every handler recomputes its figures from the immutable dataset and the
//! query parameters; nothing is cached between requests.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use getaround_core::delay::report::{self, AnalysisParams, Report};
use getaround_core::delay::simulation::{self, RatioScorer, Simulation, DEFAULT_THRESHOLD_MINUTES};
use getaround_core::delay::stats::{
    self, CheckinTypeStats, DatasetSummary, DelayDistribution, Overview, DEFAULT_HISTOGRAM_BINS,
};
use getaround_core::delay::{self, CheckinFilter, DelayDataset, RentalRecord, Scope, DEFAULT_PREVIEW_ROWS};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters shared by every analytics endpoint; each one reads the
/// subset it needs.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    /// Comma-separated checkin types; empty or absent means all.
    pub checkin_types: Option<String>,
    /// Minimum turnaround in minutes (default: 120).
    pub threshold: Option<u32>,
    /// `all` or one checkin type.
    pub scope: Option<String>,
    pub bins: Option<usize>,
    pub limit: Option<usize>,
}

impl AnalysisQuery {
    fn filter(&self) -> CheckinFilter {
        CheckinFilter::parse(self.checkin_types.as_deref())
    }

    fn scope(&self, dataset: &DelayDataset) -> Result<Scope, AppError> {
        Ok(Scope::parse(self.scope.as_deref(), dataset)?)
    }

    fn threshold(&self) -> u32 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD_MINUTES)
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub checkin_types: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckinTypesResponse {
    pub by_checkin_type: Vec<CheckinTypeStats>,
    pub most_late_checkin_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    /// Records matching the filter, before the limit.
    pub total: usize,
    pub returned: usize,
    pub records: Vec<RentalRecord>,
}

#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub scope: String,
    pub points: Vec<Simulation>,
    pub recommended: Option<Simulation>,
}

/// Resolve the dataset first so a degraded service answers 503 whatever
/// the query looks like.
fn prepare(
    state: &AppState,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<(&DelayDataset, AnalysisQuery)> {
    let dataset = state.dataset()?;
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok((dataset, query))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /categories
pub async fn categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let dataset = state.dataset()?;
    Ok(Json(CategoriesResponse {
        checkin_types: dataset.categories().to_vec(),
    }))
}

/// GET /overview?checkin_types=
pub async fn overview(
    State(state): State<AppState>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<Json<Overview>> {
    let (dataset, query) = prepare(&state, query)?;
    let records = dataset.filtered(&query.filter())?;
    Ok(Json(stats::overview(&records)))
}

/// GET /checkin-types?checkin_types=
pub async fn checkin_types(
    State(state): State<AppState>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<Json<CheckinTypesResponse>> {
    let (dataset, query) = prepare(&state, query)?;
    let records = dataset.filtered(&query.filter())?;
    let by_checkin_type = stats::by_checkin_type(&records);
    let most_late_checkin_type = stats::most_late_checkin_type(&by_checkin_type).map(str::to_string);

    Ok(Json(CheckinTypesResponse {
        by_checkin_type,
        most_late_checkin_type,
    }))
}

/// GET /distribution?checkin_types=&bins=
pub async fn distribution(
    State(state): State<AppState>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<Json<DelayDistribution>> {
    let (dataset, query) = prepare(&state, query)?;
    let bins = stats::validate_bins(query.bins.unwrap_or(DEFAULT_HISTOGRAM_BINS))?;
    let records = dataset.filtered(&query.filter())?;
    Ok(Json(stats::delay_distribution(&records, bins)))
}

/// GET /summary?checkin_types=
pub async fn summary(
    State(state): State<AppState>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<Json<DatasetSummary>> {
    let (dataset, query) = prepare(&state, query)?;
    let records = dataset.filtered(&query.filter())?;
    Ok(Json(stats::summary(&records)))
}

/// GET /records?checkin_types=&limit=
pub async fn records(
    State(state): State<AppState>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<Json<RecordsResponse>> {
    let (dataset, query) = prepare(&state, query)?;
    let filtered = dataset.filtered(&query.filter())?;
    let rows = delay::preview(&filtered, query.limit.unwrap_or(DEFAULT_PREVIEW_ROWS))?;

    Ok(Json(RecordsResponse {
        total: filtered.len(),
        returned: rows.len(),
        records: rows.into_iter().cloned().collect(),
    }))
}

/// GET /simulation?checkin_types=&threshold=&scope=
pub async fn simulation(
    State(state): State<AppState>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<Json<Simulation>> {
    let (dataset, query) = prepare(&state, query)?;
    let scope = query.scope(dataset)?;
    let sim = report::simulate_for(dataset, &query.filter(), &scope, query.threshold())?;
    Ok(Json(sim))
}

/// GET /sweep?checkin_types=&scope=
pub async fn sweep(
    State(state): State<AppState>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<Json<SweepResponse>> {
    let (dataset, query) = prepare(&state, query)?;
    let scope = query.scope(dataset)?;
    let points = report::sweep_for(dataset, &query.filter(), &scope)?;
    let recommended = simulation::recommend(&points, &RatioScorer::default()).cloned();

    Ok(Json(SweepResponse {
        scope: scope.label().to_string(),
        points,
        recommended,
    }))
}

/// GET /report?checkin_types=&threshold=&scope=
///
/// Everything above for one parameter set, in a single document.
pub async fn full_report(
    State(state): State<AppState>,
    query: Result<Query<AnalysisQuery>, QueryRejection>,
) -> AppResult<Json<Report>> {
    let (dataset, query) = prepare(&state, query)?;
    let params = AnalysisParams {
        filter: query.filter(),
        threshold: query.threshold(),
        scope: query.scope(dataset)?,
    };

    let report = report::build(dataset, &params, &RatioScorer::default())?;
    tracing::debug!(
        scope = %report.scope,
        threshold = params.threshold,
        recommended = ?report.recommended.as_ref().map(|r| r.threshold_minutes),
        "Report built",
    );
    Ok(Json(report))
}
