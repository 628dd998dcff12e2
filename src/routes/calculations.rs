// src/routes/calculations.rs

use axum::http::StatusCode;
use axum::{extract::State, Json};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{invalid_parameter, store_error, ApiResult};
use crate::calc::{self, ModelError};
use crate::calc::{
    Margins, OptimizationResult, OptimizationTarget, PeakHourAnalysis, PeakHourParams, PlHistory, ProfitLossStatement,
    ProjectionParams, RevenueProjection, SalaryTable, ScenarioDiff, ScenarioEvaluation, StaffingParams,
    StaffingPlan, WhatIfChanges, WhatIfResult, YearMonth,
};
use crate::models::{ExpenseConfig, ScenarioParameters};
use crate::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Request / Response models
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StaffingRequest {
    #[serde(flatten)]
    pub params: StaffingParams,
    #[serde(default)]
    pub salaries: Option<SalaryTable>,
}

#[derive(Deserialize)]
pub struct RevenueRequest {
    #[serde(flatten)]
    pub params: ProjectionParams,
    #[serde(default)]
    pub start: Option<YearMonth>, // defaults to the current month
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlRequest {
    pub monthly_revenue: f64,
    #[serde(flatten)]
    pub expenses: ExpenseConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlReport {
    pub statement: ProfitLossStatement,
    pub margins: Margins,
    pub insights: Vec<String>,
    pub history: PlHistory,
    pub optimization_opportunities: Vec<String>,
}

#[derive(Deserialize)]
pub struct OptimizeRequest {
    pub scenario_id: Uuid,
    #[serde(rename = "optimizationTarget")]
    pub target: OptimizationTarget,
    #[serde(default)]
    pub salaries: Option<SalaryTable>,
}

#[derive(Deserialize)]
pub struct CompareRequest {
    pub scenario_ids: Vec<Uuid>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub scenario_id: Uuid,
    pub name: String,
    pub diff: ScenarioDiff,
    pub insights: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub base_id: Uuid,
    pub base_name: String,
    pub comparisons: Vec<Comparison>,
    pub recommendations: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfRequest {
    pub base_scenario_id: Uuid,
    #[serde(default)]
    pub changes: WhatIfChanges,
    #[serde(default)]
    pub expenses: Option<ExpenseConfig>,
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    #[serde(flatten)]
    pub parameters: ScenarioParameters,
    #[serde(default)]
    pub expenses: Option<ExpenseConfig>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// POST /calculations/staffing
pub async fn staffing(Json(b): Json<StaffingRequest>) -> ApiResult<Json<StaffingPlan>> {
    let salaries = b.salaries.unwrap_or_default();
    let plan = calc::recommend_staffing(&b.params, &salaries).map_err(invalid_parameter)?;
    Ok(Json(plan))
}

/// POST /calculations/revenue
pub async fn revenue(Json(b): Json<RevenueRequest>) -> ApiResult<Json<RevenueProjection>> {
    let start = b.start.unwrap_or_else(|| YearMonth::of(Utc::now().date_naive()));
    let projection = calc::project_revenue(&b.params, start).map_err(invalid_parameter)?;
    Ok(Json(projection))
}

/// POST /calculations/pl. The history runs up to the current month.
pub async fn profit_loss(Json(b): Json<PlRequest>) -> ApiResult<Json<PlReport>> {
    let statement = calc::compute_pl(b.monthly_revenue, &b.expenses).map_err(invalid_parameter)?;
    let month = Utc::now().month();
    let history = calc::pl_history(b.monthly_revenue, &b.expenses, month).map_err(invalid_parameter)?;
    Ok(Json(PlReport {
        margins: statement.margins(),
        insights: calc::pl_insights(&statement, &b.expenses),
        history,
        optimization_opportunities: calc::pl_opportunities(&statement),
        statement,
    }))
}

/// POST /calculations/peak-hours
pub async fn peak_hours(Json(b): Json<PeakHourParams>) -> ApiResult<Json<PeakHourAnalysis>> {
    let analysis = calc::analyze_peak_hours(&b).map_err(invalid_parameter)?;
    Ok(Json(analysis))
}

/// POST /calculations/evaluate
pub async fn evaluate(Json(b): Json<EvaluateRequest>) -> ApiResult<Json<ScenarioEvaluation>> {
    let expenses = b.expenses.unwrap_or_default();
    let evaluation = calc::evaluate_parameters(&b.parameters, &expenses).map_err(invalid_parameter)?;
    Ok(Json(evaluation))
}

/// POST /calculations/optimize
pub async fn optimize(
    State(state): State<AppState>,
    Json(b): Json<OptimizeRequest>,
) -> ApiResult<Json<OptimizationResult>> {
    let scenario = state.store.get(b.scenario_id).await.map_err(store_error)?;
    let salaries = b.salaries.unwrap_or_default();
    let result = calc::optimize_scenario(&scenario, b.target, &salaries).map_err(invalid_parameter)?;
    debug!(id = %scenario.id, target = ?b.target, levers = result.levers_applied.len(), "optimized");
    Ok(Json(result))
}

/// POST /calculations/compare. The first scenario is the baseline for all others.
pub async fn compare(
    State(state): State<AppState>,
    Json(b): Json<CompareRequest>,
) -> ApiResult<Json<CompareResponse>> {
    if b.scenario_ids.len() < 2 {
        return Err((StatusCode::BAD_REQUEST, "at least two scenario ids are required".into()));
    }
    let mut scenarios = Vec::with_capacity(b.scenario_ids.len());
    for id in &b.scenario_ids {
        scenarios.push(state.store.get(*id).await.map_err(store_error)?);
    }

    let base = &scenarios[0];
    let comparisons = scenarios[1..]
        .iter()
        .map(|other| {
            let diff = calc::compare_scenarios(base, other)?;
            Ok(Comparison {
                scenario_id: other.id,
                name: other.name.clone(),
                insights: calc::comparison_insights(&diff, &base.name, &other.name),
                diff,
            })
        })
        .collect::<Result<Vec<_>, ModelError>>()
        .map_err(invalid_parameter)?;

    Ok(Json(CompareResponse {
        base_id: base.id,
        base_name: base.name.clone(),
        comparisons,
        recommendations: calc::COMPARISON_RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
    }))
}

/// POST /calculations/what-if
pub async fn what_if(
    State(state): State<AppState>,
    Json(b): Json<WhatIfRequest>,
) -> ApiResult<Json<WhatIfResult>> {
    let base = state.store.get(b.base_scenario_id).await.map_err(store_error)?;
    let expenses = b.expenses.unwrap_or_default();
    let result = calc::run_what_if(&base, &b.changes, &expenses).map_err(invalid_parameter)?;
    Ok(Json(result))
}
