// src/calc/optimize.rs

//! Lever-based staffing optimization.
//!
//! Each target pulls a fixed set of operating levers to their benchmark
//! level and re-runs the staffing model. There is no search: the optimized
//! plan is fully determined by the scenario and the target.

use serde::{Deserialize, Serialize};

use super::{recommend_staffing, ModelResult, SalaryTable, StaffingParams, StaffingPlan};
use crate::models::Scenario;

pub const BENCHMARK_CROSS_TRAINING_PCT: f64 = 20.0;
pub const BENCHMARK_TECHNOLOGY_PCT: f64 = 15.0;
pub const BENCHMARK_COVERS_PER_WAITER: u32 = 20;
pub const BENCHMARK_RUNNER_RATIO_PCT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationTarget {
    LaborCost,
    Efficiency,
    Revenue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvements {
    pub staff_reduction: i64,
    pub staff_reduction_pct: f64,
    pub cost_savings: f64,
    pub cost_savings_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub target: OptimizationTarget,
    pub original_params: StaffingParams,
    pub optimized_params: StaffingParams,
    pub original_plan: StaffingPlan,
    pub optimized_plan: StaffingPlan,
    pub improvements: Improvements,
    pub levers_applied: Vec<String>,
}

/// A single benchmark adjustment. `None` when the outlet already meets it.
type Lever = fn(&mut StaffingParams) -> Option<String>;

// Under the efficiency factor only technology and cross-training shrink
// headcount; utilization scales it up and is never pulled here.
fn technology(p: &mut StaffingParams) -> Option<String> {
    let v = &mut p.efficiency_drivers.technology_impact_pct;
    (*v < BENCHMARK_TECHNOLOGY_PCT).then(|| {
        let label = format!("Raise technology impact % from {v} to {BENCHMARK_TECHNOLOGY_PCT}");
        *v = BENCHMARK_TECHNOLOGY_PCT;
        label
    })
}

fn cross_training(p: &mut StaffingParams) -> Option<String> {
    let v = &mut p.efficiency_drivers.cross_training_pct;
    (*v < BENCHMARK_CROSS_TRAINING_PCT).then(|| {
        let label = format!("Raise cross-training % from {v} to {BENCHMARK_CROSS_TRAINING_PCT}");
        *v = BENCHMARK_CROSS_TRAINING_PCT;
        label
    })
}

fn covers_per_waiter(p: &mut StaffingParams) -> Option<String> {
    let v = &mut p.service_parameters.covers_per_waiter;
    (*v < BENCHMARK_COVERS_PER_WAITER).then(|| {
        let label = format!("Raise covers per waiter from {v} to {BENCHMARK_COVERS_PER_WAITER}");
        *v = BENCHMARK_COVERS_PER_WAITER;
        label
    })
}

fn runner_ratio(p: &mut StaffingParams) -> Option<String> {
    let v = &mut p.service_parameters.runner_to_waiter_ratio_pct;
    (*v > BENCHMARK_RUNNER_RATIO_PCT).then(|| {
        let label = format!("Lower runner to waiter ratio from {v}% to {BENCHMARK_RUNNER_RATIO_PCT}%");
        *v = BENCHMARK_RUNNER_RATIO_PCT;
        label
    })
}

const LABOR_COST_LEVERS: &[Lever] = &[technology, cross_training, covers_per_waiter, runner_ratio];
const EFFICIENCY_LEVERS: &[Lever] = &[technology, cross_training];
// Service ratios stay untouched so guest-facing coverage is preserved.
const REVENUE_LEVERS: &[Lever] = &[technology];

fn levers(target: OptimizationTarget) -> &'static [Lever] {
    match target {
        OptimizationTarget::LaborCost => LABOR_COST_LEVERS,
        OptimizationTarget::Efficiency => EFFICIENCY_LEVERS,
        OptimizationTarget::Revenue => REVENUE_LEVERS,
    }
}

/// Applies the target's levers in order. A lever is kept only when the
/// re-priced plan costs no more than the plan before it, so the optimized
/// labor cost never exceeds the original.
fn apply_levers(
    params: &StaffingParams,
    original: &StaffingPlan,
    target: OptimizationTarget,
    salaries: &SalaryTable,
) -> ModelResult<(StaffingParams, StaffingPlan, Vec<String>)> {
    let mut current = params.clone();
    let mut plan = original.clone();
    let mut applied = Vec::new();

    for lever in levers(target) {
        let mut candidate = current.clone();
        let Some(label) = lever(&mut candidate) else { continue };
        let candidate_plan = recommend_staffing(&candidate, salaries)?;
        if candidate_plan.labor.total_monthly_labor_cost <= plan.labor.total_monthly_labor_cost {
            current = candidate;
            plan = candidate_plan;
            applied.push(label);
        }
    }
    Ok((current, plan, applied))
}

pub fn optimize_params(
    params: &StaffingParams,
    target: OptimizationTarget,
    salaries: &SalaryTable,
) -> ModelResult<OptimizationResult> {
    let original_plan = recommend_staffing(params, salaries)?;
    let (optimized_params, optimized_plan, levers_applied) = apply_levers(params, &original_plan, target, salaries)?;

    let before_staff = original_plan.labor.total_staff as i64;
    let staff_reduction = before_staff - optimized_plan.labor.total_staff as i64;
    let before_cost = original_plan.labor.total_monthly_labor_cost;
    let cost_savings = before_cost - optimized_plan.labor.total_monthly_labor_cost;

    let improvements = Improvements {
        staff_reduction,
        staff_reduction_pct: if staff_reduction > 0 && before_staff > 0 {
            staff_reduction as f64 / before_staff as f64 * 100.0
        } else {
            0.0
        },
        cost_savings,
        cost_savings_pct: if cost_savings > 0.0 && before_cost > 0.0 { cost_savings / before_cost * 100.0 } else { 0.0 },
    };

    Ok(OptimizationResult {
        target,
        original_params: params.clone(),
        optimized_params,
        original_plan,
        optimized_plan,
        improvements,
        levers_applied,
    })
}

pub fn optimize_scenario(
    scenario: &Scenario,
    target: OptimizationTarget,
    salaries: &SalaryTable,
) -> ModelResult<OptimizationResult> {
    let p = &scenario.parameters;
    let params = StaffingParams {
        space_parameters: p.space_parameters.clone(),
        service_parameters: p.service_parameters.clone(),
        efficiency_drivers: p.efficiency_drivers.clone(),
        operational_hours: p.operational_hours.clone(),
    };
    optimize_params(&params, target, salaries)
}
