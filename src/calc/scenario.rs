// src/calc/scenario.rs

//! Scenario aggregation: validation into an immutable record, full
//! evaluation, and field-by-field comparison.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::revenue::daily_hours;
use super::{
    apply_efficiency, compute_labor_cost, compute_pl, compute_revenue, compute_service, compute_space,
};
use super::{LaborCostSummary, ModelError, ModelResult, ProfitLossStatement, RevenueMetrics};
use super::{ServiceMetrics, SpaceMetrics};
use crate::models::{ExpenseConfig, Scenario, ScenarioDraft, ScenarioParameters};

/// Percentage changes smaller than this are reported as no change.
pub const UNCHANGED_THRESHOLD_PCT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEvaluation {
    pub space: SpaceMetrics,
    pub service: ServiceMetrics,
    pub adjusted_waiters: u32,
    pub adjusted_runners: u32,
    pub revenue: RevenueMetrics,
    pub seasonal_monthly_revenue: f64,
    pub labor: LaborCostSummary,
    pub labor_percentage_of_revenue: f64,
    pub covers_per_labor_hour: f64,
    pub profit_loss: ProfitLossStatement,
}

/// Validates every parameter group and seals the draft into a scenario.
pub fn build_scenario(id: Uuid, created_at: DateTime<Utc>, draft: ScenarioDraft) -> ModelResult<Scenario> {
    if draft.name.trim().is_empty() {
        return Err(ModelError::invalid("name", "must not be empty"));
    }
    evaluate_parameters(&draft.parameters, &ExpenseConfig::default())?;

    Ok(Scenario {
        id,
        name: draft.name,
        brand: draft.brand,
        outlet: draft.outlet,
        parameters: draft.parameters,
        created_at,
        updated_at: created_at,
    })
}

/// Runs every model over one parameter set. The P&L labor line is replaced by
/// the labor percentage implied by the roster, when there is one.
pub fn evaluate_parameters(p: &ScenarioParameters, expenses: &ExpenseConfig) -> ModelResult<ScenarioEvaluation> {
    let space = compute_space(&p.space_parameters)?;
    let service = compute_service(&p.service_parameters, space.total_capacity)?;
    let adjusted_waiters = apply_efficiency(service.waiters_required, &p.efficiency_drivers)?;
    let adjusted_runners = apply_efficiency(service.runners_required, &p.efficiency_drivers)?;
    let revenue = compute_revenue(&p.revenue_drivers, space.total_capacity, &p.operational_hours)?;
    let seasonality = p.efficiency_drivers.seasonality_factor.clamp(0.5, 1.5);
    let labor = compute_labor_cost(&p.positions)?;

    // Without a roster the configured labor share stands in.
    let labor_pct = if labor.total_staff == 0 {
        expenses.labor_pct
    } else {
        labor.labor_percentage_of_revenue(revenue.monthly_revenue)
    };
    let pl_config = ExpenseConfig { labor_pct: labor_pct.min(100.0), ..expenses.clone() };
    let profit_loss = compute_pl(revenue.monthly_revenue, &pl_config)?;

    let staff_hours = labor.total_staff as f64 * daily_hours(&p.operational_hours) as f64;
    let covers_per_labor_hour = if staff_hours > 0.0 { revenue.daily_covers / staff_hours } else { 0.0 };

    Ok(ScenarioEvaluation {
        space,
        service,
        adjusted_waiters,
        adjusted_runners,
        revenue,
        seasonal_monthly_revenue: (revenue.monthly_revenue * seasonality).max(0.0),
        labor,
        labor_percentage_of_revenue: labor_pct,
        covers_per_labor_hour,
        profit_loss,
    })
}

pub fn evaluate_scenario(s: &Scenario, expenses: &ExpenseConfig) -> ModelResult<ScenarioEvaluation> {
    evaluate_parameters(&s.parameters, expenses)
}

// ─────────────────────────────────────────────────────────────────────────────
// Comparison
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "camelCase")]
pub enum Delta {
    Unchanged,
    Increase(f64),
    Decrease(f64),
    /// Base value is zero and the other is not.
    NotComparable,
}

impl Delta {
    pub fn between(v1: f64, v2: f64) -> Self {
        if v1 == 0.0 {
            return if v2 == 0.0 { Delta::Unchanged } else { Delta::NotComparable };
        }
        let diff = (v2 - v1) / v1 * 100.0;
        if !diff.is_finite() {
            Delta::NotComparable
        } else if diff.abs() < UNCHANGED_THRESHOLD_PCT {
            Delta::Unchanged
        } else if diff > 0.0 {
            Delta::Increase(diff)
        } else {
            Delta::Decrease(diff)
        }
    }

    pub fn percent(&self) -> f64 {
        match self {
            Delta::Increase(p) | Delta::Decrease(p) => *p,
            Delta::Unchanged | Delta::NotComparable => 0.0,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Delta::Unchanged => "0%".to_string(),
            Delta::Increase(p) => format!("+{p:.1}%"),
            Delta::Decrease(p) => format!("{p:.1}%"),
            Delta::NotComparable => "n/a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDelta {
    pub field: &'static str,
    pub value1: f64,
    pub value2: f64,
    pub delta: Delta,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDiff {
    pub identical_inputs: bool,
    pub fields: Vec<FieldDelta>,
}

impl ScenarioDiff {
    pub fn get(&self, field: &str) -> Option<&FieldDelta> {
        self.fields.iter().find(|f| f.field == field)
    }
}

fn metrics(e: &ScenarioEvaluation) -> [(&'static str, f64); 15] {
    [
        ("totalCapacity", e.space.total_capacity as f64),
        ("waitersRequired", e.service.waiters_required as f64),
        ("runnersRequired", e.service.runners_required as f64),
        ("kitchenStaffEstimate", e.service.kitchen_staff_estimate as f64),
        ("adjustedWaiters", e.adjusted_waiters as f64),
        ("totalStaff", e.labor.total_staff as f64),
        ("totalMonthlyLaborCost", e.labor.total_monthly_labor_cost),
        ("laborPercentageOfRevenue", e.labor_percentage_of_revenue),
        ("tableTurnsPerDay", e.revenue.table_turns_per_day),
        ("dailyCovers", e.revenue.daily_covers),
        ("monthlyRevenue", e.revenue.monthly_revenue),
        ("coversPerLaborHour", e.covers_per_labor_hour),
        ("grossProfit", e.profit_loss.gross_profit),
        ("operatingProfit", e.profit_loss.operating_profit),
        ("netProfit", e.profit_loss.net_profit),
    ]
}

pub fn compare_evaluations(a: &ScenarioEvaluation, b: &ScenarioEvaluation, identical_inputs: bool) -> ScenarioDiff {
    let fields = metrics(a)
        .into_iter()
        .zip(metrics(b))
        .map(|((field, value1), (_, value2))| {
            let delta = Delta::between(value1, value2);
            FieldDelta { field, value1, value2, delta, label: delta.label() }
        })
        .collect();
    ScenarioDiff { identical_inputs, fields }
}

/// Standing advice attached to every multi-scenario comparison.
pub const COMPARISON_RECOMMENDATIONS: [&str; 5] = [
    "Consider implementing the scenario with the lowest labor cost percentage for optimal profitability",
    "Balance staffing reductions with service quality considerations",
    "Evaluate the impact of each scenario on guest experience and revenue potential",
    "Consider testing the most promising scenario in a single location before full implementation",
    "Regularly review and adjust staffing models based on seasonal demand patterns",
];

/// Plain-language staffing, labor cost and labor share differences of `other` against `base`.
pub fn comparison_insights(diff: &ScenarioDiff, base: &str, other: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(f) = diff.get("totalStaff").filter(|f| f.value1 != f.value2) {
        let word = if f.value2 < f.value1 { "fewer" } else { "more" };
        out.push(format!(
            "{other} requires {:.0} {word} staff than {base} ({})",
            (f.value2 - f.value1).abs(),
            f.label
        ));
    }
    if let Some(f) = diff.get("totalMonthlyLaborCost").filter(|f| f.value1 != f.value2) {
        let word = if f.value2 < f.value1 { "reduces" } else { "increases" };
        out.push(format!(
            "{other} {word} monthly labor cost by SAR {:.0} against {base} ({})",
            (f.value2 - f.value1).abs(),
            f.label
        ));
    }
    if let Some(f) = diff.get("laborPercentageOfRevenue").filter(|f| f.value1 != f.value2) {
        let word = if f.value2 < f.value1 { "improves" } else { "increases" };
        out.push(format!(
            "{other} {word} the labor cost percentage by {:.1} percentage points against {base}",
            (f.value2 - f.value1).abs()
        ));
    }
    out
}

/// Compares `b` against `a` under the default expense structure.
pub fn compare_scenarios(a: &Scenario, b: &Scenario) -> ModelResult<ScenarioDiff> {
    let expenses = ExpenseConfig::default();
    let ea = evaluate_scenario(a, &expenses)?;
    let eb = evaluate_scenario(b, &expenses)?;
    let identical = a.parameters.fingerprint() == b.parameters.fingerprint();
    Ok(compare_evaluations(&ea, &eb, identical))
}
