// src/calc/what_if.rs

use serde::{Deserialize, Serialize};

use super::{compare_evaluations, evaluate_parameters, ModelResult, ScenarioDiff, ScenarioEvaluation};
use crate::models::{ExpenseConfig, Scenario, ScenarioParameters, ServiceStyle};

/// Overrides applied on top of a base scenario. Absent fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhatIfChanges {
    pub total_area_sqm: Option<f64>,
    pub foh_percentage: Option<f64>,
    pub external_seating: Option<u32>,
    pub covers_per_waiter: Option<u32>,
    pub runner_to_waiter_ratio_pct: Option<f64>,
    pub kitchen_stations: Option<u32>,
    pub service_style: Option<ServiceStyle>,
    pub operating_days_per_year: Option<u32>,
    pub daily_hours: Option<u32>,
    pub ramadan_adjustment: Option<bool>,
    pub avg_check: Option<f64>,
    pub table_turn_time_min: Option<f64>,
    pub peak_factor: Option<f64>,
    pub occupancy_rate: Option<f64>,
    pub staff_utilization_pct: Option<f64>,
    pub technology_impact_pct: Option<f64>,
    pub cross_training_pct: Option<f64>,
    pub seasonality_factor: Option<f64>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl WhatIfChanges {
    pub fn apply(&self, base: &ScenarioParameters) -> ScenarioParameters {
        let mut p = base.clone();
        let c = self.clone();

        set(&mut p.space_parameters.total_area_sqm, c.total_area_sqm);
        set(&mut p.space_parameters.foh_percentage, c.foh_percentage);
        set(&mut p.space_parameters.external_seating, c.external_seating);

        set(&mut p.service_parameters.covers_per_waiter, c.covers_per_waiter);
        set(&mut p.service_parameters.runner_to_waiter_ratio_pct, c.runner_to_waiter_ratio_pct);
        set(&mut p.service_parameters.kitchen_stations, c.kitchen_stations);
        set(&mut p.service_parameters.service_style, c.service_style);

        set(&mut p.operational_hours.operating_days_per_year, c.operating_days_per_year);
        set(&mut p.operational_hours.daily_hours, c.daily_hours);
        set(&mut p.operational_hours.ramadan_adjustment, c.ramadan_adjustment);

        set(&mut p.revenue_drivers.avg_check, c.avg_check);
        set(&mut p.revenue_drivers.table_turn_time_min, c.table_turn_time_min);
        set(&mut p.revenue_drivers.peak_factor, c.peak_factor);
        set(&mut p.revenue_drivers.occupancy_rate, c.occupancy_rate);

        set(&mut p.efficiency_drivers.staff_utilization_pct, c.staff_utilization_pct);
        set(&mut p.efficiency_drivers.technology_impact_pct, c.technology_impact_pct);
        set(&mut p.efficiency_drivers.cross_training_pct, c.cross_training_pct);
        set(&mut p.efficiency_drivers.seasonality_factor, c.seasonality_factor);
        p
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfResult {
    pub base: ScenarioEvaluation,
    pub modified_parameters: ScenarioParameters,
    pub modified: ScenarioEvaluation,
    pub diff: ScenarioDiff,
    pub insights: Vec<String>,
}

fn movement(change: f64, up: &str, down: &str) -> String {
    if change > 0.0 { up.to_string() } else { down.to_string() }
}

pub fn run_what_if(base: &Scenario, changes: &WhatIfChanges, expenses: &ExpenseConfig) -> ModelResult<WhatIfResult> {
    let modified_parameters = changes.apply(&base.parameters);
    let before = evaluate_parameters(&base.parameters, expenses)?;
    let after = evaluate_parameters(&modified_parameters, expenses)?;
    let identical = base.parameters.fingerprint() == modified_parameters.fingerprint();
    let diff = compare_evaluations(&before, &after, identical);

    let cost = |e: &ScenarioEvaluation| {
        e.profit_loss.total_cogs + e.profit_loss.total_operating_expenses
    };
    let revenue_change = after.revenue.monthly_revenue - before.revenue.monthly_revenue;
    let cost_change = cost(&after) - cost(&before);
    let profit_change = after.profit_loss.net_profit - before.profit_loss.net_profit;
    let margin_change = after.profit_loss.margins().net_margin_pct - before.profit_loss.margins().net_margin_pct;

    let insights = vec![
        format!("{} monthly revenue by {:.0}", movement(revenue_change, "Increasing", "Decreasing"), revenue_change.abs()),
        format!("{} monthly costs by {:.0}", movement(cost_change, "Increasing", "Decreasing"), cost_change.abs()),
        format!("{} net profit by {:.0}", movement(profit_change, "Increasing", "Decreasing"), profit_change.abs()),
        format!(
            "{} net margin by {:.1} percentage points",
            movement(margin_change, "Improving", "Reducing"),
            margin_change.abs()
        ),
    ];

    Ok(WhatIfResult { base: before, modified_parameters, modified: after, diff, insights })
}
