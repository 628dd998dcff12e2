// src/calc/staffing.rs

use serde::{Deserialize, Serialize};

use super::revenue::{daily_hours, operating_days};
use super::{apply_efficiency, compute_labor_cost, compute_service, compute_space, efficiency_factor};
use super::{LaborCostSummary, ModelResult, ServiceMetrics, SpaceMetrics};
use crate::models::{
    Department, EfficiencyDrivers, OperationalHours, ServiceParameters, SpaceParameters, StaffPosition,
};

// Fixed per-shift roles that do not scale with covers.
const HOSTS: u32 = 2;
const CASHIERS: u32 = 2;
const MANAGERS: u32 = 2;
const EXECUTIVE_CHEFS: u32 = 1;
const SOUS_CHEFS: u32 = 1;
const KITCHEN_HELPERS: u32 = 2;
const DISHWASHERS: u32 = 2;
const PREP_COOKS_PER_STATION: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingParams {
    pub space_parameters: SpaceParameters,
    pub service_parameters: ServiceParameters,
    pub efficiency_drivers: EfficiencyDrivers,
    pub operational_hours: OperationalHours,
}

/// Monthly salary per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryTable {
    pub waiter: f64,
    pub runner: f64,
    pub host: f64,
    pub cashier: f64,
    pub manager: f64,
    pub executive_chef: f64,
    pub sous_chef: f64,
    pub line_cook: f64,
    pub prep_cook: f64,
    pub kitchen_helper: f64,
    pub dishwasher: f64,
}

impl Default for SalaryTable {
    fn default() -> Self {
        Self {
            waiter: 3500.0,
            runner: 3000.0,
            host: 4000.0,
            cashier: 3500.0,
            manager: 8000.0,
            executive_chef: 10000.0,
            sous_chef: 7000.0,
            line_cook: 4500.0,
            prep_cook: 3500.0,
            kitchen_helper: 3000.0,
            dishwasher: 2800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingPlan {
    pub space: SpaceMetrics,
    pub service: ServiceMetrics,
    pub efficiency_factor: f64,
    pub positions: Vec<StaffPosition>,
    pub labor: LaborCostSummary,
    /// Rostered staff × trading hours per day.
    pub daily_labor_hours: f64,
    pub cost_per_labor_hour: f64,
    pub recommendations: Vec<String>,
}

impl StaffingPlan {
    pub fn count_of(&self, id: &str) -> u32 {
        self.positions.iter().find(|p| p.id == id).map_or(0, |p| p.count)
    }
}

fn position(id: &str, title: &str, department: Department, level: u8, salary: f64, count: u32) -> StaffPosition {
    StaffPosition {
        id: id.to_string(),
        title: title.to_string(),
        department,
        base_salary: salary,
        count,
        level,
    }
}

/// Full FOH/BOH roster for an outlet, priced with `salaries`.
pub fn recommend_staffing(params: &StaffingParams, salaries: &SalaryTable) -> ModelResult<StaffingPlan> {
    let space = compute_space(&params.space_parameters)?;
    let service = compute_service(&params.service_parameters, space.total_capacity)?;
    let factor = efficiency_factor(&params.efficiency_drivers)?;

    let waiters = apply_efficiency(service.waiters_required, &params.efficiency_drivers)?;
    let runners = (waiters as f64 * params.service_parameters.runner_to_waiter_ratio_pct / 100.0).ceil() as u32;
    let stations = params.service_parameters.kitchen_stations;
    let prep_cooks = (stations as f64 * PREP_COOKS_PER_STATION).ceil() as u32;

    use Department::{Boh, Foh};
    let positions = vec![
        position("manager", "Restaurant Manager", Foh, 0, salaries.manager, MANAGERS),
        position("host", "Host/Hostess", Foh, 1, salaries.host, HOSTS),
        position("waiter", "Waiter", Foh, 2, salaries.waiter, waiters),
        position("runner", "Runner", Foh, 3, salaries.runner, runners),
        position("cashier", "Cashier", Foh, 2, salaries.cashier, CASHIERS),
        position("executive-chef", "Executive Chef", Boh, 0, salaries.executive_chef, EXECUTIVE_CHEFS),
        position("sous-chef", "Sous Chef", Boh, 1, salaries.sous_chef, SOUS_CHEFS),
        position("line-cook", "Line Cook", Boh, 2, salaries.line_cook, stations),
        position("prep-cook", "Prep Cook", Boh, 3, salaries.prep_cook, prep_cooks),
        position("kitchen-helper", "Kitchen Helper", Boh, 3, salaries.kitchen_helper, KITCHEN_HELPERS),
        position("dishwasher", "Dishwasher", Boh, 3, salaries.dishwasher, DISHWASHERS),
    ];
    let labor = compute_labor_cost(&positions)?;

    let hours = &params.operational_hours;
    let daily_labor_hours = labor.total_staff as f64 * daily_hours(hours) as f64;
    let monthly_labor_hours = daily_labor_hours * operating_days(hours) as f64 / 12.0;
    let cost_per_labor_hour = if monthly_labor_hours > 0.0 {
        labor.total_monthly_labor_cost / monthly_labor_hours
    } else {
        0.0
    };

    Ok(StaffingPlan {
        space,
        service,
        efficiency_factor: factor,
        positions,
        labor,
        daily_labor_hours,
        cost_per_labor_hour,
        recommendations: recommendations(params),
    })
}

fn recommendations(params: &StaffingParams) -> Vec<String> {
    let eff = &params.efficiency_drivers;
    let svc = &params.service_parameters;
    let mut out = Vec::new();

    // Utilization scales headcount up, so it is a scheduling note rather than a cost lever.
    if eff.staff_utilization_pct < 85.0 {
        out.push("Review shift scheduling so rostered hours follow cover demand more closely".to_string());
    }
    if eff.cross_training_pct < 20.0 {
        out.push("Implement cross-training program to improve staff flexibility and reduce headcount".to_string());
    }
    if eff.technology_impact_pct < 15.0 {
        out.push("Invest in technology solutions like POS and KDS to improve operational efficiency".to_string());
    }
    if svc.covers_per_waiter < 20 {
        out.push("Consider increasing covers per waiter through service optimization".to_string());
    }
    if svc.runner_to_waiter_ratio_pct > 50.0 {
        out.push("Optimize runner to waiter ratio to reduce FOH labor costs".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceStyle;
    use pretty_assertions::assert_eq;

    fn params() -> StaffingParams {
        StaffingParams {
            space_parameters: SpaceParameters {
                total_area_sqm: 250.0,
                foh_percentage: 65.0,
                area_per_cover_sqm: 1.67,
                external_seating: 20,
            },
            service_parameters: ServiceParameters {
                covers_per_waiter: 16,
                runner_to_waiter_ratio_pct: 50.0,
                kitchen_stations: 4,
                service_style: ServiceStyle::Casual,
            },
            efficiency_drivers: EfficiencyDrivers {
                staff_utilization_pct: 100.0,
                technology_impact_pct: 0.0,
                cross_training_pct: 0.0,
                seasonality_factor: 1.0,
            },
            operational_hours: OperationalHours {
                operating_days_per_year: 360,
                daily_hours: 12,
                ramadan_adjustment: false,
            },
        }
    }

    #[test]
    fn neutral_efficiency_reproduces_service_counts() {
        let plan = recommend_staffing(&params(), &SalaryTable::default()).unwrap();
        assert_eq!(plan.count_of("waiter"), 8);
        assert_eq!(plan.count_of("runner"), 4);
        assert_eq!(plan.count_of("line-cook"), 4);
        assert_eq!(plan.count_of("prep-cook"), 3);
        assert_eq!(plan.labor.total_staff, 8 + 4 + 2 + 2 + 2 + 1 + 1 + 4 + 3 + 2 + 2);
        assert_eq!(plan.labor.boh_staff, 13);
    }

    #[test]
    fn labor_cost_uses_salary_table() {
        let plan = recommend_staffing(&params(), &SalaryTable::default()).unwrap();
        let expected = 8.0 * 3500.0 + 4.0 * 3000.0 + 2.0 * 4000.0 + 2.0 * 3500.0 + 2.0 * 8000.0
            + 10000.0 + 7000.0 + 4.0 * 4500.0 + 3.0 * 3500.0 + 2.0 * 3000.0 + 2.0 * 2800.0;
        assert_eq!(plan.labor.total_monthly_labor_cost, expected);
    }

    #[test]
    fn weak_levers_produce_recommendations() {
        let mut p = params();
        p.efficiency_drivers.staff_utilization_pct = 80.0;
        p.service_parameters.runner_to_waiter_ratio_pct = 60.0;
        let plan = recommend_staffing(&p, &SalaryTable::default()).unwrap();
        // utilization, cross-training, technology, covers per waiter, runner ratio
        assert_eq!(plan.recommendations.len(), 5);
    }

    #[test]
    fn labor_hours_follow_trading_hours() {
        let plan = recommend_staffing(&params(), &SalaryTable::default()).unwrap();
        assert_eq!(plan.daily_labor_hours, 31.0 * 12.0);
        // 360 days / 12 = 30 trading days a month
        let monthly_hours = 31.0 * 12.0 * 30.0;
        assert!((plan.cost_per_labor_hour - plan.labor.total_monthly_labor_cost / monthly_hours).abs() < 1e-9);
    }

    #[test]
    fn utilization_note_does_not_promise_fewer_staff() {
        let mut p = params();
        p.efficiency_drivers.staff_utilization_pct = 70.0;
        let plan = recommend_staffing(&p, &SalaryTable::default()).unwrap();
        assert!(plan.recommendations[0].starts_with("Review shift scheduling"));
        assert!(plan.recommendations.iter().all(|r| !r.contains("utilization")));
    }

    #[test]
    fn invalid_space_stops_the_plan() {
        let mut p = params();
        p.space_parameters.foh_percentage = 150.0;
        assert!(recommend_staffing(&p, &SalaryTable::default()).is_err());
    }
}
