// src/calc/labor.rs

use serde::Serialize;

use super::{positive, ModelError, ModelResult};
use crate::models::{Department, StaffPosition};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCostSummary {
    pub total_staff: u32,
    pub foh_staff: u32,
    pub boh_staff: u32,
    pub foh_monthly_cost: f64,
    pub boh_monthly_cost: f64,
    pub total_monthly_labor_cost: f64,
}

impl LaborCostSummary {
    /// Labor cost as a share of monthly revenue; 0 when there is no revenue.
    pub fn labor_percentage_of_revenue(&self, monthly_revenue: f64) -> f64 {
        if monthly_revenue > 0.0 {
            self.total_monthly_labor_cost / monthly_revenue * 100.0
        } else {
            0.0
        }
    }
}

fn add_heads(total: u32, count: u32) -> ModelResult<u32> {
    total
        .checked_add(count)
        .ok_or_else(|| ModelError::invalid("count", format!("roster headcount exceeds {}", u32::MAX)))
}

pub fn compute_labor_cost(positions: &[StaffPosition]) -> ModelResult<LaborCostSummary> {
    let mut summary = LaborCostSummary::default();
    for p in positions {
        let salary = positive("baseSalary", p.base_salary)?;
        let cost = salary * p.count as f64;
        match p.department {
            Department::Foh => {
                summary.foh_staff = add_heads(summary.foh_staff, p.count)?;
                summary.foh_monthly_cost += cost;
            }
            Department::Boh => {
                summary.boh_staff = add_heads(summary.boh_staff, p.count)?;
                summary.boh_monthly_cost += cost;
            }
        }
        summary.total_staff = add_heads(summary.total_staff, p.count)?;
        summary.total_monthly_labor_cost += cost;
    }
    Ok(summary)
}
