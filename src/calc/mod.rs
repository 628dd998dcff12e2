// src/calc/mod.rs

//! Staffing, revenue and labor-cost model.
//!
//! Every function in this module is a pure transform of its arguments: no
//! I/O, no shared state, and identical inputs always produce identical
//! outputs. Invalid input is rejected with [`ModelError::InvalidParameter`]
//! before any derived figure is computed.

pub mod efficiency;
pub mod labor;
pub mod optimize;
pub mod peak_hours;
pub mod pl;
pub mod projections;
pub mod revenue;
pub mod scenario;
pub mod service;
pub mod space;
pub mod staffing;
pub mod what_if;

pub use efficiency::{apply_efficiency, efficiency_factor};
pub use labor::{compute_labor_cost, LaborCostSummary};
pub use optimize::{optimize_params, optimize_scenario, OptimizationResult, OptimizationTarget};
pub use peak_hours::{analyze_peak_hours, PeakHourAnalysis, PeakHourParams, StaffType, Weekday};
pub use pl::{compute_pl, pl_history, pl_insights, pl_opportunities, Margins, PlHistory, ProfitLossStatement};
pub use projections::{project_revenue, ProjectionParams, ProjectionPeriod, RevenueProjection, YearMonth};
pub use revenue::{compute_revenue, RevenueMetrics};
pub use scenario::{
    build_scenario, compare_evaluations, compare_scenarios, comparison_insights, evaluate_parameters,
    evaluate_scenario, Delta, FieldDelta, ScenarioDiff, ScenarioEvaluation, COMPARISON_RECOMMENDATIONS,
};
pub use service::{compute_service, ServiceMetrics};
pub use space::{compute_space, SpaceMetrics};
pub use staffing::{recommend_staffing, SalaryTable, StaffingParams, StaffingPlan};
pub use what_if::{run_what_if, WhatIfChanges, WhatIfResult};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl ModelError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter { field, reason: reason.into() }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ModelError::InvalidParameter { field, .. } => field,
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

// ─────────────────────────────────────────────────────────────────────────────
// Input guards
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) fn finite(field: &'static str, v: f64) -> ModelResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ModelError::invalid(field, format!("must be a finite number, got {v}")))
    }
}

pub(crate) fn positive(field: &'static str, v: f64) -> ModelResult<f64> {
    let v = finite(field, v)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(ModelError::invalid(field, format!("must be > 0, got {v}")))
    }
}

pub(crate) fn non_negative(field: &'static str, v: f64) -> ModelResult<f64> {
    let v = finite(field, v)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(ModelError::invalid(field, format!("must be >= 0, got {v}")))
    }
}

pub(crate) fn percentage(field: &'static str, v: f64) -> ModelResult<f64> {
    let v = finite(field, v)?;
    if (0.0..=100.0).contains(&v) {
        Ok(v)
    } else {
        Err(ModelError::invalid(field, format!("must be within [0, 100], got {v}")))
    }
}

/// Finite check, then clamp into the operating domain `[lo, hi]`.
pub(crate) fn clamped(field: &'static str, v: f64, lo: f64, hi: f64) -> ModelResult<f64> {
    Ok(finite(field, v)?.clamp(lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert_eq!(percentage("p", 0.0), Ok(0.0));
        assert_eq!(percentage("p", 100.0), Ok(100.0));
        assert!(percentage("p", 100.01).is_err());
        assert!(percentage("p", -0.5).is_err());
    }

    #[test]
    fn non_finite_input_is_rejected_not_clamped() {
        let err = clamped("seasonalityFactor", f64::NAN, 0.5, 1.5).unwrap_err();
        assert_eq!(err.field(), "seasonalityFactor");
        assert!(positive("x", f64::INFINITY).is_err());
    }

    #[test]
    fn clamp_pulls_into_domain() {
        assert_eq!(clamped("u", 140.0, 60.0, 100.0), Ok(100.0));
        assert_eq!(clamped("u", 10.0, 60.0, 100.0), Ok(60.0));
    }
}
