// src/calc/efficiency.rs

use super::{clamped, ModelResult};
use crate::models::EfficiencyDrivers;

/// Combined multiplier applied to raw headcount.
pub fn efficiency_factor(d: &EfficiencyDrivers) -> ModelResult<f64> {
    let utilization = clamped("staffUtilizationPct", d.staff_utilization_pct, 60.0, 100.0)?;
    let technology = clamped("technologyImpactPct", d.technology_impact_pct, 0.0, 30.0)?;
    let cross_training = clamped("crossTrainingPct", d.cross_training_pct, 0.0, 30.0)?;
    let seasonality = clamped("seasonalityFactor", d.seasonality_factor, 0.5, 1.5)?;

    Ok((utilization / 100.0)
        * (1.0 - technology / 100.0)
        * (1.0 - cross_training / 100.0)
        * seasonality)
}

/// Efficiency-adjusted headcount. A role that needs anyone keeps at least one.
pub fn apply_efficiency(raw_staff: u32, d: &EfficiencyDrivers) -> ModelResult<u32> {
    let factor = efficiency_factor(d)?;
    if raw_staff == 0 {
        return Ok(0);
    }
    let adjusted = (raw_staff as f64 * factor).ceil() as u32;
    Ok(adjusted.max(1))
}
