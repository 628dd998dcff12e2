// src/calc/space.rs

use serde::Serialize;

use super::{percentage, positive, ModelResult};
use crate::models::SpaceParameters;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceMetrics {
    pub foh_area_sqm: f64,
    pub boh_area_sqm: f64,
    pub internal_capacity: u32,
    pub total_capacity: u32,
}

pub fn compute_space(p: &SpaceParameters) -> ModelResult<SpaceMetrics> {
    let total_area = positive("totalAreaSqm", p.total_area_sqm)?;
    let foh_pct = percentage("fohPercentage", p.foh_percentage)?;
    let per_cover = positive("areaPerCoverSqm", p.area_per_cover_sqm)?;

    let foh_area = total_area * (foh_pct / 100.0);
    let internal_capacity = (foh_area / per_cover).floor() as u32;

    Ok(SpaceMetrics {
        foh_area_sqm: foh_area,
        boh_area_sqm: total_area - foh_area,
        internal_capacity,
        total_capacity: internal_capacity.saturating_add(p.external_seating),
    })
}
