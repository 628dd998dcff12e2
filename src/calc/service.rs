// src/calc/service.rs

use serde::Serialize;

use super::{non_negative, ModelError, ModelResult};
use crate::models::ServiceParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetrics {
    pub waiters_required: u32,
    pub runners_required: u32,
    pub kitchen_staff_estimate: u32,
    pub total_foh_staff: u32,
}

/// FOH headcount for a seating capacity. All counts round up.
pub fn compute_service(p: &ServiceParameters, total_capacity: u32) -> ModelResult<ServiceMetrics> {
    if p.covers_per_waiter == 0 {
        return Err(ModelError::invalid("coversPerWaiter", "must be > 0"));
    }
    if p.kitchen_stations == 0 {
        return Err(ModelError::invalid("kitchenStations", "must be >= 1"));
    }
    let runner_ratio = non_negative("runnerToWaiterRatioPct", p.runner_to_waiter_ratio_pct)?;

    let waiters_required = total_capacity.div_ceil(p.covers_per_waiter);
    let runners_required = (waiters_required as f64 * runner_ratio / 100.0).ceil() as u32;
    let kitchen_staff_estimate =
        (p.kitchen_stations as f64 * p.service_style.kitchen_multiplier()).ceil() as u32;

    let total_foh_staff = waiters_required
        .checked_add(runners_required)
        .ok_or_else(|| ModelError::invalid("runnerToWaiterRatioPct", "runner headcount overflows"))?;

    Ok(ServiceMetrics {
        waiters_required,
        runners_required,
        kitchen_staff_estimate,
        total_foh_staff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceStyle;

    fn params(cpw: u32, ratio: f64, style: ServiceStyle) -> ServiceParameters {
        ServiceParameters {
            covers_per_waiter: cpw,
            runner_to_waiter_ratio_pct: ratio,
            kitchen_stations: 4,
            service_style: style,
        }
    }

    #[test]
    fn reference_outlet() {
        let m = compute_service(&params(16, 50.0, ServiceStyle::Casual), 117).unwrap();
        assert_eq!(m.waiters_required, 8);
        assert_eq!(m.runners_required, 4);
        assert_eq!(m.kitchen_staff_estimate, 6);
        assert_eq!(m.total_foh_staff, 12);
    }

    #[test]
    fn kitchen_multiplier_by_style() {
        let est = |s| compute_service(&params(16, 0.0, s), 100).unwrap().kitchen_staff_estimate;
        assert_eq!(est(ServiceStyle::FastCasual), 4);
        assert_eq!(est(ServiceStyle::Casual), 6);
        assert_eq!(est(ServiceStyle::Premium), 8);
        assert_eq!(est(ServiceStyle::FineDining), 4);
    }

    #[test]
    fn partial_runner_rounds_up() {
        let m = compute_service(&params(16, 25.0, ServiceStyle::Casual), 117).unwrap();
        assert_eq!(m.runners_required, 2);
    }

    #[test]
    fn empty_room_needs_nobody() {
        let m = compute_service(&params(16, 50.0, ServiceStyle::Casual), 0).unwrap();
        assert_eq!(m.waiters_required, 0);
        assert_eq!(m.runners_required, 0);
    }

    #[test]
    fn rejects_zero_covers_per_waiter() {
        let err = compute_service(&params(0, 50.0, ServiceStyle::Casual), 117).unwrap_err();
        assert_eq!(err.field(), "coversPerWaiter");
    }

    #[test]
    fn rejects_negative_runner_ratio() {
        let err = compute_service(&params(16, -5.0, ServiceStyle::Casual), 117).unwrap_err();
        assert_eq!(err.field(), "runnerToWaiterRatioPct");
    }

    #[test]
    fn runaway_runner_ratio_is_rejected() {
        let err = compute_service(&params(1, 1e12, ServiceStyle::Casual), 500).unwrap_err();
        assert_eq!(err.field(), "runnerToWaiterRatioPct");
    }
}
