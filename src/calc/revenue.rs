// src/calc/revenue.rs

use serde::Serialize;

use super::{clamped, positive, ModelResult};
use crate::models::{OperationalHours, RevenueDrivers};

/// Share of seating that stays usable while Ramadan hours are in effect.
pub const RAMADAN_CAPACITY_MULTIPLIER: f64 = 0.5;

pub const MIN_OPERATING_DAYS: u32 = 300;
pub const MAX_OPERATING_DAYS: u32 = 365;
pub const MIN_DAILY_HOURS: u32 = 6;
pub const MAX_DAILY_HOURS: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetrics {
    pub effective_capacity: f64,
    pub table_turns_per_day: f64,
    pub daily_covers: f64,
    pub peak_hour_covers: f64,
    pub monthly_revenue: f64,
}

pub(crate) fn operating_days(hours: &OperationalHours) -> u32 {
    hours.operating_days_per_year.clamp(MIN_OPERATING_DAYS, MAX_OPERATING_DAYS)
}

pub(crate) fn daily_hours(hours: &OperationalHours) -> u32 {
    hours.daily_hours.clamp(MIN_DAILY_HOURS, MAX_DAILY_HOURS)
}

pub fn compute_revenue(
    drivers: &RevenueDrivers,
    total_capacity: u32,
    hours: &OperationalHours,
) -> ModelResult<RevenueMetrics> {
    let avg_check = positive("avgCheck", drivers.avg_check)?;
    positive("dwellingTimeMin", drivers.dwelling_time_min)?;
    let turn_time = positive("tableTurnTimeMin", drivers.table_turn_time_min)?;
    let peak = clamped("peakFactor", drivers.peak_factor, 1.0, f64::MAX)?;
    let occupancy = clamped("occupancyRate", drivers.occupancy_rate, 0.0, 1.0)?;

    let days = operating_days(hours) as f64;
    let open_hours = daily_hours(hours) as f64;

    let effective_capacity = if hours.ramadan_adjustment {
        total_capacity as f64 * RAMADAN_CAPACITY_MULTIPLIER
    } else {
        total_capacity as f64
    };

    let table_turns_per_day = open_hours * 60.0 / turn_time;
    let daily_covers = (effective_capacity * table_turns_per_day * occupancy).max(0.0);
    let monthly_revenue = (daily_covers * avg_check * (days / 12.0)).max(0.0);

    Ok(RevenueMetrics {
        effective_capacity,
        table_turns_per_day,
        daily_covers,
        peak_hour_covers: daily_covers / open_hours * peak,
        monthly_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drivers() -> RevenueDrivers {
        RevenueDrivers {
            avg_check: 120.0,
            dwelling_time_min: 75.0,
            table_turn_time_min: 90.0,
            peak_factor: 1.5,
            occupancy_rate: 0.85,
        }
    }

    fn hours(ramadan: bool) -> OperationalHours {
        OperationalHours { operating_days_per_year: 350, daily_hours: 12, ramadan_adjustment: ramadan }
    }

    #[test]
    fn reference_outlet() {
        let m = compute_revenue(&drivers(), 117, &hours(false)).unwrap();
        assert_eq!(m.table_turns_per_day, 8.0);
        assert!((m.daily_covers - 795.6).abs() < 1e-9);
        let expected = 117.0 * 8.0 * 0.85 * 120.0 * (350.0 / 12.0);
        assert!((m.monthly_revenue - expected).abs() < 1e-6);
    }

    #[test]
    fn ramadan_halves_capacity_before_covers() {
        let normal = compute_revenue(&drivers(), 117, &hours(false)).unwrap();
        let ramadan = compute_revenue(&drivers(), 117, &hours(true)).unwrap();
        assert_eq!(ramadan.effective_capacity, 58.5);
        assert!((ramadan.daily_covers * 2.0 - normal.daily_covers).abs() < 1e-9);
    }

    #[test]
    fn out_of_domain_hours_are_clamped() {
        let h = OperationalHours { operating_days_per_year: 400, daily_hours: 2, ramadan_adjustment: false };
        let m = compute_revenue(&drivers(), 117, &h).unwrap();
        assert_eq!(m.table_turns_per_day, 4.0);
        let expected = 117.0 * 4.0 * 0.85 * 120.0 * (365.0 / 12.0);
        assert!((m.monthly_revenue - expected).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_check_and_turn_time() {
        let mut d = drivers();
        d.avg_check = 0.0;
        assert_eq!(compute_revenue(&d, 117, &hours(false)).unwrap_err().field(), "avgCheck");
        let mut d = drivers();
        d.table_turn_time_min = -1.0;
        assert_eq!(compute_revenue(&d, 117, &hours(false)).unwrap_err().field(), "tableTurnTimeMin");
    }
}
