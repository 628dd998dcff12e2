#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use manpower_api::calc::build_scenario;
use manpower_api::models::*;
use uuid::Uuid;

/// 250 sqm casual outlet used throughout the worked examples.
pub fn reference_parameters() -> ScenarioParameters {
    ScenarioParameters {
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
        operational_hours: OperationalHours {
            operating_days_per_year: 350,
            daily_hours: 12,
            ramadan_adjustment: false,
        },
        revenue_drivers: RevenueDrivers {
            avg_check: 120.0,
            dwelling_time_min: 75.0,
            table_turn_time_min: 90.0,
            peak_factor: 1.5,
            occupancy_rate: 0.85,
        },
        efficiency_drivers: EfficiencyDrivers {
            staff_utilization_pct: 85.0,
            technology_impact_pct: 10.0,
            cross_training_pct: 15.0,
            seasonality_factor: 1.0,
        },
        positions: vec![
            position("waiter", "Waiter", Department::Foh, 3500.0, 8),
            position("runner", "Runner", Department::Foh, 3000.0, 4),
            position("manager", "Restaurant Manager", Department::Foh, 8000.0, 2),
            position("line-cook", "Line Cook", Department::Boh, 4500.0, 4),
            position("dishwasher", "Dishwasher", Department::Boh, 2800.0, 2),
        ],
    }
}

pub fn position(id: &str, title: &str, department: Department, salary: f64, count: u32) -> StaffPosition {
    StaffPosition {
        id: id.into(),
        title: title.into(),
        department,
        base_salary: salary,
        count,
        level: 0,
    }
}

pub fn reference_draft(name: &str) -> ScenarioDraft {
    ScenarioDraft {
        name: name.into(),
        brand: Some("Al Baik Grill".into()),
        outlet: Some("Riyadh Park".into()),
        parameters: reference_parameters(),
    }
}

pub fn reference_scenario() -> Scenario {
    let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    build_scenario(Uuid::from_u128(1), created, reference_draft("Baseline")).unwrap()
}
