// src/models/mod.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

// ───────────────────────────────────────
// Parameter groups
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceParameters {
    pub total_area_sqm: f64,
    pub foh_percentage: f64,      // 0..100
    pub area_per_cover_sqm: f64,
    pub external_seating: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceStyle {
    FastCasual,
    Casual,
    Premium,
    FineDining,
}

impl ServiceStyle {
    /// Kitchen staff per station. Fine dining has no dedicated multiplier and
    /// falls back to the base rate.
    pub fn kitchen_multiplier(self) -> f64 {
        match self {
            ServiceStyle::Premium => 2.0,
            ServiceStyle::Casual => 1.5,
            ServiceStyle::FastCasual | ServiceStyle::FineDining => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceParameters {
    pub covers_per_waiter: u32,
    pub runner_to_waiter_ratio_pct: f64,
    pub kitchen_stations: u32,
    pub service_style: ServiceStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalHours {
    pub operating_days_per_year: u32, // 300..365
    pub daily_hours: u32,             // 6..24
    pub ramadan_adjustment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDrivers {
    pub avg_check: f64,
    pub dwelling_time_min: f64,
    pub table_turn_time_min: f64,
    pub peak_factor: f64,
    #[serde(default = "default_occupancy")]
    pub occupancy_rate: f64, // 0..1
}
fn default_occupancy() -> f64 { 0.85 }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyDrivers {
    pub staff_utilization_pct: f64, // 60..100
    pub technology_impact_pct: f64, // 0..30
    pub cross_training_pct: f64,    // 0..30
    pub seasonality_factor: f64,    // 0.5..1.5
}

// ───────────────────────────────────────
// Staff & expenses
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Foh,
    Boh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPosition {
    pub id: String,
    pub title: String,
    pub department: Department,
    pub base_salary: f64, // monthly
    pub count: u32,
    #[serde(default)]
    pub level: u8, // org-chart depth, 0 = head of department
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseConfig {
    pub food_cost_pct: f64,
    pub beverage_cost_pct: f64,
    pub labor_pct: f64,
    pub rent_pct: f64,
    pub marketing_pct: f64,
    pub utilities_pct: f64,
    pub other_pct: f64,
    pub food_revenue_share_pct: f64,
    pub depreciation_pct: f64,
    pub interest_pct: f64,
}

impl Default for ExpenseConfig {
    fn default() -> Self {
        Self {
            food_cost_pct: 28.0,
            beverage_cost_pct: 22.0,
            labor_pct: 25.0,
            rent_pct: 10.0,
            marketing_pct: 3.0,
            utilities_pct: 4.0,
            other_pct: 8.0,
            food_revenue_share_pct: 70.0,
            depreciation_pct: 3.0,
            interest_pct: 1.0,
        }
    }
}

// ───────────────────────────────────────
// Scenarios
// ───────────────────────────────────────

/// Every input a scenario evaluation depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    pub space_parameters: SpaceParameters,
    pub service_parameters: ServiceParameters,
    pub operational_hours: OperationalHours,
    pub revenue_drivers: RevenueDrivers,
    pub efficiency_drivers: EfficiencyDrivers,
    #[serde(default)]
    pub positions: Vec<StaffPosition>,
}

impl ScenarioParameters {
    /// SHA-256 hex digest of the canonical JSON encoding.
    pub fn fingerprint(&self) -> String {
        // Plain structs of numbers/strings always serialize.
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        format!("{:x}", hasher.finalize())
    }
}

/// Body of a create / full-replace request: a scenario without identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDraft {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub outlet: Option<String>,
    #[serde(flatten)]
    pub parameters: ScenarioParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub outlet: Option<String>,
    #[serde(flatten)]
    pub parameters: ScenarioParameters,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    pub fn draft(&self) -> ScenarioDraft {
        ScenarioDraft {
            name: self.name.clone(),
            brand: self.brand.clone(),
            outlet: self.outlet.clone(),
            parameters: self.parameters.clone(),
        }
    }

    pub fn touched(self, at: DateTime<Utc>) -> Self {
        Self { updated_at: at, ..self }
    }
}
