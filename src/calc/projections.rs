// src/calc/projections.rs

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{clamped, finite, non_negative, percentage, positive, ModelError, ModelResult};

const MAX_PERIODS: u32 = 120;
const RAMADAN_MONTH: u32 = 9;

/// Demand index per calendar month, January first.
const MONTHLY_SEASONALITY: [f64; 12] = [0.9, 0.95, 1.0, 1.05, 1.1, 0.9, 0.85, 0.9, 1.0, 1.1, 1.15, 1.2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionPeriod {
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32, // 1..12
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// The month `n` months after this one.
    fn plus(self, n: u32) -> Self {
        let idx = self.month - 1 + n;
        Self { year: self.year + (idx / 12) as i32, month: idx % 12 + 1 }
    }

    fn days(self) -> u32 {
        let next = self.plus(1);
        match (
            NaiveDate::from_ymd_opt(self.year, self.month, 1),
            NaiveDate::from_ymd_opt(next.year, next.month, 1),
        ) {
            (Some(a), Some(b)) => (b - a).num_days() as u32,
            _ => 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionParams {
    pub projection_period: ProjectionPeriod,
    pub projection_length: u32,
    pub avg_check: f64,
    pub daily_covers: f64,
    pub food_bev_ratio: f64, // food share of revenue, percent
    pub seasonality_factor: f64,
    pub growth_rate: f64, // annual, percent
    pub apply_ramadan: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_revenue: f64,
    pub total_food: f64,
    pub total_beverage: f64,
    pub average_period_revenue: f64,
    pub yoy_growth: Option<f64>,
    pub peak_revenue: f64,
    pub peak_period: String,
    pub lowest_revenue: f64,
    pub lowest_period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueProjection {
    pub periods: Vec<String>,
    pub food: Vec<f64>,
    pub beverage: Vec<f64>,
    pub total: Vec<f64>,
    pub summary: ProjectionSummary,
    pub insights: Vec<String>,
    pub optimization_opportunities: Vec<String>,
}

struct PeriodShape {
    label: String,
    days: f64,
    seasonal: f64,
    growth_exponent: f64,
}

fn shape(period: ProjectionPeriod, start: YearMonth, i: u32, apply_ramadan: bool) -> PeriodShape {
    match period {
        ProjectionPeriod::Monthly => {
            let ym = start.plus(i);
            let mut seasonal = MONTHLY_SEASONALITY[(ym.month - 1) as usize];
            if apply_ramadan && ym.month == RAMADAN_MONTH {
                seasonal *= 0.7;
            }
            PeriodShape {
                label: format!("{}/{}", ym.month, ym.year),
                days: ym.days() as f64,
                seasonal,
                growth_exponent: i as f64 / 12.0,
            }
        }
        ProjectionPeriod::Quarterly => {
            let first = start.plus(i * 3);
            let quarter = (first.month - 1) / 3 + 1;
            let months: Vec<YearMonth> = (0..3).map(|j| first.plus(j)).collect();
            let mut seasonal =
                months.iter().map(|m| MONTHLY_SEASONALITY[(m.month - 1) as usize]).sum::<f64>() / 3.0;
            if apply_ramadan && months.iter().any(|m| m.month == RAMADAN_MONTH) {
                seasonal *= 0.9;
            }
            PeriodShape {
                label: format!("Q{}/{}", quarter, first.year),
                days: 90.0,
                seasonal,
                growth_exponent: i as f64 / 4.0,
            }
        }
        ProjectionPeriod::Yearly => PeriodShape {
            label: (start.year + i as i32).to_string(),
            days: 365.0,
            seasonal: if apply_ramadan { 0.95 } else { 1.0 },
            growth_exponent: i as f64,
        },
    }
}

/// First index holding the extreme value, matching "first seen wins" order.
fn extreme_index(values: &[f64], better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if better(*v, values[best]) {
            best = i;
        }
    }
    best
}

pub fn project_revenue(params: &ProjectionParams, start: YearMonth) -> ModelResult<RevenueProjection> {
    if params.projection_length == 0 || params.projection_length > MAX_PERIODS {
        return Err(ModelError::invalid(
            "projectionLength",
            format!("must be within [1, {MAX_PERIODS}], got {}", params.projection_length),
        ));
    }
    if !(1..=12).contains(&start.month) {
        return Err(ModelError::invalid("startMonth", format!("must be within [1, 12], got {}", start.month)));
    }
    let avg_check = positive("avgCheck", params.avg_check)?;
    let daily_covers = non_negative("dailyCovers", params.daily_covers)?;
    let food_share = percentage("foodBevRatio", params.food_bev_ratio)? / 100.0;
    let seasonality = clamped("seasonalityFactor", params.seasonality_factor, 0.5, 1.5)?;
    let growth = finite("growthRate", params.growth_rate)?;
    if growth <= -100.0 {
        return Err(ModelError::invalid("growthRate", format!("must be > -100, got {growth}")));
    }
    let growth = growth / 100.0;

    let base_daily = avg_check * daily_covers;
    let base_food = base_daily * food_share;
    let base_bev = base_daily * (1.0 - food_share);

    let n = params.projection_length as usize;
    let mut periods = Vec::with_capacity(n);
    let mut food = Vec::with_capacity(n);
    let mut beverage = Vec::with_capacity(n);
    let mut total = Vec::with_capacity(n);

    for i in 0..params.projection_length {
        let s = shape(params.projection_period, start, i, params.apply_ramadan);
        let factor = s.days * s.seasonal * seasonality * (1.0 + growth).powf(s.growth_exponent);
        let f = base_food * factor;
        let b = base_bev * factor;
        periods.push(s.label);
        food.push(f.round());
        beverage.push(b.round());
        total.push((f + b).round());
    }

    let total_revenue: f64 = total.iter().sum();
    let yoy_growth = (params.projection_period == ProjectionPeriod::Monthly && n >= 24).then(|| {
        let first: f64 = total[..12].iter().sum();
        let second: f64 = total[12..24].iter().sum();
        if first > 0.0 { (second / first - 1.0) * 100.0 } else { 0.0 }
    });
    let peak = extreme_index(&total, |a, b| a > b);
    let low = extreme_index(&total, |a, b| a < b);

    let summary = ProjectionSummary {
        total_revenue,
        total_food: food.iter().sum(),
        total_beverage: beverage.iter().sum(),
        average_period_revenue: total_revenue / n as f64,
        yoy_growth,
        peak_revenue: total[peak],
        peak_period: periods[peak].clone(),
        lowest_revenue: total[low],
        lowest_period: periods[low].clone(),
    };

    let insights = insights(params, base_daily, food_share, &total, &summary);
    let optimization_opportunities = opportunities(params, base_daily, &summary);

    Ok(RevenueProjection { periods, food, beverage, total, summary, insights, optimization_opportunities })
}

fn period_noun(period: ProjectionPeriod) -> &'static str {
    match period {
        ProjectionPeriod::Monthly => "months",
        ProjectionPeriod::Quarterly => "quarters",
        ProjectionPeriod::Yearly => "years",
    }
}

fn insights(
    params: &ProjectionParams,
    base_daily: f64,
    food_share: f64,
    total: &[f64],
    summary: &ProjectionSummary,
) -> Vec<String> {
    let first = total.first().copied().unwrap_or(0.0);
    let last = total.last().copied().unwrap_or(0.0);
    let trend = if last >= first { "growth" } else { "decline" };
    vec![
        format!(
            "Revenue shows a {trend} trend with SAR {:.2}M projected over {} {}",
            summary.total_revenue / 1_000_000.0,
            total.len(),
            period_noun(params.projection_period)
        ),
        format!("Food accounts for {:.1}% of projected revenue", food_share * 100.0),
        format!("Peak revenue of SAR {:.0} falls in {}", summary.peak_revenue, summary.peak_period),
        format!("Average daily revenue is SAR {base_daily:.0} before seasonality"),
        format!("Annual revenue without seasonality is SAR {:.0}", base_daily * 365.0),
    ]
}

fn opportunities(params: &ProjectionParams, base_daily: f64, summary: &ProjectionSummary) -> Vec<String> {
    let mut out = vec![
        format!(
            "Increasing the average check by 10% would add SAR {:.0} in annual revenue",
            base_daily * 0.10 * 365.0
        ),
        "Focus on beverage sales, which carry a higher margin than food".to_string(),
        format!("Run seasonal promotions to lift {}, the lowest revenue period", summary.lowest_period),
    ];
    if params.apply_ramadan {
        out.push("Develop Ramadan iftar and suhoor offerings to offset the 30% Ramadan reduction".to_string());
    }
    out.push(format!(
        "Raising daily covers by 15% would add SAR {:.0} in annual revenue",
        base_daily * 0.15 * 365.0
    ));
    out
}
