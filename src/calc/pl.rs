// src/calc/pl.rs

use std::f64::consts::TAU;

use serde::Serialize;

use super::{non_negative, percentage, ModelError, ModelResult};
use crate::models::ExpenseConfig;

/// Corporate tax rate, charged on positive earnings before tax only.
pub const TAX_RATE: f64 = 0.15;
/// Peak-to-mean swing of the trailing twelve-month revenue curve.
const HISTORY_SWING: f64 = 0.2;

const MONTH_LABELS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossStatement {
    pub revenue: f64,
    pub food_revenue: f64,
    pub beverage_revenue: f64,
    pub food_cost: f64,
    pub beverage_cost: f64,
    pub total_cogs: f64,
    pub gross_profit: f64,
    pub labor_cost: f64,
    pub rent: f64,
    pub marketing: f64,
    pub utilities: f64,
    pub other_expenses: f64,
    pub total_operating_expenses: f64,
    pub operating_profit: f64,
    pub depreciation: f64,
    pub ebit: f64,
    pub interest: f64,
    pub ebt: f64,
    pub taxes: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub cogs_pct: f64,
    pub gross_margin_pct: f64,
    pub operating_margin_pct: f64,
    pub net_margin_pct: f64,
}

impl ProfitLossStatement {
    fn share(&self, v: f64) -> f64 {
        if self.revenue > 0.0 { v / self.revenue * 100.0 } else { 0.0 }
    }

    pub fn margins(&self) -> Margins {
        Margins {
            cogs_pct: self.share(self.total_cogs),
            gross_margin_pct: self.share(self.gross_profit),
            operating_margin_pct: self.share(self.operating_profit),
            net_margin_pct: self.share(self.net_profit),
        }
    }
}

fn validated(cfg: &ExpenseConfig) -> ModelResult<()> {
    percentage("foodCostPct", cfg.food_cost_pct)?;
    percentage("beverageCostPct", cfg.beverage_cost_pct)?;
    percentage("laborPct", cfg.labor_pct)?;
    percentage("rentPct", cfg.rent_pct)?;
    percentage("marketingPct", cfg.marketing_pct)?;
    percentage("utilitiesPct", cfg.utilities_pct)?;
    percentage("otherPct", cfg.other_pct)?;
    percentage("foodRevenueSharePct", cfg.food_revenue_share_pct)?;
    percentage("depreciationPct", cfg.depreciation_pct)?;
    percentage("interestPct", cfg.interest_pct)?;
    Ok(())
}

pub fn compute_pl(revenue: f64, cfg: &ExpenseConfig) -> ModelResult<ProfitLossStatement> {
    let revenue = non_negative("monthlyRevenue", revenue)?;
    validated(cfg)?;

    let of_revenue = |pct: f64| revenue * (pct / 100.0);

    let food_revenue = of_revenue(cfg.food_revenue_share_pct);
    let beverage_revenue = revenue - food_revenue;
    let food_cost = food_revenue * (cfg.food_cost_pct / 100.0);
    let beverage_cost = beverage_revenue * (cfg.beverage_cost_pct / 100.0);
    let total_cogs = food_cost + beverage_cost;
    let gross_profit = revenue - total_cogs;

    let labor_cost = of_revenue(cfg.labor_pct);
    let rent = of_revenue(cfg.rent_pct);
    let marketing = of_revenue(cfg.marketing_pct);
    let utilities = of_revenue(cfg.utilities_pct);
    let other_expenses = of_revenue(cfg.other_pct);
    let total_operating_expenses = labor_cost + rent + marketing + utilities + other_expenses;
    let operating_profit = gross_profit - total_operating_expenses;

    let depreciation = of_revenue(cfg.depreciation_pct);
    let ebit = operating_profit - depreciation;
    let interest = of_revenue(cfg.interest_pct);
    let ebt = ebit - interest;
    let taxes = ebt.max(0.0) * TAX_RATE;

    Ok(ProfitLossStatement {
        revenue,
        food_revenue,
        beverage_revenue,
        food_cost,
        beverage_cost,
        total_cogs,
        gross_profit,
        labor_cost,
        rent,
        marketing,
        utilities,
        other_expenses,
        total_operating_expenses,
        operating_profit,
        depreciation,
        ebit,
        interest,
        ebt,
        taxes,
        net_profit: ebt - taxes,
    })
}

fn grade(v: f64, excellent: f64, good: f64, average: f64) -> &'static str {
    if v > excellent {
        "excellent"
    } else if v > good {
        "good"
    } else if v > average {
        "average"
    } else {
        "below average"
    }
}

/// Industry benchmark commentary for a statement.
pub fn pl_insights(st: &ProfitLossStatement, cfg: &ExpenseConfig) -> Vec<String> {
    let m = st.margins();
    let labor = cfg.labor_pct;
    let labor_grade = if labor < 22.0 {
        "excellent"
    } else if labor < 25.0 {
        "good"
    } else if labor < 30.0 {
        "average"
    } else {
        "high"
    };
    let cogs_grade = if m.cogs_pct < 25.0 {
        "excellent"
    } else if m.cogs_pct < 28.0 {
        "good"
    } else if m.cogs_pct < 32.0 {
        "average"
    } else {
        "high"
    };

    vec![
        format!(
            "Gross profit margin of {:.1}% is {} for the F&B industry",
            m.gross_margin_pct,
            grade(m.gross_margin_pct, 70.0, 65.0, 60.0)
        ),
        format!(
            "Operating profit (EBITDA) of {:.1}% is {} for the F&B industry",
            m.operating_margin_pct,
            grade(m.operating_margin_pct, 25.0, 20.0, 15.0)
        ),
        format!(
            "Net profit margin of {:.1}% is {} for the F&B industry",
            m.net_margin_pct,
            grade(m.net_margin_pct, 15.0, 10.0, 5.0)
        ),
        format!("Labor cost at {labor}% of revenue is {labor_grade} for the F&B industry"),
        format!("Combined food and beverage cost of {:.1}% is {cogs_grade}", m.cogs_pct),
    ]
}

/// Trailing twelve months of P&L lines, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlHistory {
    pub labels: Vec<&'static str>,
    pub revenue: Vec<f64>,
    pub cogs: Vec<f64>,
    pub operating_expenses: Vec<f64>,
    pub operating_profit: Vec<f64>,
    pub net_profit: Vec<f64>,
}

/// Rebuilds a twelve-month history ending at `end_month` (1..12) around the
/// given monthly revenue. Month `i` trades at `1 + sin(2πi/11) × 0.2` of it.
pub fn pl_history(monthly_revenue: f64, cfg: &ExpenseConfig, end_month: u32) -> ModelResult<PlHistory> {
    if !(1..=12).contains(&end_month) {
        return Err(ModelError::invalid("endMonth", format!("must be within [1, 12], got {end_month}")));
    }
    let mut h = PlHistory {
        labels: Vec::with_capacity(12),
        revenue: Vec::with_capacity(12),
        cogs: Vec::with_capacity(12),
        operating_expenses: Vec::with_capacity(12),
        operating_profit: Vec::with_capacity(12),
        net_profit: Vec::with_capacity(12),
    };
    for i in 0..12u32 {
        let seasonal = 1.0 + (i as f64 / 11.0 * TAU).sin() * HISTORY_SWING;
        let st = compute_pl(monthly_revenue * seasonal, cfg)?;
        h.labels.push(MONTH_LABELS[((end_month + i) % 12) as usize]);
        h.revenue.push(st.revenue.round());
        h.cogs.push(st.total_cogs.round());
        h.operating_expenses.push(st.total_operating_expenses.round());
        h.operating_profit.push(st.operating_profit.round());
        h.net_profit.push(st.net_profit.round());
    }
    Ok(h)
}

/// Cost and mix levers worth pursuing, sized against this statement.
pub fn pl_opportunities(st: &ProfitLossStatement) -> Vec<String> {
    vec![
        format!(
            "Reducing food cost by 2% would increase gross profit by SAR {:.0} monthly",
            st.food_revenue * 0.02
        ),
        format!(
            "Reducing labor cost by 2% would increase operating profit by SAR {:.0} monthly",
            st.revenue * 0.02
        ),
        "Increasing beverage sales by 5% would improve overall margins due to higher profitability".to_string(),
        "Implementing energy efficiency measures could reduce utilities by 1% of revenue".to_string(),
        "Optimizing staffing during non-peak hours could reduce labor costs by 3-5%".to_string(),
    ]
}
