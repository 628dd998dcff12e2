// src/calc/peak_hours.rs

use serde::{Deserialize, Serialize};

use super::{non_negative, ModelError, ModelResult};

const OPEN_HOUR: u32 = 8;
const CLOSE_HOUR: u32 = 23; // last trading hour, inclusive

/// Upper bound for the staff needed at 100% demand, per department.
pub const MAX_STAFF_AT_FULL_DEMAND: u32 = 1_000;
/// Share of average demand covered by staff rostered on every shift.
const CORE_STAFF_SHARE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Friday to Sunday trade on the weekend profile.
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Friday | Weekday::Saturday | Weekday::Sunday)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffType {
    #[default]
    All,
    Foh,
    Boh,
}

impl StaffType {
    fn of_cell(self, c: &HourCell) -> u32 {
        match self {
            StaffType::All => c.foh + c.boh,
            StaffType::Foh => c.foh,
            StaffType::Boh => c.boh,
        }
    }

    fn of_requirement(self, r: &Requirement) -> u32 {
        match self {
            StaffType::All => r.total,
            StaffType::Foh => r.foh,
            StaffType::Boh => r.boh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHourParams {
    #[serde(default = "one")]
    pub peak_factor: f64,
    #[serde(default)]
    pub apply_ramadan: bool,
    #[serde(default = "default_foh_at_full")]
    pub foh_at_full_demand: u32,
    #[serde(default = "default_boh_at_full")]
    pub boh_at_full_demand: u32,
    /// Restricts the view to one day; `None` shows every day plus an average row.
    #[serde(default)]
    pub selected_day: Option<Weekday>,
    #[serde(default)]
    pub selected_staff_type: StaffType,
}
fn one() -> f64 { 1.0 }
fn default_foh_at_full() -> u32 { 15 }
fn default_boh_at_full() -> u32 { 10 }

impl Default for PeakHourParams {
    fn default() -> Self {
        Self {
            peak_factor: one(),
            apply_ramadan: false,
            foh_at_full_demand: default_foh_at_full(),
            boh_at_full_demand: default_boh_at_full(),
            selected_day: None,
            selected_staff_type: StaffType::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourCell {
    pub hour: u32,
    pub value: f64,
    pub adjusted_value: f64,
    pub foh: u32,
    pub boh: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProfile {
    pub day: Weekday,
    pub hours: Vec<HourCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Requirement {
    pub foh: u32,
    pub boh: u32,
    pub total: u32,
    pub peak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementTotals {
    pub foh: u32,
    pub boh: u32,
    pub total: u32,
    pub peak_foh: u32,
    pub peak_boh: u32,
    pub peak_total: u32,
}

/// One row of the filtered heatmap: per-hour counts of the selected staff type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow {
    pub label: String,
    pub counts: Vec<u32>,
    pub average: u32,
    pub peak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapView {
    pub selected_day: Option<Weekday>,
    pub staff_type: StaffType,
    pub hours: Vec<u32>,
    pub rows: Vec<ViewRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHourAnalysis {
    pub heatmap: Vec<DayProfile>,
    pub by_day: Vec<(Weekday, Requirement)>,
    pub by_hour: Vec<(u32, Requirement)>,
    pub totals: RequirementTotals,
    pub peak_day: Weekday,
    pub peak_hour: u32,
    pub view: HeatmapView,
    pub insights: Vec<String>,
    pub optimization_opportunities: Vec<String>,
}

/// Baseline demand (0..1) for a trading hour.
pub fn base_demand(day: Weekday, hour: u32) -> f64 {
    if day.is_weekend() {
        match hour {
            11..=15 => 0.85,
            18..=22 => 1.0,
            _ => 0.5,
        }
    } else {
        match hour {
            12..=14 => 0.8,
            18..=21 => 0.9,
            _ => 0.4,
        }
    }
}

fn ramadan_multiplier(hour: u32) -> f64 {
    // Dinner shifts after iftar.
    if (19..=23).contains(&hour) { 0.9 } else { 0.6 }
}

fn mean(sum: u32, n: usize) -> u32 {
    (sum as f64 / n as f64).round() as u32
}

fn staff_at_full(field: &'static str, v: u32) -> ModelResult<u32> {
    if v > MAX_STAFF_AT_FULL_DEMAND {
        return Err(ModelError::invalid(field, format!("must be <= {MAX_STAFF_AT_FULL_DEMAND}, got {v}")));
    }
    Ok(v)
}

pub fn analyze_peak_hours(params: &PeakHourParams) -> ModelResult<PeakHourAnalysis> {
    let peak_factor = non_negative("peakFactor", params.peak_factor)?;
    let foh_at_full = staff_at_full("fohAtFullDemand", params.foh_at_full_demand)? as f64;
    let boh_at_full = staff_at_full("bohAtFullDemand", params.boh_at_full_demand)? as f64;
    let hours: Vec<u32> = (OPEN_HOUR..=CLOSE_HOUR).collect();

    let heatmap: Vec<DayProfile> = Weekday::ALL
        .iter()
        .map(|&day| DayProfile {
            day,
            hours: hours
                .iter()
                .map(|&hour| {
                    let value = base_demand(day, hour);
                    let mut adjusted = value * peak_factor;
                    if params.apply_ramadan {
                        adjusted *= ramadan_multiplier(hour);
                    }
                    let adjusted_value = adjusted.min(1.0);
                    HourCell {
                        hour,
                        value,
                        adjusted_value,
                        foh: (adjusted_value * foh_at_full).round() as u32,
                        boh: (adjusted_value * boh_at_full).round() as u32,
                    }
                })
                .collect(),
        })
        .collect();

    let mut by_day: Vec<(Weekday, Requirement)> = Vec::with_capacity(7);
    let mut hour_sums = vec![Requirement::default(); hours.len()];
    let mut totals = RequirementTotals::default();

    for profile in &heatmap {
        let mut day_req = Requirement::default();
        for (i, cell) in profile.hours.iter().enumerate() {
            let total = cell.foh + cell.boh;
            day_req.foh += cell.foh;
            day_req.boh += cell.boh;
            day_req.total += total;
            day_req.peak = day_req.peak.max(total);

            let h = &mut hour_sums[i];
            h.foh += cell.foh;
            h.boh += cell.boh;
            h.total += total;
            h.peak = h.peak.max(total);

            totals.peak_foh = totals.peak_foh.max(cell.foh);
            totals.peak_boh = totals.peak_boh.max(cell.boh);
            totals.peak_total = totals.peak_total.max(total);
        }
        by_day.push((profile.day, day_req));
    }

    let days = heatmap.len();
    let by_hour: Vec<(u32, Requirement)> = hours
        .iter()
        .zip(&hour_sums)
        .map(|(&hour, sum)| {
            let req = Requirement {
                foh: mean(sum.foh, days),
                boh: mean(sum.boh, days),
                total: mean(sum.total, days),
                peak: sum.peak,
            };
            (hour, req)
        })
        .collect();

    totals.foh = mean(by_hour.iter().map(|(_, r)| r.foh).sum(), hours.len());
    totals.boh = mean(by_hour.iter().map(|(_, r)| r.boh).sum(), hours.len());
    totals.total = totals.foh + totals.boh;

    // First day/hour to reach the maximum wins.
    let mut peak_day = by_day[0];
    for entry in &by_day[1..] {
        if entry.1.peak > peak_day.1.peak {
            peak_day = *entry;
        }
    }
    let mut peak_hour = (hours[0], hour_sums[0].total);
    for (&hour, sum) in hours.iter().zip(&hour_sums).skip(1) {
        if sum.total > peak_hour.1 {
            peak_hour = (hour, sum.total);
        }
    }

    let insights = insights(&by_day, &by_hour, &totals, peak_day.0, peak_hour.0);
    let optimization_opportunities = opportunities(&totals);
    let view = view(&heatmap, &by_day, &by_hour, &totals, params.selected_day, params.selected_staff_type);

    Ok(PeakHourAnalysis {
        heatmap,
        by_day,
        by_hour,
        totals,
        peak_day: peak_day.0,
        peak_hour: peak_hour.0,
        view,
        insights,
        optimization_opportunities,
    })
}

fn view(
    heatmap: &[DayProfile],
    by_day: &[(Weekday, Requirement)],
    by_hour: &[(u32, Requirement)],
    totals: &RequirementTotals,
    selected_day: Option<Weekday>,
    staff: StaffType,
) -> HeatmapView {
    let hours: Vec<u32> = by_hour.iter().map(|(h, _)| *h).collect();
    let mut rows: Vec<ViewRow> = heatmap
        .iter()
        .zip(by_day)
        .filter(|(profile, _)| selected_day.map_or(true, |d| d == profile.day))
        .map(|(profile, (_, req))| {
            let counts: Vec<u32> = profile.hours.iter().map(|c| staff.of_cell(c)).collect();
            ViewRow {
                label: format!("{:?}", profile.day),
                average: mean(staff.of_requirement(req), hours.len()),
                peak: counts.iter().copied().max().unwrap_or(0),
                counts,
            }
        })
        .collect();

    if selected_day.is_none() {
        let (average, peak) = match staff {
            StaffType::All => (totals.total, totals.peak_total),
            StaffType::Foh => (totals.foh, totals.peak_foh),
            StaffType::Boh => (totals.boh, totals.peak_boh),
        };
        rows.push(ViewRow {
            label: "Average".to_string(),
            counts: by_hour.iter().map(|(_, r)| staff.of_requirement(r)).collect(),
            average,
            peak,
        });
    }

    HeatmapView { selected_day, staff_type: staff, hours, rows }
}

fn opportunities(totals: &RequirementTotals) -> Vec<String> {
    let core = totals.total as f64 * CORE_STAFF_SHARE;
    let flex = (totals.peak_total as f64 - core).max(0.0);
    vec![
        "Consider staggered shifts to cover peak hours more efficiently".to_string(),
        "Implement split shifts for staff during lunch and dinner peaks".to_string(),
        "Cross-train staff to flex between positions during peak hours".to_string(),
        format!(
            "Schedule {} core staff for all shifts and {} flex staff for peak hours",
            core.round(),
            flex.round()
        ),
        "Adjust BOH prep schedule to align with peak service hours".to_string(),
    ]
}

fn insights(
    by_day: &[(Weekday, Requirement)],
    by_hour: &[(u32, Requirement)],
    totals: &RequirementTotals,
    peak_day: Weekday,
    peak_hour: u32,
) -> Vec<String> {
    let avg_total = |pred: &dyn Fn(Weekday) -> bool| {
        let picked: Vec<u32> = by_day.iter().filter(|(d, _)| pred(*d)).map(|(_, r)| r.total).collect();
        picked.iter().sum::<u32>() as f64 / picked.len().max(1) as f64
    };
    let weekend = avg_total(&|d| d.is_weekend());
    let weekday = avg_total(&|d| !d.is_weekend());
    let window = |from: u32, to: u32| {
        let picked: Vec<u32> =
            by_hour.iter().filter(|(h, _)| (from..to).contains(h)).map(|(_, r)| r.total).collect();
        (picked.iter().sum::<u32>() as f64 / picked.len().max(1) as f64).round()
    };

    let mut out = vec![format!("Peak staffing requirements occur on {peak_day:?} at {peak_hour}:00")];
    if weekday > 0.0 {
        out.push(format!(
            "Weekend staffing needs are {:.0}% higher than weekdays",
            weekend / weekday * 100.0 - 100.0
        ));
    }
    out.push(format!("Lunch peak requires {} staff on average", window(12, 15)));
    out.push(format!("Dinner peak requires {} staff on average", window(18, 22)));
    if totals.foh > 0 {
        out.push(format!(
            "The ratio of BOH to FOH staff is {:.2}",
            totals.boh as f64 / totals.foh as f64
        ));
    }
    out
}
