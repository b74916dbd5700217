use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ReportError, ReportResult};

pub const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

pub const MIN_YEAR: i32 = 1900;
/// Last year whose timestamps keep the fixed four-digit width
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Defaults to the current UTC year
    pub year: Option<String>,
    /// 1-12, defaults to the current UTC month
    pub month: Option<String>,
}

/// Numeric reading of a query value.
///
/// `None` when the value is absent or not a number; a blank value reads as 0.
pub fn parse_report_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|value| !value.is_nan())
}

impl ReportQuery {
    /// `(year, month)` of the report, falling back to the month of `now`
    pub fn period(&self, now: DateTime<Utc>) -> ReportResult<(i32, u32)> {
        let year = parse_report_number(self.year.as_deref()).unwrap_or(f64::from(now.year()));
        let month = parse_report_number(self.month.as_deref()).unwrap_or(f64::from(now.month()));

        if year.fract() != 0.0 || !(f64::from(MIN_YEAR)..=f64::from(MAX_YEAR)).contains(&year) {
            return Err(ReportError::InvalidPeriod(
                "The 'year' parameter is invalid".to_string(),
            ));
        }
        if month.fract() != 0.0 || !(1.0..=12.0).contains(&month) {
            return Err(ReportError::InvalidPeriod(
                "The 'month' parameter must be between 1 and 12".to_string(),
            ));
        }

        Ok((year as i32, month as u32))
    }
}

/// `[start, end)` of a calendar month in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: u32,
}

pub fn month_window(year: i32, month: u32) -> Option<MonthWindow> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days = u32::try_from((next - first).num_days()).ok()?;

    Some(MonthWindow {
        start: first.and_hms_opt(0, 0, 0)?.and_utc(),
        end: next.and_hms_opt(0, 0, 0)?.and_utc(),
        days,
    })
}

/// Check-in and check-out of a stay counted for occupancy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayWindow {
    #[serde(with = "database::mongodb::timestamp")]
    pub check_in: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub check_out: DateTime<Utc>,
}

impl StayWindow {
    /// Calendar nights of the stay that fall inside `window`
    pub fn nights_within(&self, window: &MonthWindow) -> i64 {
        let start = self.check_in.max(window.start);
        let end = self.check_out.min(window.end);
        if end <= start {
            return 0;
        }
        (end.date_naive() - start.date_naive()).num_days()
    }
}

/// `part / whole` as a percentage with two decimals; 0 when `whole` is 0
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole * 10_000.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
    /// Spanish month name and year, e.g. `marzo 2024`
    pub label: String,
    #[serde(with = "database::mongodb::timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub end: DateTime<Utc>,
    pub days_in_month: u32,
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32, window: &MonthWindow) -> Self {
        let name = MONTH_NAMES
            .get(month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or_default();
        Self {
            year,
            month,
            label: format!("{name} {year}"),
            start: window.start,
            end: window.end,
            days_in_month: window.days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Occupancy {
    pub rooms_count: u64,
    pub total_room_nights_available: u64,
    pub total_nights_booked: i64,
    /// Percentage, two decimals
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomIncome {
    pub room_number: i32,
    pub total_income: f64,
    pub payments_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub total_income: f64,
    pub by_room: Vec<RoomIncome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cancellations {
    pub total_reservations: u64,
    pub cancelled_reservations: u64,
    /// Percentage, two decimals
    pub cancellation_rate: f64,
}

/// Occupancy, income and cancellations for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyReport {
    pub period: ReportPeriod,
    pub occupancy: Occupancy,
    pub income: Income,
    pub cancellations: Cancellations,
}
