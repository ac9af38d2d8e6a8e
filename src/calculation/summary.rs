//! Monthly roll-up of pay periods.
//!
//! Periods are grouped by the calendar month of their pay date, with a
//! breakdown per employer.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PayPeriod;

/// Totals for one employer within a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerTotals {
    /// Display name of the employer.
    pub name: String,
    /// Shifts paid.
    pub shifts: u32,
    /// Paid hours.
    pub hours: Decimal,
    /// Gross pay.
    pub pay: Decimal,
    /// Withholding.
    pub tax: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
}

impl EmployerTotals {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            shifts: 0,
            hours: Decimal::ZERO,
            pay: Decimal::ZERO,
            tax: Decimal::ZERO,
            net_pay: Decimal::ZERO,
        }
    }

    fn add(&mut self, period: &PayPeriod) {
        let tax = period.tax.unwrap_or(Decimal::ZERO);
        self.shifts += period.shift_count;
        self.hours += period.total_hours;
        self.pay += period.amount;
        self.tax += tax;
        self.net_pay += period.net_pay.unwrap_or(period.amount - tax);
    }
}

/// Everything paid in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, 1 to 12.
    pub month: u32,
    /// Totals per employer id.
    pub employers: BTreeMap<String, EmployerTotals>,
    /// Totals across all employers.
    pub total: EmployerTotals,
}

impl MonthlySummary {
    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

/// Rolls pay periods up by the month they are paid in, oldest month first.
///
/// Untaxed periods count as zero tax with net pay equal to gross. Filter the
/// periods beforehand (for example with
/// [`DateWindow::contains`](super::DateWindow::contains)) to summarise only
/// part of a timeline.
///
/// # Example
///
/// ```no_run
/// use casual_pay::calculation::{TimelineOptions, build_timeline, monthly_summaries};
/// use casual_pay::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("config/casual").unwrap();
/// let profile = ConfigLoader::load_user("config/user.yaml").unwrap();
/// let shifts = ConfigLoader::load_shifts("config/shifts.yaml").unwrap();
/// let timeline = build_timeline(&shifts, &profile.employers, loader.data(), &TimelineOptions::default());
///
/// for summary in monthly_summaries(&timeline.pay_dates) {
///     println!("{}-{:02} net {}", summary.year, summary.month, summary.total.net_pay);
/// }
/// ```
pub fn monthly_summaries(periods: &[PayPeriod]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), MonthlySummary> = BTreeMap::new();

    for period in periods {
        let (year, month) = (period.date.year(), period.date.month());
        let summary = months.entry((year, month)).or_insert_with(|| MonthlySummary {
            year,
            month,
            employers: BTreeMap::new(),
            total: EmployerTotals::new("All employers"),
        });

        summary
            .employers
            .entry(period.employer_id.clone())
            .or_insert_with(|| EmployerTotals::new(&period.employer))
            .add(period);
        summary.total.add(period);
    }

    months.into_values().collect()
}
