//! Pay period model.
//!
//! A [`PayPeriod`] is one payment from one employer: the shifts it covers,
//! the hours and pay by rate label, and after the tax pass the withholding
//! and net pay.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::RateLabel;

/// One employer payment, keyed by `(employer_id, date)`.
///
/// `amount` always equals the sum of `pay_by_rate` and `total_hours` the sum
/// of `hours_by_rate`.
///
/// # Example
///
/// ```
/// use casual_pay::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::empty(
///     "emp_cafe",
///     "Harbour Cafe",
///     NaiveDate::from_ymd_opt(2026, 1, 22).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
/// );
///
/// assert!(period.is_empty());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 19).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriod {
    /// The pay date.
    pub date: NaiveDate,
    /// Display name of the employer.
    pub employer: String,
    /// Identifier of the employer.
    pub employer_id: String,
    /// Gross pay for the period.
    pub amount: Decimal,
    /// Paid hours in the period.
    pub total_hours: Decimal,
    /// Number of shifts paid in the period.
    pub shift_count: u32,
    /// Dates of the contributing shifts, in input order.
    pub shifts: Vec<NaiveDate>,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Hours by rate label.
    pub hours_by_rate: BTreeMap<RateLabel, Decimal>,
    /// Pay by rate label.
    pub pay_by_rate: BTreeMap<RateLabel, Decimal>,
    /// PAYG withholding, filled in by the tax pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,
    /// Gross less withholding, filled in by the tax pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_pay: Option<Decimal>,
    /// Employer superannuation contribution, filled in by the tax pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superannuation: Option<Decimal>,
}

impl PayPeriod {
    /// Creates a pay period with no shifts in it.
    pub fn empty(
        employer_id: &str,
        employer: &str,
        date: NaiveDate,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Self {
        Self {
            date,
            employer: employer.to_string(),
            employer_id: employer_id.to_string(),
            amount: Decimal::ZERO,
            total_hours: Decimal::ZERO,
            shift_count: 0,
            shifts: Vec::new(),
            period_start,
            period_end,
            hours_by_rate: BTreeMap::new(),
            pay_by_rate: BTreeMap::new(),
            tax: None,
            net_pay: None,
            superannuation: None,
        }
    }

    /// Returns true when no shift was paid in this period.
    pub fn is_empty(&self) -> bool {
        self.shift_count == 0
    }

    /// Checks if a date falls within the period, both ends inclusive.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }

    /// Withholding as a percentage of gross, to one decimal place.
    ///
    /// Zero when the period has no gross pay or has not been taxed yet.
    pub fn effective_tax_rate(&self) -> Decimal {
        match self.tax {
            Some(tax) if self.amount > Decimal::ZERO => (tax / self.amount * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            _ => Decimal::ZERO,
        }
    }
}
