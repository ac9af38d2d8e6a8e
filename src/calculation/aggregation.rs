//! Pay period aggregation and gap filling.
//!
//! Computed shifts are grouped by `(employer_id, pay_date)` into
//! [`PayPeriod`]s. Rate sub-totals are summed unrounded and rounded once per
//! period; `amount` and `total_hours` are then the sums of the rounded
//! sub-totals, so they always agree with the breakdown.
//!
//! Gap filling adds an empty period for every pay date an employer's cycle
//! produces inside a [`DateWindow`] that has no real period, so a timeline
//! never skips a pay date.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{ComputedShift, Employer, PayCycle, PayPeriod};

use super::pay_date::PaySchedule;
use super::rounding::round_half_up_2;

type PeriodKey = (String, NaiveDate);

/// Accumulates computed shifts into pay periods.
///
/// Summation is order-independent, so aggregators built over disjoint sets
/// of shifts can be combined with [`PayPeriodAggregator::merge`].
///
/// # Example
///
/// ```no_run
/// use casual_pay::calculation::{PayPeriodAggregator, calculate_shifts};
/// use casual_pay::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("config/casual").unwrap();
/// let profile = ConfigLoader::load_user("config/user.yaml").unwrap();
/// let shifts = ConfigLoader::load_shifts("config/shifts.yaml").unwrap();
///
/// let mut aggregator = PayPeriodAggregator::new();
/// aggregator.extend(&calculate_shifts(&shifts, &profile.employers, loader.data()));
/// for period in aggregator.finish() {
///     println!("{} {} {}", period.date, period.employer, period.amount);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayPeriodAggregator {
    periods: BTreeMap<PeriodKey, PayPeriod>,
}

impl PayPeriodAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one shift to the period for its employer and pay date.
    ///
    /// The first shift for a key seeds the period bounds.
    pub fn add(&mut self, shift: &ComputedShift) {
        let key = (shift.employer_id().to_string(), shift.pay_date);
        let period = self.periods.entry(key).or_insert_with(|| {
            PayPeriod::empty(
                shift.employer_id(),
                &shift.shift.employer,
                shift.pay_date,
                shift.period_start,
                shift.period_end,
            )
        });

        period.shift_count += 1;
        period.shifts.push(shift.date());
        for line in &shift.rate_lines {
            *period.hours_by_rate.entry(line.label).or_default() += line.hours;
            *period.pay_by_rate.entry(line.label).or_default() += line.pay;
        }
    }

    /// Adds every shift in order.
    pub fn extend(&mut self, shifts: &[ComputedShift]) {
        for shift in shifts {
            self.add(shift);
        }
    }

    /// Combines another aggregator's running totals into this one.
    pub fn merge(&mut self, other: PayPeriodAggregator) {
        for (key, incoming) in other.periods {
            match self.periods.get_mut(&key) {
                Some(period) => {
                    period.shift_count += incoming.shift_count;
                    period.shifts.extend(incoming.shifts);
                    for (label, hours) in incoming.hours_by_rate {
                        *period.hours_by_rate.entry(label).or_default() += hours;
                    }
                    for (label, pay) in incoming.pay_by_rate {
                        *period.pay_by_rate.entry(label).or_default() += pay;
                    }
                }
                None => {
                    self.periods.insert(key, incoming);
                }
            }
        }
    }

    /// Number of distinct pay periods seen so far.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns true when no shift has been added.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Rounds the sub-totals and returns the periods sorted by date.
    pub fn finish(self) -> Vec<PayPeriod> {
        let mut periods: Vec<PayPeriod> = self.periods.into_values().map(finalize).collect();
        sort_periods(&mut periods);
        periods
    }
}

fn finalize(mut period: PayPeriod) -> PayPeriod {
    for value in period
        .hours_by_rate
        .values_mut()
        .chain(period.pay_by_rate.values_mut())
    {
        *value = round_half_up_2(*value);
    }
    period.total_hours = period.hours_by_rate.values().copied().sum();
    period.amount = period.pay_by_rate.values().copied().sum();
    period
}

fn sort_periods(periods: &mut [PayPeriod]) {
    periods.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.employer_id.cmp(&b.employer_id))
    });
}

/// Groups computed shifts into pay periods, sorted by pay date.
pub fn aggregate_pay_periods(shifts: &[ComputedShift]) -> Vec<PayPeriod> {
    let mut aggregator = PayPeriodAggregator::new();
    aggregator.extend(shifts);
    aggregator.finish()
}

/// An inclusive range of dates a timeline covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First date in the window.
    pub start: NaiveDate,
    /// Last date in the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window covering `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::CalculationError {
                message: format!("window start {} is after window end {}", start, end),
            });
        }
        Ok(Self { start, end })
    }

    /// A window from `months_back` months before `today` to `months_ahead`
    /// months after it.
    ///
    /// # Example
    ///
    /// ```
    /// use casual_pay::calculation::DateWindow;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 5, 31).unwrap();
    /// let window = DateWindow::around(today, 3, 1);
    /// assert_eq!(window.start, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    /// assert_eq!(window.end, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
    /// ```
    pub fn around(today: NaiveDate, months_back: u32, months_ahead: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(NaiveDate::MIN);
        let end = today
            .checked_add_months(Months::new(months_ahead))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Checks if a date falls within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Every pay date an employer's cycle produces inside `window`, latest first.
///
/// The cycle steps from `next_pay_date` by 7 days for weekly employers and
/// 14 for fortnightly. Monthly employers step one `pay_period_days` period
/// at a time through their own schedule, since a payday weekday moves the
/// pay date whenever the period is not a whole number of weeks.
pub fn theoretical_pay_dates(employer: &Employer, window: DateWindow) -> Vec<NaiveDate> {
    if employer.paycycle == PayCycle::Monthly {
        if let Some(dates) = scheduled_pay_dates(employer, window) {
            return dates;
        }
    }

    let step_days = employer.paycycle.cycle_days(employer.pay_period_days);
    if step_days < 1 {
        warn!(employer = %employer.id, "Pay cycle has no length, no pay dates generated");
        return Vec::new();
    }
    let step = Duration::days(step_days);

    let mut date = employer.next_pay_date;
    while let Some(next) = date.checked_add_signed(step).filter(|d| *d <= window.end) {
        date = next;
    }
    while date > window.end {
        match date.checked_sub_signed(step) {
            Some(previous) => date = previous,
            None => return Vec::new(),
        }
    }

    let mut dates = Vec::new();
    while date >= window.start {
        dates.push(date);
        match date.checked_sub_signed(step) {
            Some(previous) => date = previous,
            None => break,
        }
    }
    dates
}

fn scheduled_pay_dates(employer: &Employer, window: DateWindow) -> Option<Vec<NaiveDate>> {
    let schedule = PaySchedule::for_employer(employer);
    let mut period = schedule.period_paid_on(employer.next_pay_date)?;

    while let Some(next) = period
        .period_end
        .succ_opt()
        .map(|day| schedule.period_for(day))
        .filter(|next| next.pay_date <= window.end)
    {
        period = next;
    }
    while period.pay_date > window.end {
        period = schedule.period_for(period.period_start.pred_opt()?);
    }

    let mut dates = Vec::new();
    while period.pay_date >= window.start {
        dates.push(period.pay_date);
        match period.period_start.pred_opt() {
            Some(previous) => period = schedule.period_for(previous),
            None => break,
        }
    }
    Some(dates)
}

/// Adds an empty period for every theoretical pay date in `window` that no
/// real period covers, and returns all periods sorted by date.
///
/// An empty period takes its bounds from the employer's schedule when the
/// schedule pays on that date. Otherwise it ends the day before the pay date
/// and runs back `pay_period_days`.
pub fn fill_pay_period_gaps(
    periods: Vec<PayPeriod>,
    employers: &[Employer],
    window: DateWindow,
) -> Vec<PayPeriod> {
    let existing: HashSet<PeriodKey> = periods
        .iter()
        .map(|p| (p.employer_id.clone(), p.date))
        .collect();

    let mut merged = periods;
    for employer in employers {
        let schedule = PaySchedule::for_employer(employer);
        for pay_date in theoretical_pay_dates(employer, window) {
            if existing.contains(&(employer.id.clone(), pay_date)) {
                continue;
            }

            let (period_start, period_end) = match schedule.period_paid_on(pay_date) {
                Some(period) => (period.period_start, period.period_end),
                None => {
                    let end = pay_date - Duration::days(1);
                    let days = i64::from(employer.pay_period_days.max(1));
                    (end - Duration::days(days - 1), end)
                }
            };

            debug!(
                employer = %employer.id,
                pay_date = %pay_date,
                "Synthesized empty pay period"
            );
            merged.push(PayPeriod::empty(
                &employer.id,
                &employer.name,
                pay_date,
                period_start,
                period_end,
            ));
        }
    }

    sort_periods(&mut merged);
    merged
}
