//! Pay date scheduling.
//!
//! This module works out which pay period a date falls in for an employer,
//! and the date that period is paid on.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::Employer;

/// The pay period a date falls in, and when it is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayDateResult {
    /// The date the period is paid on.
    pub pay_date: NaiveDate,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
}

/// An employer's recurring pay schedule.
///
/// Periods start on `period_start` and run for `period_days`. Each period is
/// paid on the first `payday` strictly after it ends; when the period ends
/// on a payday the payment is made a week later.
///
/// When an anchor pay date is set and periods are longer than a week, every
/// period is a whole number of `period_days` away from the period paid on
/// the anchor. Without that, a fortnightly or monthly schedule would start a
/// fresh period on every `period_start` weekday. Only the anchor's period is
/// guaranteed to start on `period_start` when `period_days` is not a whole
/// number of weeks.
///
/// # Example
///
/// ```
/// use casual_pay::calculation::PaySchedule;
/// use chrono::{NaiveDate, Weekday};
///
/// let schedule = PaySchedule::new(Weekday::Thu, Weekday::Mon, 7);
/// let result = schedule.period_for(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
///
/// assert_eq!(result.period_start, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// assert_eq!(result.period_end, NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
/// assert_eq!(result.pay_date, NaiveDate::from_ymd_opt(2026, 1, 22).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaySchedule {
    payday: Weekday,
    period_start: Weekday,
    period_days: i64,
    anchor: Option<NaiveDate>,
}

impl PaySchedule {
    /// Creates an unanchored schedule. `period_days` below 1 is treated as 1.
    pub fn new(payday: Weekday, period_start: Weekday, period_days: u32) -> Self {
        Self {
            payday,
            period_start,
            period_days: i64::from(period_days.max(1)),
            anchor: None,
        }
    }

    /// Anchors the schedule on a known pay date.
    pub fn with_anchor(mut self, pay_date: NaiveDate) -> Self {
        self.anchor = Some(pay_date);
        self
    }

    /// Builds the schedule for an employer, anchored on its `next_pay_date`.
    pub fn for_employer(employer: &Employer) -> Self {
        Self::new(
            employer.payday,
            employer.pay_period_start,
            employer.pay_period_days,
        )
        .with_anchor(employer.next_pay_date)
    }

    /// Length of a period in days.
    pub fn period_days(&self) -> i64 {
        self.period_days
    }

    /// Finds the period containing `date` and its pay date.
    ///
    /// Always returns the same result for the same date.
    pub fn period_for(&self, date: NaiveDate) -> PayDateResult {
        let start = match self.reference_start() {
            Some(reference) => {
                let periods = (date - reference).num_days().div_euclid(self.period_days);
                reference + Duration::days(periods * self.period_days)
            }
            None => {
                let mut start = most_recent(self.period_start, date);
                while start + Duration::days(self.period_days) <= date {
                    start += Duration::days(self.period_days);
                }
                start
            }
        };

        let period_end = start + Duration::days(self.period_days - 1);
        PayDateResult {
            pay_date: self.pay_date_after(period_end),
            period_start: start,
            period_end,
        }
    }

    /// Finds the period paid on `pay_date`, if the schedule pays on it.
    pub fn period_paid_on(&self, pay_date: NaiveDate) -> Option<PayDateResult> {
        let result = self.period_for(pay_date - Duration::days(7));
        (result.pay_date == pay_date).then_some(result)
    }

    /// The first payday strictly after `period_end`, a week later when
    /// `period_end` is itself a payday.
    pub fn pay_date_after(&self, period_end: NaiveDate) -> NaiveDate {
        let offset = days_between(period_end.weekday(), self.payday);
        let offset = if offset == 0 { 7 } else { offset };
        period_end + Duration::days(offset)
    }

    /// Start of the period paid on the anchor, for schedules that keep phase.
    fn reference_start(&self) -> Option<NaiveDate> {
        if self.period_days <= 7 {
            return None;
        }
        let anchor = self.anchor?;
        Some(most_recent(
            self.period_start,
            anchor - Duration::days(self.period_days),
        ))
    }
}

/// Days forward from weekday `from` to weekday `to`, in `0..7`.
fn days_between(from: Weekday, to: Weekday) -> i64 {
    i64::from((to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7)
}

/// The most recent `weekday` on or before `date`.
fn most_recent(weekday: Weekday, date: NaiveDate) -> NaiveDate {
    date - Duration::days(days_between(weekday, date.weekday()))
}

/// Calculates the pay date and period for a shift date.
///
/// Convenience wrapper over [`PaySchedule::for_employer`] and
/// [`PaySchedule::period_for`].
pub fn calculate_pay_date(date: NaiveDate, employer: &Employer) -> PayDateResult {
    PaySchedule::for_employer(employer).period_for(date)
}
