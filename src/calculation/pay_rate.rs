//! Pay rate classification.
//!
//! This module decides which casual rate a shift is paid at and works out
//! the gross pay. Classification is by priority: public holiday, Sunday,
//! Saturday, weekday evening split, then ordinary.

use chrono::Weekday;
use rust_decimal::Decimal;

use crate::config::{PublicHoliday, WageRates};
use crate::models::{RateLabel, RateLine, RawShift};

use super::rounding::round_half_up_2;

/// Minute of the day from which weekday hours attract the evening rate.
pub const EVENING_START_MINUTES: i64 = 18 * 60;

/// The top-level category a shift was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftClass {
    /// The date is a national or state public holiday.
    PublicHoliday,
    /// The shift starts on a Sunday.
    Sunday,
    /// The shift starts on a Saturday.
    Saturday,
    /// A weekday shift with hours after 18:00.
    Evening,
    /// A weekday daytime shift.
    Ordinary,
}

/// The result of classifying one shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateClassification {
    /// The category the shift was paid under.
    pub class: ShiftClass,
    /// Headline rate, rounded to cents. The ordinary rate for an evening split.
    pub payrate: Decimal,
    /// Gross pay, rounded to cents.
    pub pay: Decimal,
    /// Hours after 18:00, rounded, for evening splits only.
    pub evening_hours: Option<Decimal>,
    /// Name of the public holiday, when there is one.
    pub holiday_name: Option<String>,
    /// Unrounded hours and pay by rate label.
    pub lines: Vec<RateLine>,
}

/// Hours of the shift that fall after 18:00.
///
/// Uses the midnight-adjusted span, so an overnight shift counts every
/// minute from 18:00 (or its start, if later) to its end.
pub fn evening_hours(shift: &RawShift) -> Decimal {
    let (start, end) = shift.minute_span();
    if end <= EVENING_START_MINUTES {
        return Decimal::ZERO;
    }
    Decimal::from(end - start.max(EVENING_START_MINUTES)) / Decimal::from(60)
}

/// Classifies a shift and calculates its pay.
///
/// # Arguments
///
/// * `shift` - The shift as recorded
/// * `hours_worked` - Paid hours after breaks, unrounded
/// * `rates` - The employer's wage level rates; `None` pays every hour at 0
/// * `holiday` - The public holiday on the shift date for the employer's state
///
/// # Evening split
///
/// Pay is `(hours_worked - evening) × ordinary + evening × evening_mon_fri`.
/// Evening hours are measured on the scheduled span, so a shift that starts
/// after 18:00 and has a meal break deducted carries a negative regular
/// component. The headline `payrate` stays the ordinary rate.
///
/// # Examples
///
/// ```no_run
/// use casual_pay::calculation::{classify_shift, ShiftClass};
/// use casual_pay::config::ConfigLoader;
/// use casual_pay::models::RawShift;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/casual").unwrap();
/// let shift = RawShift {
///     date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
///     employer_id: "emp_cafe".to_string(),
///     employer: "Harbour Cafe".to_string(),
///     start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
/// };
///
/// let result = classify_shift(&shift, Decimal::from(4), loader.wage_rates("level_2"), None);
/// // 4 hours × $40.08 Saturday rate = $160.32
/// assert_eq!(result.class, ShiftClass::Saturday);
/// assert_eq!(result.pay, Decimal::new(16032, 2));
/// ```
pub fn classify_shift(
    shift: &RawShift,
    hours_worked: Decimal,
    rates: Option<&WageRates>,
    holiday: Option<&PublicHoliday>,
) -> RateClassification {
    let rate = |pick: fn(&WageRates) -> Decimal| rates.map(pick).unwrap_or(Decimal::ZERO);

    let flat = |class, label, payrate: Decimal| RateClassification {
        class,
        payrate: round_half_up_2(payrate),
        pay: round_half_up_2(hours_worked * payrate),
        evening_hours: None,
        holiday_name: holiday.map(|h| h.name.clone()),
        lines: vec![RateLine {
            label,
            hours: hours_worked,
            pay: hours_worked * payrate,
        }],
    };

    if holiday.is_some() {
        return flat(
            ShiftClass::PublicHoliday,
            RateLabel::PublicHoliday,
            rate(|r| r.public_holiday),
        );
    }

    match shift.day_of_week() {
        Weekday::Sun => return flat(ShiftClass::Sunday, RateLabel::Sunday, rate(|r| r.sunday)),
        Weekday::Sat => {
            return flat(ShiftClass::Saturday, RateLabel::Saturday, rate(|r| r.saturday));
        }
        _ => {}
    }

    let evening = evening_hours(shift);
    if evening <= Decimal::ZERO {
        return flat(ShiftClass::Ordinary, RateLabel::Regular, rate(|r| r.ordinary));
    }

    let ordinary = rate(|r| r.ordinary);
    let evening_rate = rate(|r| r.evening_mon_fri);
    let regular = hours_worked - evening;
    let regular_pay = regular * ordinary;
    let evening_pay = evening * evening_rate;

    RateClassification {
        class: ShiftClass::Evening,
        payrate: round_half_up_2(ordinary),
        pay: round_half_up_2(regular_pay + evening_pay),
        evening_hours: Some(round_half_up_2(evening)),
        holiday_name: None,
        lines: vec![
            RateLine {
                label: RateLabel::Regular,
                hours: regular,
                pay: regular_pay,
            },
            RateLine {
                label: RateLabel::Evening,
                hours: evening,
                pay: evening_pay,
            },
        ],
    }
}
