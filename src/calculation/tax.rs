//! PAYG withholding.
//!
//! Withholding follows the weekly `a × earnings − b` bracket schedule.
//! Fortnightly and monthly amounts are converted to a weekly figure, taxed,
//! and converted back. All tax figures round down to the cent.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::EngineResult;
use crate::models::{Employer, PayCycle, PayPeriod, TaxProfile};

use super::rounding::{floor_to_cent, round_half_up_2};

/// One row of a withholding schedule. Coefficients are in ten-thousandths.
struct Bracket {
    upper_limit: Option<i64>,
    a: i64,
    b: i64,
}

const COEFFICIENT_SCALE: u32 = 4;

const fn bracket(upper_limit: i64, a: i64, b: i64) -> Bracket {
    Bracket {
        upper_limit: Some(upper_limit),
        a,
        b,
    }
}

/// Weekly schedule when the tax-free threshold is claimed.
const WITH_THRESHOLD: [Bracket; 9] = [
    bracket(361, 0, 0),
    bracket(500, 1600, 578_462),
    bracket(625, 2600, 1_078_462),
    bracket(721, 1800, 578_462),
    bracket(865, 1890, 643_365),
    bracket(1282, 3227, 1_800_385),
    bracket(2596, 3200, 1_765_769),
    bracket(3653, 3900, 3_583_077),
    Bracket {
        upper_limit: None,
        a: 4700,
        b: 6_506_154,
    },
];

/// Weekly schedule when the tax-free threshold is not claimed.
const NO_THRESHOLD: [Bracket; 7] = [
    bracket(150, 1600, 1600),
    bracket(371, 2117, 77_550),
    bracket(515, 1890, -6702),
    bracket(932, 3227, 682_367),
    bracket(2246, 3200, 657_202),
    bracket(3303, 3900, 2_229_510),
    Bracket {
        upper_limit: None,
        a: 4700,
        b: 4_872_587,
    },
];

/// Flat rate withheld when no tax file number has been given, in percent.
pub const NO_TFN_RATE: u32 = 47;

/// Flat rate withheld from a foreign resident with no tax file number, in percent.
pub const NO_TFN_FOREIGN_RATE: u32 = 45;

/// Fraction of an annual tax offset withheld against each week, per mille.
const OFFSET_WEEKLY_FACTOR: i64 = 19;

/// Weekly earnings as the schedule sees them: whole dollars plus 99 cents.
///
/// # Example
///
/// ```
/// use casual_pay::calculation::weekly_earnings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(weekly_earnings(Decimal::from(1000)), Decimal::from_str("1000.99").unwrap());
/// assert_eq!(weekly_earnings(Decimal::from_str("999.999").unwrap()), Decimal::from_str("999.99").unwrap());
/// ```
pub fn weekly_earnings(weekly_gross: Decimal) -> Decimal {
    weekly_gross.floor() + Decimal::new(99, 2)
}

/// Calculates withholding on one week's gross pay.
///
/// # Arguments
///
/// * `weekly_gross` - Gross pay for the week
/// * `profile` - Threshold, TFN and offset settings
///
/// # Returns
///
/// Withholding rounded down to the cent, never negative.
///
/// # Examples
///
/// ```
/// use casual_pay::calculation::calculate_weekly_tax;
/// use casual_pay::models::TaxProfile;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // 0.3227 × 1000.99 − 180.0385 = 142.980973
/// let tax = calculate_weekly_tax(Decimal::from(1000), &TaxProfile::default());
/// assert_eq!(tax, Decimal::from_str("142.98").unwrap());
/// ```
pub fn calculate_weekly_tax(weekly_gross: Decimal, profile: &TaxProfile) -> Decimal {
    if weekly_gross <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let earnings = weekly_earnings(weekly_gross);

    if !profile.has_tfn {
        let rate = if profile.foreign_resident {
            NO_TFN_FOREIGN_RATE
        } else {
            NO_TFN_RATE
        };
        return floor_to_cent(earnings * Decimal::from(rate) / Decimal::ONE_HUNDRED);
    }

    let schedule: &[Bracket] = if profile.tax_free_threshold {
        &WITH_THRESHOLD
    } else {
        &NO_THRESHOLD
    };

    let Some(bracket) = schedule
        .iter()
        .find(|b| b.upper_limit.is_none_or(|limit| earnings < Decimal::from(limit)))
    else {
        return Decimal::ZERO;
    };

    let mut tax = Decimal::new(bracket.a, COEFFICIENT_SCALE) * earnings
        - Decimal::new(bracket.b, COEFFICIENT_SCALE);

    if profile.tax_free_threshold && profile.tax_offset > Decimal::ZERO {
        tax -= profile.tax_offset * Decimal::new(OFFSET_WEEKLY_FACTOR, 3);
    }

    floor_to_cent(tax.max(Decimal::ZERO))
}

/// Calculates withholding on the gross pay for one pay cycle.
///
/// Zero gross short-circuits to zero without consulting the schedule.
///
/// # Examples
///
/// ```
/// use casual_pay::calculation::calculate_tax;
/// use casual_pay::models::{PayCycle, TaxProfile};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profile = TaxProfile::default();
/// let tax = calculate_tax(Decimal::from(2000), PayCycle::Fortnightly, &profile);
/// assert_eq!(tax, Decimal::from_str("285.96").unwrap());
/// ```
pub fn calculate_tax(gross: Decimal, cycle: PayCycle, profile: &TaxProfile) -> Decimal {
    if gross <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let weekly_tax = calculate_weekly_tax(weekly_equivalent(gross, cycle), profile);
    match cycle {
        PayCycle::Weekly => weekly_tax,
        PayCycle::Fortnightly => weekly_tax * Decimal::TWO,
        PayCycle::Monthly => floor_to_cent(weekly_tax * Decimal::from(52) / Decimal::from(12)),
    }
}

/// Converts a pay-cycle amount to its weekly equivalent, unrounded.
///
/// Fortnightly amounts are halved; monthly amounts are scaled by 12/52.
pub fn weekly_equivalent(gross: Decimal, cycle: PayCycle) -> Decimal {
    match cycle {
        PayCycle::Weekly => gross,
        PayCycle::Fortnightly => gross / Decimal::TWO,
        PayCycle::Monthly => gross * Decimal::from(12) / Decimal::from(52),
    }
}

/// Calculates withholding for a pay cycle given by name.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedPayCycle`](crate::error::EngineError)
/// when `cycle` is not weekly, fortnightly or monthly.
pub fn calculate_tax_for_cycle(
    gross: Decimal,
    cycle: &str,
    profile: &TaxProfile,
) -> EngineResult<Decimal> {
    let cycle: PayCycle = cycle.parse()?;
    Ok(calculate_tax(gross, cycle, profile))
}

/// Employer superannuation on a gross amount, rounded to cents.
pub fn calculate_superannuation(gross: Decimal, sgc_percentage: Decimal) -> Decimal {
    round_half_up_2(gross * sgc_percentage / Decimal::ONE_HUNDRED)
}

/// Fills in tax, net pay and superannuation on every period.
///
/// A period whose employer is not in `employers` is logged and left untaxed:
/// tax 0, net pay equal to gross.
pub fn apply_taxes(periods: Vec<PayPeriod>, employers: &[Employer]) -> Vec<PayPeriod> {
    periods
        .into_iter()
        .map(|mut period| {
            match employers.iter().find(|e| e.id == period.employer_id) {
                Some(employer) => {
                    let tax = calculate_tax(period.amount, employer.paycycle, &employer.tax_profile());
                    period.tax = Some(tax);
                    period.net_pay = Some(period.amount - tax);
                    period.superannuation =
                        Some(calculate_superannuation(period.amount, employer.sgc_percentage));
                }
                None => {
                    warn!(
                        employer = %period.employer_id,
                        pay_date = %period.date,
                        "No employer for pay period, withholding skipped"
                    );
                    period.tax = Some(Decimal::ZERO);
                    period.net_pay = Some(period.amount);
                    period.superannuation = Some(Decimal::ZERO);
                }
            }
            period
        })
        .collect()
}
