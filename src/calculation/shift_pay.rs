//! Shift pay calculation.
//!
//! This module turns a [`RawShift`] into a [`ComputedShift`]: break
//! deduction, paid hours, rate classification and pay date.

use std::collections::HashMap;

use chrono::Weekday;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::ReferenceData;
use crate::models::{ComputedShift, Employer, RawShift};

use super::breaks::resolve_breaks;
use super::pay_date::PaySchedule;
use super::pay_rate::{ShiftClass, classify_shift};
use super::rounding::round_half_up_2;

/// Calculates one shift for a known employer.
///
/// A wage level missing from the rate table is logged and paid at 0; the
/// shift is still classified and scheduled.
///
/// # Arguments
///
/// * `shift` - The shift as recorded
/// * `employer` - The employer the shift was worked for
/// * `data` - The reference data bundle
///
/// # Examples
///
/// ```no_run
/// use casual_pay::calculation::calculate_shift;
/// use casual_pay::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("config/casual").unwrap();
/// let profile = ConfigLoader::load_user("config/user.yaml").unwrap();
/// let shifts = ConfigLoader::load_shifts("config/shifts.yaml").unwrap();
///
/// let employer = profile.employer(&shifts[0].employer_id).unwrap();
/// let computed = calculate_shift(&shifts[0], employer, loader.data());
/// println!("{} paid on {}", computed.pay, computed.pay_date);
/// ```
pub fn calculate_shift(shift: &RawShift, employer: &Employer, data: &ReferenceData) -> ComputedShift {
    calculate_with_schedule(shift, employer, &PaySchedule::for_employer(employer), data)
}

fn calculate_with_schedule(
    shift: &RawShift,
    employer: &Employer,
    schedule: &PaySchedule,
    data: &ReferenceData,
) -> ComputedShift {
    let scheduled = shift.scheduled_minutes();
    let breaks = resolve_breaks(scheduled, data.breaks());
    let hours_worked = Decimal::from(scheduled - breaks.unpaid_minutes) / Decimal::from(60);

    let rates = data.wages().rates_for(&employer.level);
    if rates.is_none() {
        warn!(
            employer = %employer.id,
            level = %employer.level,
            date = %shift.date,
            "No wage rates for level, shift paid at 0"
        );
    }

    let holiday = data.holidays().holiday_for(shift.date, &employer.state);
    let classification = classify_shift(shift, hours_worked, rates, holiday);
    let period = schedule.period_for(shift.date);
    let weekday = shift.day_of_week();

    debug!(
        employer = %employer.id,
        date = %shift.date,
        class = ?classification.class,
        pay = %classification.pay,
        pay_date = %period.pay_date,
        "Computed shift"
    );

    ComputedShift {
        shift: shift.clone(),
        break_minutes: breaks.unpaid_minutes,
        hours_worked: round_half_up_2(hours_worked),
        payrate: classification.payrate,
        pay: classification.pay,
        pay_date: period.pay_date,
        period_start: period.period_start,
        period_end: period.period_end,
        is_public_holiday: classification.class == ShiftClass::PublicHoliday,
        holiday_name: classification.holiday_name,
        evening_hours: classification.evening_hours,
        is_saturday: weekday == Weekday::Sat,
        is_sunday: weekday == Weekday::Sun,
        rate_lines: classification.lines,
    }
}

/// Calculates every shift whose employer is known, in input order.
///
/// Shifts for an employer not in `employers` are skipped with a warning.
pub fn calculate_shifts(
    shifts: &[RawShift],
    employers: &[Employer],
    data: &ReferenceData,
) -> Vec<ComputedShift> {
    let schedules: HashMap<&str, (&Employer, PaySchedule)> = employers
        .iter()
        .map(|e| (e.id.as_str(), (e, PaySchedule::for_employer(e))))
        .collect();

    shifts
        .iter()
        .filter_map(|shift| match schedules.get(shift.employer_id.as_str()) {
            Some((employer, schedule)) => {
                Some(calculate_with_schedule(shift, employer, schedule, data))
            }
            None => {
                warn!(
                    employer = %shift.employer_id,
                    date = %shift.date,
                    "Skipping shift for unknown employer"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{PayCycle, RateLabel};
    use chrono::{NaiveDate, NaiveTime, Weekday};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn load_data() -> ReferenceData {
        ConfigLoader::load("config/casual")
            .expect("Failed to load config")
            .data()
            .clone()
    }

    fn cafe() -> Employer {
        Employer {
            id: "emp_cafe".to_string(),
            name: "Harbour Cafe".to_string(),
            level: "level_2".to_string(),
            state: "VIC".to_string(),
            paycycle: PayCycle::Weekly,
            payday: Weekday::Thu,
            pay_period_start: Weekday::Mon,
            pay_period_days: 7,
            next_pay_date: make_date("2026-01-22"),
            tax_free_threshold: true,
            sgc_percentage: dec("12"),
            has_tfn: true,
            foreign_resident: false,
            tax_offset: Decimal::ZERO,
            color: None,
        }
    }

    fn make_shift(employer_id: &str, date: &str, start: &str, end: &str) -> RawShift {
        RawShift {
            date: make_date(date),
            employer_id: employer_id.to_string(),
            employer: "Harbour Cafe".to_string(),
            start: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        }
    }

    /// SP-001: eight hour Monday shift loses a 30 minute meal break
    #[test]
    fn test_sp_001_ordinary_monday() {
        let data = load_data();
        let shift = make_shift("emp_cafe", "2026-01-12", "09:00", "17:00");
        let computed = calculate_shift(&shift, &cafe(), &data);

        // 7.5 × 32.06 = 240.45
        assert_eq!(computed.break_minutes, 30);
        assert_eq!(computed.hours_worked, dec("7.5"));
        assert_eq!(computed.payrate, dec("32.06"));
        assert_eq!(computed.pay, dec("240.45"));
        assert_eq!(computed.pay_date, make_date("2026-01-22"));
        assert_eq!(computed.period_start, make_date("2026-01-12"));
        assert_eq!(computed.period_end, make_date("2026-01-18"));
        assert!(!computed.is_public_holiday);
    }

    /// SP-002: overnight shift is eight scheduled hours, not negative
    #[test]
    fn test_sp_002_midnight_wrap() {
        let data = load_data();
        let shift = make_shift("emp_cafe", "2026-01-14", "22:00", "06:00");
        let computed = calculate_shift(&shift, &cafe(), &data);

        // 480 - 30 = 450 minutes; all 8 scheduled hours are after 18:00
        assert_eq!(computed.hours_worked, dec("7.5"));
        assert_eq!(computed.evening_hours, Some(dec("8")));
        // -0.5 × 32.06 + 8 × 38.48 = -16.03 + 307.84 = 291.81
        assert_eq!(computed.pay, dec("291.81"));
    }

    /// SP-003: public holiday flags and name
    #[test]
    fn test_sp_003_public_holiday() {
        let data = load_data();
        let shift = make_shift("emp_cafe", "2026-01-26", "09:00", "15:00");
        let computed = calculate_shift(&shift, &cafe(), &data);

        // 6h scheduled, 30 min meal: 5.5 × 72.14 = 396.77
        assert!(computed.is_public_holiday);
        assert_eq!(computed.holiday_name.as_deref(), Some("Australia Day"));
        assert_eq!(computed.pay, dec("396.77"));
        assert_eq!(computed.rate_lines[0].label, RateLabel::PublicHoliday);
    }

    /// SP-004: state holiday only applies in that state
    #[test]
    fn test_sp_004_state_holiday_respects_state() {
        let data = load_data();
        let shift = make_shift("emp_cafe", "2026-03-09", "09:00", "13:00");

        let vic = calculate_shift(&shift, &cafe(), &data);
        assert!(vic.is_public_holiday);

        let mut nsw_employer = cafe();
        nsw_employer.state = "NSW".to_string();
        let nsw = calculate_shift(&shift, &nsw_employer, &data);
        assert!(!nsw.is_public_holiday);
        assert_eq!(nsw.pay, dec("128.24"));
    }

    /// SP-005: weekend flags
    #[test]
    fn test_sp_005_weekend_flags() {
        let data = load_data();
        let saturday = calculate_shift(
            &make_shift("emp_cafe", "2026-01-17", "10:00", "14:00"),
            &cafe(),
            &data,
        );
        assert!(saturday.is_saturday);
        assert!(!saturday.is_sunday);
        assert_eq!(saturday.pay, dec("160.32"));

        let sunday = calculate_shift(
            &make_shift("emp_cafe", "2026-01-18", "10:00", "14:00"),
            &cafe(),
            &data,
        );
        assert!(sunday.is_sunday);
        assert_eq!(sunday.pay, dec("192.36"));
    }

    /// SP-008: a holiday on a Sunday is still flagged as a Sunday
    #[test]
    fn test_sp_008_sunday_public_holiday_keeps_weekday_flag() {
        let data = load_data();
        let computed = calculate_shift(
            &make_shift("emp_cafe", "2026-04-05", "10:00", "14:00"),
            &cafe(),
            &data,
        );

        assert!(computed.is_public_holiday);
        assert!(computed.is_sunday);
        assert!(!computed.is_saturday);
        assert_eq!(computed.holiday_name.as_deref(), Some("Easter Sunday"));
        // 4 × 72.14, no meal break under five hours
        assert_eq!(computed.pay, dec("288.56"));
        assert_eq!(computed.rate_lines[0].label, RateLabel::PublicHoliday);
    }

    /// SP-006: unknown wage level pays 0
    #[test]
    fn test_sp_006_missing_level_pays_zero() {
        let data = load_data();
        let mut employer = cafe();
        employer.level = "level_9".to_string();
        let computed = calculate_shift(
            &make_shift("emp_cafe", "2026-01-12", "09:00", "17:00"),
            &employer,
            &data,
        );
        assert_eq!(computed.pay, Decimal::ZERO);
        assert_eq!(computed.hours_worked, dec("7.5"));
    }

    /// SP-007: shifts for unknown employers are skipped
    #[test]
    fn test_sp_007_unknown_employer_skipped() {
        let data = load_data();
        let shifts = vec![
            make_shift("emp_cafe", "2026-01-12", "09:00", "17:00"),
            make_shift("emp_gone", "2026-01-13", "09:00", "17:00"),
            make_shift("emp_cafe", "2026-01-14", "09:00", "12:00"),
        ];
        let computed = calculate_shifts(&shifts, &[cafe()], &data);

        assert_eq!(computed.len(), 2);
        assert_eq!(computed[0].date(), make_date("2026-01-12"));
        assert_eq!(computed[1].date(), make_date("2026-01-14"));
        assert_eq!(computed[1].break_minutes, 0);
        assert_eq!(computed[1].pay, dec("96.18"));
    }

    #[test]
    fn test_batch_matches_single_calculation() {
        let data = load_data();
        let shift = make_shift("emp_cafe", "2026-01-13", "16:00", "21:00");
        let single = calculate_shift(&shift, &cafe(), &data);
        let batch = calculate_shifts(std::slice::from_ref(&shift), &[cafe()], &data);
        assert_eq!(batch, vec![single]);
    }

    #[test]
    fn test_evening_split_after_break() {
        let data = load_data();
        let computed = calculate_shift(
            &make_shift("emp_cafe", "2026-01-13", "16:00", "21:00"),
            &cafe(),
            &data,
        );

        // 5h scheduled, 30 min meal: 4.5 worked, 3 after 18:00
        // 1.5 × 32.06 + 3 × 38.48 = 48.09 + 115.44 = 163.53
        assert_eq!(computed.hours_worked, dec("4.5"));
        assert_eq!(computed.evening_hours, Some(dec("3")));
        assert_eq!(computed.payrate, dec("32.06"));
        assert_eq!(computed.pay, dec("163.53"));
    }
}
