//! Shift models.
//!
//! A [`RawShift`] is what the user records: a date, an employer and two
//! wall-clock times. A [`ComputedShift`] is the same record after the pipeline
//! has worked out breaks, hours, pay and the pay date it belongs to.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_formats::clock;

/// Minutes in a day, added to the end time of a shift that crosses midnight.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A shift as recorded by the user.
///
/// `end` may be earlier than `start`; the shift then finishes the next day.
///
/// # Example
///
/// ```
/// use casual_pay::models::RawShift;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let shift = RawShift {
///     date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
///     employer_id: "emp_bar".to_string(),
///     employer: "Corner Bar".to_string(),
///     start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
/// };
/// assert_eq!(shift.scheduled_minutes(), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawShift {
    /// The calendar date the shift starts on.
    pub date: NaiveDate,
    /// Identifier of the employer the shift was worked for.
    pub employer_id: String,
    /// Display name of the employer.
    pub employer: String,
    /// Wall-clock start time.
    #[serde(with = "clock")]
    pub start: NaiveTime,
    /// Wall-clock end time.
    #[serde(with = "clock")]
    pub end: NaiveTime,
}

impl RawShift {
    /// Returns the start and end of the shift in minutes from midnight on
    /// the shift date, with 24h added to the end when the shift wraps.
    pub fn minute_span(&self) -> (i64, i64) {
        let start = minutes_of_day(self.start);
        let mut end = minutes_of_day(self.end);
        if end < start {
            end += MINUTES_PER_DAY;
        }
        (start, end)
    }

    /// Scheduled duration in minutes, before any break is taken out.
    pub fn scheduled_minutes(&self) -> i64 {
        let (start, end) = self.minute_span();
        end - start
    }

    /// Returns the day of the week the shift starts on.
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }
}

fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// The wage category a block of hours is paid at.
///
/// A weekday shift that runs past 18:00 is paid partly as
/// [`RateLabel::Regular`] and partly as [`RateLabel::Evening`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RateLabel {
    /// Ordinary weekday daytime hours.
    Regular,
    /// Monday to Friday hours after 18:00.
    Evening,
    /// Saturday hours.
    Saturday,
    /// Sunday hours.
    Sunday,
    /// Hours on a national or state public holiday.
    #[serde(rename = "Public Holiday")]
    PublicHoliday,
}

impl std::fmt::Display for RateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateLabel::Regular => write!(f, "Regular"),
            RateLabel::Evening => write!(f, "Evening"),
            RateLabel::Saturday => write!(f, "Saturday"),
            RateLabel::Sunday => write!(f, "Sunday"),
            RateLabel::PublicHoliday => write!(f, "Public Holiday"),
        }
    }
}

/// Hours and pay for one rate label within a shift, kept unrounded so that
/// pay-period sub-totals do not compound rounding error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLine {
    /// The rate the hours were paid at.
    pub label: RateLabel,
    /// Hours paid at this rate.
    pub hours: Decimal,
    /// Pay for those hours.
    pub pay: Decimal,
}

/// A shift after break, rate, pay and pay-date calculation.
///
/// Built once per [`RawShift`] and never changed afterwards. Display fields
/// (`hours_worked`, `payrate`, `pay`, `evening_hours`) are rounded to cents;
/// `rate_lines` keeps the exact figures the aggregator sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedShift {
    /// The shift as recorded.
    #[serde(flatten)]
    pub shift: RawShift,
    /// Unpaid break minutes taken out of the scheduled time.
    #[serde(rename = "break")]
    pub break_minutes: i64,
    /// Paid hours, rounded to 2 decimals.
    pub hours_worked: Decimal,
    /// The headline rate for display. For a blended evening shift this is
    /// the ordinary rate, not the blend.
    pub payrate: Decimal,
    /// Gross pay for the shift, rounded to 2 decimals.
    pub pay: Decimal,
    /// The date the shift is paid on.
    pub pay_date: NaiveDate,
    /// First day of the pay period the shift falls in.
    pub period_start: NaiveDate,
    /// Last day (inclusive) of the pay period the shift falls in.
    pub period_end: NaiveDate,
    /// Whether the shift date is a public holiday for the employer's state.
    pub is_public_holiday: bool,
    /// Name of the public holiday, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    /// Hours after 18:00 on an ordinary weekday shift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_hours: Option<Decimal>,
    /// Set when the shift falls on a Saturday.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_saturday: bool,
    /// Set when the shift falls on a Sunday.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_sunday: bool,
    /// Exact hours and pay by rate label.
    #[serde(default)]
    pub rate_lines: Vec<RateLine>,
}

impl ComputedShift {
    /// Returns the employer this shift was worked for.
    pub fn employer_id(&self) -> &str {
        &self.shift.employer_id
    }

    /// Returns the date the shift was worked.
    pub fn date(&self) -> NaiveDate {
        self.shift.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_shift(date: &str, start: &str, end: &str) -> RawShift {
        RawShift {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            employer_id: "emp_cafe".to_string(),
            employer: "Harbour Cafe".to_string(),
            start: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        }
    }

    /// SH-001: day shift duration
    #[test]
    fn test_sh_001_day_shift_scheduled_minutes() {
        let shift = make_shift("2026-01-12", "09:00", "17:00");
        assert_eq!(shift.minute_span(), (540, 1020));
        assert_eq!(shift.scheduled_minutes(), 480);
    }

    /// SH-002: end before start wraps past midnight
    #[test]
    fn test_sh_002_midnight_wrap_adds_a_day() {
        let shift = make_shift("2026-01-12", "22:00", "06:00");
        assert_eq!(shift.minute_span(), (1320, 1800));
        assert_eq!(shift.scheduled_minutes(), 480);
    }

    /// SH-003: equal start and end is a zero-length shift
    #[test]
    fn test_sh_003_equal_times_are_zero_minutes() {
        let shift = make_shift("2026-01-12", "09:00", "09:00");
        assert_eq!(shift.scheduled_minutes(), 0);
    }

    #[test]
    fn test_shift_ending_at_midnight() {
        let shift = make_shift("2026-01-12", "18:00", "00:00");
        assert_eq!(shift.scheduled_minutes(), 360);
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(
            make_shift("2026-01-17", "09:00", "17:00").day_of_week(),
            Weekday::Sat
        );
        assert_eq!(
            make_shift("2026-01-18", "09:00", "17:00").day_of_week(),
            Weekday::Sun
        );
    }

    #[test]
    fn test_raw_shift_deserialization() {
        let json = r#"{
            "date": "2026-01-15",
            "employerId": "emp_cafe",
            "employer": "Harbour Cafe",
            "start": "16:30",
            "end": "21:00"
        }"#;

        let shift: RawShift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.employer_id, "emp_cafe");
        assert_eq!(shift.start, NaiveTime::from_hms_opt(16, 30, 0).unwrap());
        assert_eq!(shift.scheduled_minutes(), 270);
    }

    #[test]
    fn test_rate_label_serializes_display_names() {
        assert_eq!(
            serde_json::to_string(&RateLabel::PublicHoliday).unwrap(),
            "\"Public Holiday\""
        );
        assert_eq!(
            serde_json::to_string(&RateLabel::Regular).unwrap(),
            "\"Regular\""
        );
        assert_eq!(RateLabel::PublicHoliday.to_string(), "Public Holiday");
    }

    #[test]
    fn test_computed_shift_flattens_raw_fields() {
        let computed = ComputedShift {
            shift: make_shift("2026-01-17", "09:00", "13:00"),
            break_minutes: 0,
            hours_worked: Decimal::new(4, 0),
            payrate: Decimal::new(3848, 2),
            pay: Decimal::new(15392, 2),
            pay_date: NaiveDate::from_ymd_opt(2026, 1, 22).unwrap(),
            period_start: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
            is_public_holiday: false,
            holiday_name: None,
            evening_hours: None,
            is_saturday: true,
            is_sunday: false,
            rate_lines: vec![],
        };

        let json = serde_json::to_value(&computed).unwrap();
        assert_eq!(json["employerId"], "emp_cafe");
        assert_eq!(json["start"], "09:00");
        assert_eq!(json["break"], 0);
        assert_eq!(json["payDate"], "2026-01-22");
        assert_eq!(json["isSaturday"], true);
        assert!(json.get("isSunday").is_none());
        assert!(json.get("holidayName").is_none());
    }
}
