//! Configuration types for the pay pipeline.
//!
//! This module contains the strongly-typed reference data deserialized from
//! the YAML files of a configuration bundle: award metadata, the break
//! schedule, casual wage rates and the public holiday calendar.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Metadata about the award the rates come from.
#[derive(Debug, Clone, Deserialize)]
pub struct AwardMetadata {
    /// The human-readable name of the award.
    pub name: String,
    /// The Fair Work award code (e.g., "MA000004").
    pub code: String,
    /// The date the rates in this bundle take effect.
    pub effective_date: NaiveDate,
}

/// Paid rest break settings. Informational only; rest breaks are never
/// taken out of worked time.
#[derive(Debug, Clone, Deserialize)]
pub struct RestBreakPolicy {
    /// Length of a rest break in minutes.
    pub duration: u32,
    /// Whether the rest break is paid.
    pub is_paid: bool,
}

/// Meal break settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MealBreakPolicy {
    /// Minimum length of a meal break in minutes. This is what gets deducted.
    pub min_duration: u32,
    /// Maximum length of a meal break in minutes.
    pub max_duration: u32,
    /// Whether meal breaks are paid. Paid meal breaks are not deducted.
    pub is_paid: bool,
}

/// One tier of the break schedule.
///
/// Applies to a scheduled length within `hours_range`, both bounds inclusive;
/// an upper bound of `None` is unbounded.
#[derive(Debug, Clone, Deserialize)]
pub struct BreakRule {
    /// Human-readable description of the tier (e.g. "7 to 10 hours").
    #[serde(default)]
    pub hours_worked: Option<String>,
    /// Lower and optional upper bound of scheduled hours.
    pub hours_range: (Decimal, Option<Decimal>),
    /// Number of paid rest breaks.
    #[serde(default)]
    pub rest_breaks: u32,
    /// Number of meal breaks.
    pub meal_breaks: u32,
}

impl BreakRule {
    /// Returns true when `hours` falls inside this tier.
    pub fn contains(&self, hours: Decimal) -> bool {
        let (min, max) = self.hours_range;
        hours >= min && max.is_none_or(|max| hours <= max)
    }
}

/// The break schedule from breaks.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct BreakSchedule {
    /// Rest break settings.
    pub rest_break: RestBreakPolicy,
    /// Meal break settings.
    pub meal_break: MealBreakPolicy,
    /// Tiers, ordered by lower bound.
    pub schedule: Vec<BreakRule>,
}

impl BreakSchedule {
    /// Checks that the tiers are non-empty, ordered, and that only the last
    /// tier is unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBreakSchedule`] describing the first problem.
    pub fn validate(&self) -> EngineResult<()> {
        if self.schedule.is_empty() {
            return Err(EngineError::InvalidBreakSchedule {
                message: "schedule is empty".to_string(),
            });
        }

        let last = self.schedule.len() - 1;
        for (index, rule) in self.schedule.iter().enumerate() {
            let (min, max) = rule.hours_range;
            if min < Decimal::ZERO {
                return Err(EngineError::InvalidBreakSchedule {
                    message: format!("tier {} starts below zero hours", index),
                });
            }
            match max {
                Some(max) if max < min => {
                    return Err(EngineError::InvalidBreakSchedule {
                        message: format!("tier {} has upper bound {} below {}", index, max, min),
                    });
                }
                None if index != last => {
                    return Err(EngineError::InvalidBreakSchedule {
                        message: format!("tier {} is unbounded but is not the last tier", index),
                    });
                }
                _ => {}
            }
            if let Some(next) = self.schedule.get(index + 1) {
                if next.hours_range.0 < min {
                    return Err(EngineError::InvalidBreakSchedule {
                        message: format!("tier {} is out of order", index + 1),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Hourly rates for one casual wage level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WageRates {
    /// Ordinary weekday daytime rate.
    pub ordinary: Decimal,
    /// Monday to Friday rate after 18:00.
    pub evening_mon_fri: Decimal,
    /// Saturday rate.
    pub saturday: Decimal,
    /// Sunday rate.
    pub sunday: Decimal,
    /// Public holiday rate.
    pub public_holiday: Decimal,
}

/// A wage level entry in rates.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct WageLevel {
    /// The base hourly rate for the level.
    pub hourly_rate: Decimal,
    /// The casual rates by category.
    pub rates: WageRates,
}

/// Casual wage rates by level, from rates.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct WageRateTable {
    /// Map of wage level key to rates.
    pub casual: HashMap<String, WageLevel>,
}

impl WageRateTable {
    /// Returns the rates for a wage level, if the table has one.
    pub fn rates_for(&self, level: &str) -> Option<&WageRates> {
        self.casual.get(level).map(|l| &l.rates)
    }
}

/// A public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Australia Day").
    pub name: String,
}

/// Public holidays by year, then by region ("national" or a state code).
///
/// # Example
///
/// ```
/// use casual_pay::config::PublicHolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar: PublicHolidayCalendar = serde_yaml::from_str(r#"
/// 2026:
///   national:
///     - { date: 2026-01-26, name: Australia Day }
///   VIC:
///     - { date: 2026-03-09, name: Labour Day }
/// "#).unwrap();
///
/// let labour_day = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// assert!(calendar.holiday_for(labour_day, "VIC").is_some());
/// assert!(calendar.holiday_for(labour_day, "NSW").is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PublicHolidayCalendar {
    years: BTreeMap<i32, HashMap<String, Vec<PublicHoliday>>>,
}

impl PublicHolidayCalendar {
    /// Region key for holidays observed in every state.
    pub const NATIONAL: &'static str = "national";

    /// Finds the holiday on `date` for an employer in `state`.
    ///
    /// National holidays are checked before state holidays.
    pub fn holiday_for(&self, date: NaiveDate, state: &str) -> Option<&PublicHoliday> {
        let regions = self.years.get(&date.year())?;
        [Self::NATIONAL, state]
            .into_iter()
            .filter_map(|region| regions.get(region))
            .flat_map(|holidays| holidays.iter())
            .find(|h| h.date == date)
    }

    /// Returns the years the calendar covers.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }
}

/// The complete reference data bundle loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    award: AwardMetadata,
    breaks: BreakSchedule,
    wages: WageRateTable,
    holidays: PublicHolidayCalendar,
}

impl ReferenceData {
    /// Creates a bundle from its component parts.
    pub fn new(
        award: AwardMetadata,
        breaks: BreakSchedule,
        wages: WageRateTable,
        holidays: PublicHolidayCalendar,
    ) -> Self {
        Self {
            award,
            breaks,
            wages,
            holidays,
        }
    }

    /// Returns the award metadata.
    pub fn award(&self) -> &AwardMetadata {
        &self.award
    }

    /// Returns the break schedule.
    pub fn breaks(&self) -> &BreakSchedule {
        &self.breaks
    }

    /// Returns the wage rate table.
    pub fn wages(&self) -> &WageRateTable {
        &self.wages
    }

    /// Returns the public holiday calendar.
    pub fn holidays(&self) -> &PublicHolidayCalendar {
        &self.holidays
    }
}
