//! Employer and user profile models.
//!
//! An [`Employer`] carries everything the pipeline needs to know about who
//! pays a shift: the wage level, the state for the holiday calendar, the
//! pay-cycle settings and the tax settings.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_formats::weekday_name;
use crate::error::{EngineError, EngineResult};

/// How often an employer pays.
///
/// Parsing any other value fails with [`EngineError::UnsupportedPayCycle`].
///
/// # Example
///
/// ```
/// use casual_pay::models::PayCycle;
///
/// let cycle: PayCycle = "fortnightly".parse().unwrap();
/// assert_eq!(cycle, PayCycle::Fortnightly);
/// assert!("quarterly".parse::<PayCycle>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PayCycle {
    /// Paid every week.
    Weekly,
    /// Paid every second week.
    Fortnightly,
    /// Paid once a month.
    Monthly,
}

impl PayCycle {
    /// Returns the lowercase name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayCycle::Weekly => "weekly",
            PayCycle::Fortnightly => "fortnightly",
            PayCycle::Monthly => "monthly",
        }
    }

    /// Days between consecutive pay dates.
    ///
    /// Monthly employers step by their own pay-period length.
    pub fn cycle_days(&self, pay_period_days: u32) -> i64 {
        match self {
            PayCycle::Weekly => 7,
            PayCycle::Fortnightly => 14,
            PayCycle::Monthly => i64::from(pay_period_days),
        }
    }
}

impl std::fmt::Display for PayCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PayCycle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PayCycle::Weekly),
            "fortnightly" => Ok(PayCycle::Fortnightly),
            "monthly" => Ok(PayCycle::Monthly),
            _ => Err(EngineError::UnsupportedPayCycle {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PayCycle {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn default_true() -> bool {
    true
}

/// An employer the user works casual shifts for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employer {
    /// Unique identifier, referenced by [`RawShift::employer_id`](super::RawShift).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Wage level key into the wage rate table (e.g. "level_2").
    pub level: String,
    /// State or territory whose public holidays apply (e.g. "VIC").
    pub state: String,
    /// How often the employer pays.
    pub paycycle: PayCycle,
    /// Weekday wages are paid on.
    #[serde(with = "weekday_name")]
    pub payday: Weekday,
    /// Weekday each pay period starts on.
    #[serde(with = "weekday_name")]
    pub pay_period_start: Weekday,
    /// Length of a pay period in days.
    pub pay_period_days: u32,
    /// A known, real upcoming pay date. Must fall on `payday`.
    pub next_pay_date: NaiveDate,
    /// Whether the tax-free threshold is claimed with this employer.
    #[serde(default = "default_true")]
    pub tax_free_threshold: bool,
    /// Superannuation guarantee rate, as a percentage of gross.
    #[serde(default, alias = "superRate")]
    pub sgc_percentage: Decimal,
    /// Whether a tax file number has been given to this employer.
    #[serde(default = "default_true")]
    pub has_tfn: bool,
    /// Whether the user is a foreign resident for tax purposes.
    #[serde(default)]
    pub foreign_resident: bool,
    /// Annual tax offset claimed through withholding.
    #[serde(default)]
    pub tax_offset: Decimal,
    /// Presentation colour; carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Employer {
    /// Checks the employer's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployer`] when `nextPayDate` does not fall
    /// on `payday` or when `payPeriodDays` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use casual_pay::models::{Employer, PayCycle};
    /// use chrono::{NaiveDate, Weekday};
    /// use rust_decimal::Decimal;
    ///
    /// let mut employer = Employer {
    ///     id: "emp_cafe".to_string(),
    ///     name: "Harbour Cafe".to_string(),
    ///     level: "level_2".to_string(),
    ///     state: "VIC".to_string(),
    ///     paycycle: PayCycle::Weekly,
    ///     payday: Weekday::Thu,
    ///     pay_period_start: Weekday::Mon,
    ///     pay_period_days: 7,
    ///     next_pay_date: NaiveDate::from_ymd_opt(2026, 1, 22).unwrap(),
    ///     tax_free_threshold: true,
    ///     sgc_percentage: Decimal::new(12, 0),
    ///     has_tfn: true,
    ///     foreign_resident: false,
    ///     tax_offset: Decimal::ZERO,
    ///     color: None,
    /// };
    /// assert!(employer.validate().is_ok());
    ///
    /// employer.next_pay_date = NaiveDate::from_ymd_opt(2026, 1, 21).unwrap();
    /// assert!(employer.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.pay_period_days == 0 {
            return Err(EngineError::InvalidEmployer {
                employer_id: self.id.clone(),
                message: "payPeriodDays must be at least 1".to_string(),
            });
        }

        if self.next_pay_date.weekday() != self.payday {
            return Err(EngineError::InvalidEmployer {
                employer_id: self.id.clone(),
                message: format!(
                    "nextPayDate {} is a {}, payday is {}",
                    self.next_pay_date,
                    weekday_name::name(self.next_pay_date.weekday()),
                    weekday_name::name(self.payday)
                ),
            });
        }

        Ok(())
    }

    /// Returns the tax settings this employer withholds under.
    pub fn tax_profile(&self) -> TaxProfile {
        TaxProfile {
            tax_free_threshold: self.tax_free_threshold,
            has_tfn: self.has_tfn,
            foreign_resident: self.foreign_resident,
            tax_offset: self.tax_offset,
        }
    }
}

/// The tax settings withholding is calculated under.
///
/// Taken from an [`Employer`] with [`Employer::tax_profile`], or built
/// directly for a one-off calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxProfile {
    /// Whether the tax-free threshold is claimed.
    pub tax_free_threshold: bool,
    /// Whether a tax file number has been provided.
    pub has_tfn: bool,
    /// Whether the payee is a foreign resident.
    pub foreign_resident: bool,
    /// Annual tax offset claimed through withholding.
    pub tax_offset: Decimal,
}

impl Default for TaxProfile {
    fn default() -> Self {
        Self {
            tax_free_threshold: true,
            has_tfn: true,
            foreign_resident: false,
            tax_offset: Decimal::ZERO,
        }
    }
}

/// The user whose shifts are tracked, with the employers they work for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Login or handle of the user.
    pub user: String,
    /// Display name.
    pub name: String,
    /// Employers the user works for.
    #[serde(default)]
    pub employers: Vec<Employer>,
}

impl UserProfile {
    /// Finds an employer by ID.
    pub fn employer(&self, id: &str) -> Option<&Employer> {
        self.employers.iter().find(|e| e.id == id)
    }
}
