//! End-to-end pay pipeline.
//!
//! Raw shifts go in; computed shifts and pay periods come out, with empty
//! periods filling the requested window and withholding applied.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ReferenceData;
use crate::models::{ComputedShift, Employer, PayPeriod, RawShift};

use super::aggregation::{DateWindow, aggregate_pay_periods, fill_pay_period_gaps};
use super::shift_pay::calculate_shifts;
use super::tax::apply_taxes;

/// Options for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Window to fill with empty pay periods. `None` leaves gaps unfilled.
    pub window: Option<DateWindow>,
    /// Whether to run the tax pass.
    pub apply_tax: bool,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            window: None,
            apply_tax: true,
        }
    }
}

/// The output of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Every shift with a known employer, in input order.
    pub shifts: Vec<ComputedShift>,
    /// Pay periods sorted by pay date.
    pub pay_dates: Vec<PayPeriod>,
}

impl Timeline {
    /// Pay periods for one employer, in date order.
    pub fn periods_for<'a>(&'a self, employer_id: &'a str) -> impl Iterator<Item = &'a PayPeriod> {
        self.pay_dates
            .iter()
            .filter(move |p| p.employer_id == employer_id)
    }
}

/// Runs the whole pipeline.
///
/// # Arguments
///
/// * `shifts` - Shifts as recorded
/// * `employers` - The user's employers
/// * `data` - The reference data bundle
/// * `options` - Gap-filling window and whether to apply tax
///
/// # Examples
///
/// ```no_run
/// use casual_pay::calculation::{DateWindow, TimelineOptions, build_timeline};
/// use casual_pay::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("config/casual").unwrap();
/// let profile = ConfigLoader::load_user("config/user.yaml").unwrap();
/// let shifts = ConfigLoader::load_shifts("config/shifts.yaml").unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
/// let options = TimelineOptions {
///     window: Some(DateWindow::around(today, 3, 1)),
///     apply_tax: true,
/// };
/// let timeline = build_timeline(&shifts, &profile.employers, loader.data(), &options);
/// println!("{}", serde_json::to_string_pretty(&timeline).unwrap());
/// ```
pub fn build_timeline(
    shifts: &[RawShift],
    employers: &[Employer],
    data: &ReferenceData,
    options: &TimelineOptions,
) -> Timeline {
    let computed = calculate_shifts(shifts, employers, data);
    let mut periods = aggregate_pay_periods(&computed);
    let real_periods = periods.len();

    if let Some(window) = options.window {
        periods = fill_pay_period_gaps(periods, employers, window);
    }
    if options.apply_tax {
        periods = apply_taxes(periods, employers);
    }

    info!(
        shifts = shifts.len(),
        computed = computed.len(),
        periods = periods.len(),
        synthesized = periods.len() - real_periods,
        "Built pay timeline"
    );

    Timeline {
        shifts: computed,
        pay_dates: periods,
    }
}
