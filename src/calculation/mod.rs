//! Calculation logic for the casual pay engine.
//!
//! This module contains one component per pipeline stage: break resolution,
//! pay rate classification, pay date scheduling, shift pay, pay period
//! aggregation with gap filling, and PAYG withholding. [`build_timeline`]
//! runs them end to end; [`monthly_summaries`] rolls the result up by month.

mod aggregation;
mod breaks;
mod pay_date;
mod pay_rate;
mod rounding;
mod shift_pay;
mod summary;
mod tax;
mod timeline;

pub use aggregation::{
    DateWindow, PayPeriodAggregator, aggregate_pay_periods, fill_pay_period_gaps,
    theoretical_pay_dates,
};
pub use breaks::{BreakResolution, resolve_breaks};
pub use pay_date::{PayDateResult, PaySchedule, calculate_pay_date};
pub use pay_rate::{
    EVENING_START_MINUTES, RateClassification, ShiftClass, classify_shift, evening_hours,
};
pub use rounding::{floor_to_cent, round_half_up_2};
pub use shift_pay::{calculate_shift, calculate_shifts};
pub use summary::{EmployerTotals, MonthlySummary, monthly_summaries};
pub use tax::{
    NO_TFN_FOREIGN_RATE, NO_TFN_RATE, apply_taxes, calculate_superannuation, calculate_tax,
    calculate_tax_for_cycle, calculate_weekly_tax, weekly_earnings, weekly_equivalent,
};
pub use timeline::{Timeline, TimelineOptions, build_timeline};
