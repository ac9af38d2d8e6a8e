//! Core data models for the casual pay engine.
//!
//! This module contains the records that flow through the pipeline: raw and
//! computed shifts, employers, and aggregated pay periods.

mod employer;
mod pay_period;
pub mod serde_formats;
mod shift;

pub use employer::{Employer, PayCycle, TaxProfile, UserProfile};
pub use pay_period::PayPeriod;
pub use shift::{ComputedShift, MINUTES_PER_DAY, RateLabel, RateLine, RawShift};
