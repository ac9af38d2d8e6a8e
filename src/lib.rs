//! Casual pay engine.
//!
//! This crate turns casual shift records into pay: it deducts unpaid
//! breaks, classifies each shift against the casual wage rates and public
//! holiday calendar, schedules it into an employer's pay period, aggregates
//! periods, and applies PAYG withholding.
//!
//! # Example
//!
//! ```no_run
//! use casual_pay::calculation::{TimelineOptions, build_timeline};
//! use casual_pay::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("config/casual").unwrap();
//! let profile = ConfigLoader::load_user("config/user.yaml").unwrap();
//! let shifts = ConfigLoader::load_shifts("config/shifts.yaml").unwrap();
//!
//! let timeline = build_timeline(
//!     &shifts,
//!     &profile.employers,
//!     loader.data(),
//!     &TimelineOptions::default(),
//! );
//! for period in &timeline.pay_dates {
//!     println!("{} {}: {}", period.date, period.employer, period.amount);
//! }
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
