//! Configuration loading for the casual pay engine.
//!
//! The wage rate table, break schedule and public holiday calendar are
//! versioned reference data maintained outside this crate. They are loaded
//! once into immutable values and shared by every pipeline run.
//!
//! # Example
//!
//! ```no_run
//! use casual_pay::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/casual").unwrap();
//! println!("Loaded award: {}", config.award().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AwardMetadata, BreakRule, BreakSchedule, MealBreakPolicy, PublicHoliday,
    PublicHolidayCalendar, ReferenceData, RestBreakPolicy, WageLevel, WageRateTable, WageRates,
};
