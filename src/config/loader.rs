//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the reference
//! data bundle from YAML files, and helpers for reading the user profile and
//! shift records the presentation layer hands over.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{RawShift, UserProfile};

use super::types::{
    AwardMetadata, BreakSchedule, PublicHoliday, PublicHolidayCalendar, ReferenceData,
    WageRateTable, WageRates,
};

/// Loads and provides access to the reference data bundle.
///
/// # Directory Structure
///
/// ```text
/// config/casual/
/// ├── award.yaml     # Award metadata
/// ├── breaks.yaml    # Rest/meal break policy and break schedule
/// ├── rates.yaml     # Casual wage rates by level
/// └── holidays.yaml  # Public holidays by year and region
/// ```
///
/// # Example
///
/// ```no_run
/// use casual_pay::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/casual").unwrap();
/// println!("Loaded award: {}", loader.award().name);
///
/// let rates = loader.wage_rates("level_2").unwrap();
/// println!("Ordinary rate: ${}", rates.ordinary);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    data: ReferenceData,
}

#[derive(Deserialize)]
struct ShiftsFile {
    shifts: Vec<RawShift>,
}

impl ConfigLoader {
    /// Loads the reference data bundle from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The break schedule is not an ordered set of tiers
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let award = Self::load_file::<AwardMetadata>(&path.join("award.yaml"))?;
        let breaks = Self::load_file::<BreakSchedule>(&path.join("breaks.yaml"))?;
        breaks.validate()?;
        let wages = Self::load_file::<WageRateTable>(&path.join("rates.yaml"))?;
        let holidays = Self::load_file::<PublicHolidayCalendar>(&path.join("holidays.yaml"))?;

        debug!(
            award = %award.code,
            levels = wages.casual.len(),
            break_tiers = breaks.schedule.len(),
            "Loaded reference data"
        );

        Ok(Self {
            data: ReferenceData::new(award, breaks, wages, holidays),
        })
    }

    /// Loads a user profile and validates every employer in it.
    ///
    /// JSON is read from `.json` files, YAML from anything else.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::InvalidEmployer`] when an employer breaks
    /// its invariants, or a parse error when a pay cycle is unsupported.
    pub fn load_user<P: AsRef<Path>>(path: P) -> EngineResult<UserProfile> {
        let profile = Self::load_file::<UserProfile>(path.as_ref())?;
        for employer in &profile.employers {
            employer.validate()?;
        }
        Ok(profile)
    }

    /// Loads shift records from a `{ shifts: [...] }` document.
    pub fn load_shifts<P: AsRef<Path>>(path: P) -> EngineResult<Vec<RawShift>> {
        Ok(Self::load_file::<ShiftsFile>(path.as_ref())?.shifts)
    }

    /// Loads and parses a YAML or JSON file.
    fn load_file<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })
    }

    /// Returns the underlying reference data.
    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Returns the award metadata.
    pub fn award(&self) -> &AwardMetadata {
        self.data.award()
    }

    /// Gets the casual rates for a wage level.
    ///
    /// A missing level is not an error: the pipeline pays such shifts at 0.
    pub fn wage_rates(&self, level: &str) -> Option<&WageRates> {
        self.data.wages().rates_for(level)
    }

    /// Gets the public holiday on a date for an employer in `state`.
    pub fn holiday(&self, date: NaiveDate, state: &str) -> Option<&PublicHoliday> {
        self.data.holidays().holiday_for(date, state)
    }
}
