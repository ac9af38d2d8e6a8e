//! Serde adapters for the wall-clock formats used by shift and employer records.
//!
//! Times travel as 24-hour `"HH:MM"` strings and weekdays as full English
//! names (`"Thursday"`), which is what the presentation layer stores.

/// `"HH:MM"` time-of-day, no seconds, no timezone.
pub mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%H:%M";

    /// Serializes a time as `"HH:MM"`.
    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    /// Deserializes a time from `"HH:MM"`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }
}

/// Weekday written as its full English name.
pub mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Returns the full English name of a weekday.
    pub fn name(weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    /// Serializes a weekday as its full name.
    pub fn serialize<S>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(name(*weekday))
    }

    /// Deserializes a weekday from a full or abbreviated name, any case.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<Weekday>()
            .map_err(|_| de::Error::custom(format!("invalid weekday '{}'", raw)))
    }
}
