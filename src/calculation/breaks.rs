//! Break entitlement resolution.
//!
//! This module maps the scheduled length of a shift to the tier of the break
//! schedule that applies and the unpaid minutes that come out of paid time.

use rust_decimal::Decimal;

use crate::config::BreakSchedule;

/// The break entitlement for one shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakResolution {
    /// Index of the matching tier, or `None` when no tier matched.
    pub tier: Option<usize>,
    /// Paid rest breaks the shift is entitled to.
    pub rest_breaks: u32,
    /// Meal breaks the shift is entitled to.
    pub meal_breaks: u32,
    /// Minutes deducted from the scheduled time.
    pub unpaid_minutes: i64,
}

impl BreakResolution {
    fn none() -> Self {
        Self {
            tier: None,
            rest_breaks: 0,
            meal_breaks: 0,
            unpaid_minutes: 0,
        }
    }
}

/// Resolves the break entitlement for a shift of `scheduled_minutes`.
///
/// The first tier whose range contains the scheduled hours applies. Each
/// meal break deducts the minimum meal break duration, unless meal breaks
/// are paid. Rest breaks are never deducted.
///
/// # Arguments
///
/// * `scheduled_minutes` - Shift length before breaks, midnight-adjusted
/// * `breaks` - The break schedule from the reference data
///
/// # Returns
///
/// The matched tier and the unpaid minutes. A length no tier covers yields
/// zero unpaid minutes.
///
/// # Examples
///
/// ```no_run
/// use casual_pay::calculation::resolve_breaks;
/// use casual_pay::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("config/casual").unwrap();
/// let resolution = resolve_breaks(8 * 60, loader.data().breaks());
/// // 8 hours falls in the 7 to 9.99 hour tier: one 30 minute meal break
/// assert_eq!(resolution.unpaid_minutes, 30);
/// ```
pub fn resolve_breaks(scheduled_minutes: i64, breaks: &BreakSchedule) -> BreakResolution {
    let hours = Decimal::from(scheduled_minutes) / Decimal::from(60);

    let Some((index, rule)) = breaks
        .schedule
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.contains(hours))
    else {
        return BreakResolution::none();
    };

    let unpaid_minutes = if breaks.meal_break.is_paid {
        0
    } else {
        i64::from(rule.meal_breaks) * i64::from(breaks.meal_break.min_duration)
    };

    BreakResolution {
        tier: Some(index),
        rest_breaks: rule.rest_breaks,
        meal_breaks: rule.meal_breaks,
        unpaid_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    fn load_breaks() -> BreakSchedule {
        ConfigLoader::load("config/casual")
            .expect("Failed to load config")
            .data()
            .breaks()
            .clone()
    }

    /// BR-001: short shift has no meal break
    #[test]
    fn test_br_001_under_four_hours_no_break() {
        let breaks = load_breaks();
        let resolution = resolve_breaks(3 * 60 + 59, &breaks);
        assert_eq!(resolution.tier, Some(0));
        assert_eq!(resolution.unpaid_minutes, 0);
    }

    /// BR-002: four hours exactly moves to the rest-break tier
    #[test]
    fn test_br_002_four_hours_rest_only() {
        let breaks = load_breaks();
        let resolution = resolve_breaks(4 * 60, &breaks);
        assert_eq!(resolution.tier, Some(1));
        assert_eq!(resolution.rest_breaks, 1);
        assert_eq!(resolution.unpaid_minutes, 0);
    }

    /// BR-003: five hours exactly triggers one meal break
    #[test]
    fn test_br_003_five_hours_one_meal() {
        let breaks = load_breaks();
        let resolution = resolve_breaks(5 * 60, &breaks);
        assert_eq!(resolution.tier, Some(2));
        assert_eq!(resolution.unpaid_minutes, 30);
    }

    /// BR-004: eight hours sits in the 7 to 9.99 tier
    #[test]
    fn test_br_004_eight_hours() {
        let breaks = load_breaks();
        let resolution = resolve_breaks(8 * 60, &breaks);
        assert_eq!(resolution.tier, Some(3));
        assert_eq!(resolution.rest_breaks, 2);
        assert_eq!(resolution.meal_breaks, 1);
        assert_eq!(resolution.unpaid_minutes, 30);
    }

    /// BR-005: the last tier is unbounded
    #[test]
    fn test_br_005_long_shift_two_meals() {
        let breaks = load_breaks();
        assert_eq!(resolve_breaks(10 * 60, &breaks).unpaid_minutes, 60);
        assert_eq!(resolve_breaks(14 * 60, &breaks).unpaid_minutes, 60);
    }

    #[test]
    fn test_paid_meal_breaks_are_not_deducted() {
        let mut breaks = load_breaks();
        breaks.meal_break.is_paid = true;
        let resolution = resolve_breaks(8 * 60, &breaks);
        assert_eq!(resolution.meal_breaks, 1);
        assert_eq!(resolution.unpaid_minutes, 0);
    }

    #[test]
    fn test_uncovered_length_deducts_nothing() {
        let mut breaks = load_breaks();
        breaks.schedule.truncate(1);
        let resolution = resolve_breaks(6 * 60, &breaks);
        assert_eq!(resolution.tier, None);
        assert_eq!(resolution.unpaid_minutes, 0);
    }

    #[test]
    fn test_zero_length_shift() {
        let breaks = load_breaks();
        assert_eq!(resolve_breaks(0, &breaks).unpaid_minutes, 0);
    }
}
