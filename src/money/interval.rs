//! Interval-based money amounts ("£50 per week") and their monthly equivalent

use super::Pence;
use serde::{Deserialize, Serialize};

/// Period an amount is quoted over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalPeriod {
    #[serde(rename = "per_week")]
    PerWeek,
    #[serde(rename = "per_2week")]
    Per2Weeks,
    #[serde(rename = "per_4week")]
    Per4Weeks,
    #[serde(rename = "per_month")]
    PerMonth,
    #[serde(rename = "per_year")]
    PerYear,
}

impl IntervalPeriod {
    /// Monthly conversion as (numerator, denominator)
    ///
    /// A year is 52 weeks, so one week is 52/12 of a month.
    fn monthly_ratio(self) -> (i64, i64) {
        match self {
            IntervalPeriod::PerWeek => (52, 12),
            IntervalPeriod::Per2Weeks => (26, 12),
            IntervalPeriod::Per4Weeks => (13, 12),
            IntervalPeriod::PerMonth => (1, 1),
            IntervalPeriod::PerYear => (1, 12),
        }
    }
}

/// An amount quoted per interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyInterval {
    pub interval_period: IntervalPeriod,
    pub per_interval_value: Pence,
}

impl MoneyInterval {
    pub fn new(interval_period: IntervalPeriod, per_interval_value: Pence) -> Self {
        Self {
            interval_period,
            per_interval_value,
        }
    }

    pub fn monthly(per_interval_value: Pence) -> Self {
        Self::new(IntervalPeriod::PerMonth, per_interval_value)
    }

    pub fn zero() -> Self {
        Self::monthly(0)
    }

    /// Monthly equivalent, rounded down to whole pence
    ///
    /// Saturates at the `Pence` bounds; case validation rejects such amounts.
    pub fn as_monthly(&self) -> Pence {
        let (num, den) = self.interval_period.monthly_ratio();
        let monthly = (self.per_interval_value as i128 * num as i128).div_euclid(den as i128);
        Pence::try_from(monthly).unwrap_or(if monthly < 0 { Pence::MIN } else { Pence::MAX })
    }
}

impl Default for MoneyInterval {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_rounds_down() {
        // 1000 * 52 / 12 = 4333.33..
        let weekly = MoneyInterval::new(IntervalPeriod::PerWeek, 1000);
        assert_eq!(weekly.as_monthly(), 4333);
    }

    #[test]
    fn test_annual_rounds_down() {
        let annual = MoneyInterval::new(IntervalPeriod::PerYear, 100_001);
        assert_eq!(annual.as_monthly(), 8333);

        let exact = MoneyInterval::new(IntervalPeriod::PerYear, 1_200_000);
        assert_eq!(exact.as_monthly(), 100_000);
    }

    #[test]
    fn test_other_periods() {
        assert_eq!(MoneyInterval::monthly(715).as_monthly(), 715);
        assert_eq!(MoneyInterval::new(IntervalPeriod::Per2Weeks, 1200).as_monthly(), 2600);
        assert_eq!(MoneyInterval::new(IntervalPeriod::Per4Weeks, 1200).as_monthly(), 1300);
        assert_eq!(MoneyInterval::zero().as_monthly(), 0);
    }

    #[test]
    fn test_deserialize_period_names() {
        let value: MoneyInterval =
            serde_json::from_str(r#"{"interval_period": "per_week", "per_interval_value": 12}"#)
                .unwrap();
        assert_eq!(value.interval_period, IntervalPeriod::PerWeek);
        assert_eq!(value.as_monthly(), 52);
    }

    #[test]
    fn test_huge_weekly_amount_saturates() {
        let weekly = MoneyInterval::new(IntervalPeriod::PerWeek, i64::MAX / 2);
        assert_eq!(weekly.as_monthly(), i64::MAX);

        let negative = MoneyInterval::new(IntervalPeriod::PerWeek, i64::MIN / 2);
        assert_eq!(negative.as_monthly(), i64::MIN);
    }
}
