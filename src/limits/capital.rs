//! Capital disregards and per-category capital limits

use super::table::StepTable;
use crate::case::Category;
use crate::money::Pence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalLimits {
    /// Equity disregarded on property after the mortgage disregard
    pub equity_disregard: Pence,
    /// Most outstanding mortgage that can be offset against property value
    pub mortgage_disregard: Pence,
    /// Limit for categories without their own entry
    pub default_limit: Pence,
    pub category_limits: BTreeMap<Category, Pence>,
    /// Capital disregarded for over-60s, by monthly disposable income
    pub pensioner_disregard: StepTable,
}

impl CapitalLimits {
    pub fn default_2013() -> Self {
        let mut category_limits = BTreeMap::new();
        category_limits.insert(Category::new("immigration"), 300_000);

        Self {
            equity_disregard: 10_000_000,
            mortgage_disregard: 10_000_000,
            default_limit: 800_000,
            category_limits,
            pensioner_disregard: StepTable::from_sorted(
                "pensioner_disregard",
                &[
                    (0, 10_000_000),
                    (2_501, 9_000_000),
                    (5_001, 8_000_000),
                    (7_501, 7_000_000),
                    (10_001, 6_000_000),
                    (12_501, 5_000_000),
                    (15_001, 4_000_000),
                    (17_501, 3_000_000),
                    (20_001, 2_000_000),
                    (22_501, 1_000_000),
                    (31_501, 0),
                ],
                0,
            ),
        }
    }

    pub fn limit(&self, category: &Category) -> Pence {
        self.category_limits
            .get(category)
            .copied()
            .unwrap_or(self.default_limit)
    }

    pub fn pensioner_disregard(&self, disposable_income: Pence) -> Pence {
        self.pensioner_disregard.lookup(disposable_income)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_limits() {
        let limits = CapitalLimits::default_2013();
        assert_eq!(limits.limit(&Category::new("immigration")), 300_000);
        assert_eq!(limits.limit(&Category::new("debt")), 800_000);
        assert_eq!(limits.limit(&Category::new("no-such-category")), 800_000);
    }

    #[test]
    fn test_pensioner_disregard_bands() {
        let limits = CapitalLimits::default_2013();
        assert_eq!(limits.pensioner_disregard(0), 10_000_000);
        assert_eq!(limits.pensioner_disregard(2_500), 10_000_000);
        assert_eq!(limits.pensioner_disregard(2_501), 9_000_000);
        assert_eq!(limits.pensioner_disregard(22_500), 2_000_000);
        assert_eq!(limits.pensioner_disregard(31_500), 1_000_000);
        assert_eq!(limits.pensioner_disregard(31_501), 0);
        assert_eq!(limits.pensioner_disregard(1_000_000), 0);
    }

    #[test]
    fn test_pensioner_disregard_never_increases_with_income() {
        let limits = CapitalLimits::default_2013();
        let mut previous = limits.pensioner_disregard(0);
        for income in (0..40_000).step_by(250) {
            let current = limits.pensioner_disregard(income);
            assert!(current <= previous);
            previous = current;
        }
    }
}
