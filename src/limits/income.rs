//! Income limits and the fixed allowances used for disposable income

use super::table::StepTable;
use crate::money::Pence;
use serde::{Deserialize, Serialize};

/// Monthly gross income limit by number of dependant children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossIncomeLimits {
    /// Limit by dependant count
    pub bands: StepTable,
    /// Children covered by the banded limit before the per-child uplift applies
    pub inclusive_children: u32,
    /// Added to the limit for each child beyond `inclusive_children`
    pub extra_child_increment: Pence,
}

impl GrossIncomeLimits {
    /// 2013 limits: £2,657 a month for up to four children, £222 per child after that
    pub fn default_2013() -> Self {
        Self {
            bands: StepTable::from_sorted("gross_income_limits", &[(0, 265_700)], 265_700),
            inclusive_children: 4,
            extra_child_increment: 22_200,
        }
    }

    pub fn limit(&self, dependant_children: u32) -> Pence {
        let extra_children = dependant_children.saturating_sub(self.inclusive_children);
        self.bands.lookup(dependant_children as i64)
            + extra_children as Pence * self.extra_child_increment
    }
}

/// Monthly allowances deducted from gross income, and the disposable income limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisposableIncomeAllowances {
    pub partner_allowance: Pence,
    pub child_allowance: Pence,
    pub employment_costs_allowance: Pence,
    /// Cap on combined housing costs when there are no dependant children
    pub childless_housing_cap: Pence,
    pub limit: Pence,
}

impl DisposableIncomeAllowances {
    pub fn default_2013() -> Self {
        Self {
            partner_allowance: 18_191,
            child_allowance: 29_155,
            employment_costs_allowance: 4_500,
            childless_housing_cap: 54_500,
            limit: 73_300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gross_income_limit_steps_with_children() {
        let limits = GrossIncomeLimits::default_2013();
        assert_eq!(limits.limit(0), 265_700);
        assert_eq!(limits.limit(4), 265_700);
        assert_eq!(limits.limit(5), 287_900);
        assert_eq!(limits.limit(7), 332_300);
    }

    #[test]
    fn test_gross_income_limit_is_monotonic() {
        let limits = GrossIncomeLimits::default_2013();
        for children in 0..20 {
            assert!(limits.limit(children + 1) >= limits.limit(children));
        }
    }

    #[test]
    fn test_banded_limits_add_to_uplift() {
        let limits = GrossIncomeLimits {
            bands: StepTable::new("bands", vec![(0, 100_000), (2, 120_000)], 100_000).unwrap(),
            inclusive_children: 3,
            extra_child_increment: 1_000,
        };
        assert_eq!(limits.limit(1), 100_000);
        assert_eq!(limits.limit(2), 120_000);
        assert_eq!(limits.limit(5), 122_000);
    }
}
