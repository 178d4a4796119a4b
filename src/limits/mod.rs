//! Means-test limits, allowances and disregards
//!
//! The limits are policy constants set by regulation. They are held as
//! explicit lookup tables so each step function can be audited and tested
//! on its own:
//! - Gross income limit by number of dependant children
//! - Fixed allowances and the disposable income limit
//! - Capital limit by case category, and the pensioner capital disregard

mod capital;
mod income;
mod table;
pub mod loader;

pub use capital::CapitalLimits;
pub use income::{DisposableIncomeAllowances, GrossIncomeLimits};
pub use loader::LoadedLimits;
pub use table::StepTable;

use crate::case::Category;
use crate::error::LoadError;
use std::path::Path;

/// Container for every limit the checker consults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyLimits {
    pub gross_income: GrossIncomeLimits,
    pub disposable_income: DisposableIncomeAllowances,
    pub disposable_capital: CapitalLimits,
}

impl PolicyLimits {
    /// Limits in force from April 2013
    pub fn default_2013() -> Self {
        Self {
            gross_income: GrossIncomeLimits::default_2013(),
            disposable_income: DisposableIncomeAllowances::default_2013(),
            disposable_capital: CapitalLimits::default_2013(),
        }
    }

    /// Load limits from CSV files in the default location (data/limits/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_LIMITS_PATH))
    }

    /// Load limits from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let loaded = LoadedLimits::load_from(path)?;
        Self::from_loaded(loaded)
    }

    pub fn from_loaded(loaded: LoadedLimits) -> Result<Self, LoadError> {
        let inclusive_children = loaded.allowance("gross_income_inclusive_children")?;
        let inclusive_children = u32::try_from(inclusive_children).map_err(|_| LoadError::Parse {
            file: "allowances.csv".to_string(),
            message: format!("gross_income_inclusive_children out of range: {inclusive_children}"),
        })?;

        let gross_income = GrossIncomeLimits {
            bands: loaded.gross_income_limits.clone(),
            inclusive_children,
            extra_child_increment: loaded.allowance("gross_income_extra_child_increment")?,
        };

        let disposable_income = DisposableIncomeAllowances {
            partner_allowance: loaded.allowance("partner_allowance")?,
            child_allowance: loaded.allowance("child_allowance")?,
            employment_costs_allowance: loaded.allowance("employment_costs_allowance")?,
            childless_housing_cap: loaded.allowance("childless_housing_cap")?,
            limit: loaded.allowance("disposable_income_limit")?,
        };

        let mut category_limits = std::collections::BTreeMap::new();
        let mut default_limit = None;
        for (code, limit) in &loaded.capital_limits {
            if code == "default" {
                default_limit = Some(*limit);
            } else {
                category_limits.insert(Category::new(code.clone()), *limit);
            }
        }
        let default_limit = default_limit.ok_or_else(|| LoadError::Parse {
            file: "capital_limits.csv".to_string(),
            message: "missing default row".to_string(),
        })?;

        let disposable_capital = CapitalLimits {
            equity_disregard: loaded.allowance("equity_disregard")?,
            mortgage_disregard: loaded.allowance("mortgage_disregard")?,
            default_limit,
            category_limits,
            pensioner_disregard: loaded.pensioner_disregard,
        };

        Ok(Self {
            gross_income,
            disposable_income,
            disposable_capital,
        })
    }
}

impl Default for PolicyLimits {
    fn default() -> Self {
        Self::default_2013()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_limits_match_built_in_defaults() {
        let loaded = PolicyLimits::from_csv().expect("limits load");
        assert_eq!(loaded, PolicyLimits::default_2013());
    }
}
