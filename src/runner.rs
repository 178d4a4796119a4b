//! Runner for evaluating many cases against one set of limits
//!
//! Loads limits once, then evaluates cases independently. Each case gets its
//! own checker, so batches fan out across threads with no shared state.

use crate::calculator::{EligibilityChecker, EligibilityReport};
use crate::case::CaseData;
use crate::error::{LoadError, Result};
use crate::limits::PolicyLimits;
use log::info;
use rayon::prelude::*;

/// Pre-loaded eligibility runner
///
/// # Example
/// ```ignore
/// let runner = EligibilityRunner::from_csv()?;
/// let reports = runner.run_batch(&cases);
/// ```
#[derive(Debug, Clone)]
pub struct EligibilityRunner {
    limits: PolicyLimits,
}

impl EligibilityRunner {
    /// Create runner with the built-in limits
    pub fn new() -> Self {
        Self {
            limits: PolicyLimits::default_2013(),
        }
    }

    /// Create runner by loading limits from CSV files
    pub fn from_csv() -> std::result::Result<Self, LoadError> {
        Ok(Self {
            limits: PolicyLimits::from_csv()?,
        })
    }

    /// Create runner from specific limits directory
    pub fn from_csv_path(path: &std::path::Path) -> std::result::Result<Self, LoadError> {
        Ok(Self {
            limits: PolicyLimits::from_csv_path(path)?,
        })
    }

    pub fn with_limits(limits: PolicyLimits) -> Self {
        Self { limits }
    }

    /// Evaluate a single case
    pub fn run(&self, case_data: &CaseData) -> Result<EligibilityReport> {
        let checker = EligibilityChecker::with_limits(case_data.clone(), self.limits.clone())?;
        checker.report()
    }

    /// Evaluate cases in parallel; results are in input order
    pub fn run_batch(&self, cases: &[CaseData]) -> Vec<Result<EligibilityReport>> {
        info!("evaluating {} cases", cases.len());
        cases.par_iter().map(|case| self.run(case)).collect()
    }

    pub fn limits(&self) -> &PolicyLimits {
        &self.limits
    }
}

impl Default for EligibilityRunner {
    fn default() -> Self {
        Self::new()
    }
}
