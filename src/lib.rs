//! Legal Aid Eligibility - means-test calculator for civil legal aid
//!
//! This library provides:
//! - Monthly normalisation of interval-based money amounts
//! - Case data assembly (household facts, income, deductions, savings, property)
//! - Gross income, disposable income and disposable capital tests
//! - A three-valued eligibility outcome (yes / no / unknown)
//! - Loadable policy limit tables and parallel batch evaluation

pub mod calculator;
pub mod case;
pub mod error;
pub mod limits;
pub mod money;
pub mod runner;

// Re-export commonly used types
pub use calculator::{EligibilityChecker, EligibilityOutcome, EligibilityReport};
pub use case::{CaseData, EligibilityCheckInput};
pub use error::{EligibilityError, LoadError};
pub use limits::PolicyLimits;
pub use runner::EligibilityRunner;
