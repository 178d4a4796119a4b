//! Means-test eligibility calculator
//!
//! A case is eligible when the applicant receives NASS (asylum support)
//! benefits, or when it passes, in order:
//! 1. **Disposable capital**: savings plus property equity after disregards,
//!    against a per-category limit
//! 2. **Gross income**: the applicant's own monthly income, against a limit
//!    that rises with the number of dependant children
//! 3. **Disposable income**: gross income less allowances and household
//!    outgoings, against a fixed limit
//!
//! Passported benefits satisfy both income tests but not the capital test.

mod checker;
mod outcome;

pub use checker::EligibilityChecker;
pub use outcome::{Decision, EligibilityOutcome, EligibilityReport, EligibleBy, MeansTest};
