//! Eligibility decisions and the outcome reported to callers

use crate::money::{format_pounds, Pence};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The individual means tests, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeansTest {
    DisposableCapital,
    GrossIncome,
    DisposableIncome,
}

impl fmt::Display for MeansTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeansTest::DisposableCapital => "disposable capital",
            MeansTest::GrossIncome => "gross income",
            MeansTest::DisposableIncome => "disposable income",
        };
        f.write_str(name)
    }
}

/// Route by which a case became eligible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibleBy {
    /// Asylum support grants eligibility without any means test
    NassBenefits,
    /// Every means test passed
    MeansTests,
}

/// Definite eligibility decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Eligible(EligibleBy),
    /// First test that failed
    Ineligible(MeansTest),
}

impl Decision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Decision::Eligible(_))
    }

    pub fn failed_test(&self) -> Option<MeansTest> {
        match self {
            Decision::Eligible(_) => None,
            Decision::Ineligible(test) => Some(*test),
        }
    }
}

/// Three-valued answer exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EligibilityOutcome {
    Yes,
    No,
    /// Data is missing or the scenario is not supported
    Unknown,
}

impl fmt::Display for EligibilityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EligibilityOutcome::Yes => "yes",
            EligibilityOutcome::No => "no",
            EligibilityOutcome::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

impl From<Decision> for EligibilityOutcome {
    fn from(decision: Decision) -> Self {
        if decision.is_eligible() {
            EligibilityOutcome::Yes
        } else {
            EligibilityOutcome::No
        }
    }
}

/// Outcome together with the figures behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub is_eligible: EligibilityOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_by: Option<EligibleBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_test: Option<MeansTest>,
    /// Why the outcome is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_reason: Option<String>,
    pub gross_income: Pence,
    pub disposable_income: Option<Pence>,
    pub disposable_capital: Option<Pence>,
}

impl EligibilityReport {
    pub fn summary(&self) -> String {
        match (self.is_eligible, self.failed_test, &self.unknown_reason) {
            (EligibilityOutcome::Yes, _, _) => match self.eligible_by {
                Some(EligibleBy::NassBenefits) => "eligible (NASS benefits)".to_string(),
                _ => "eligible".to_string(),
            },
            (EligibilityOutcome::No, Some(test), _) => format!("not eligible: fails {test} test"),
            (EligibilityOutcome::No, None, _) => "not eligible".to_string(),
            (EligibilityOutcome::Unknown, _, Some(reason)) => format!("unknown: {reason}"),
            (EligibilityOutcome::Unknown, _, None) => "unknown".to_string(),
        }
    }
}

impl fmt::Display for EligibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = |amount: Option<Pence>| {
            amount
                .map(format_pounds)
                .unwrap_or_else(|| "n/a".to_string())
        };

        writeln!(f, "Outcome: {}", self.summary())?;
        writeln!(f, "  Gross income:       {}", format_pounds(self.gross_income))?;
        writeln!(f, "  Disposable income:  {}", optional(self.disposable_income))?;
        write!(f, "  Disposable capital: {}", optional(self.disposable_capital))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_decision() {
        assert_eq!(
            EligibilityOutcome::from(Decision::Eligible(EligibleBy::MeansTests)),
            EligibilityOutcome::Yes
        );
        assert_eq!(
            EligibilityOutcome::from(Decision::Ineligible(MeansTest::GrossIncome)),
            EligibilityOutcome::No
        );
    }

    #[test]
    fn test_report_serializes_transport_values() {
        let report = EligibilityReport {
            is_eligible: EligibilityOutcome::Unknown,
            eligible_by: None,
            failed_test: None,
            unknown_reason: Some("required data missing: property_data".to_string()),
            gross_income: 1_100,
            disposable_income: Some(-500),
            disposable_capital: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["is_eligible"], "unknown");
        assert_eq!(json["gross_income"], 1_100);
        assert!(json["disposable_capital"].is_null());
        assert!(json.get("failed_test").is_none());
    }

    #[test]
    fn test_summary_names_failed_test() {
        let report = EligibilityReport {
            is_eligible: EligibilityOutcome::No,
            eligible_by: None,
            failed_test: Some(MeansTest::DisposableCapital),
            unknown_reason: None,
            gross_income: 0,
            disposable_income: Some(0),
            disposable_capital: Some(900_000),
        };
        assert_eq!(report.summary(), "not eligible: fails disposable capital test");
        assert!(report.to_string().contains("£9000.00"));
    }
}
