//! Means-test eligibility checker for a single case

use super::outcome::{Decision, EligibilityOutcome, EligibilityReport, EligibleBy, MeansTest};
use crate::case::CaseData;
use crate::error::{EligibilityError, Result};
use crate::limits::PolicyLimits;
use crate::money::Pence;
use log::{debug, warn};
use std::cell::OnceCell;

/// Evaluates one case against the means test
///
/// Gross income, disposable income and disposable capital are each computed
/// at most once per checker. A new case needs a new checker.
#[derive(Debug)]
pub struct EligibilityChecker {
    case_data: CaseData,
    limits: PolicyLimits,
    gross_income: OnceCell<Pence>,
    disposable_income: OnceCell<Result<Pence>>,
    disposable_capital_assets: OnceCell<Result<Pence>>,
}

impl EligibilityChecker {
    /// Create a checker using the built-in limits
    pub fn new(case_data: CaseData) -> Result<Self> {
        Self::with_limits(case_data, PolicyLimits::default_2013())
    }

    /// Create a checker with specific limits
    pub fn with_limits(case_data: CaseData, limits: PolicyLimits) -> Result<Self> {
        case_data.validate()?;
        Ok(Self {
            case_data,
            limits,
            gross_income: OnceCell::new(),
            disposable_income: OnceCell::new(),
            disposable_capital_assets: OnceCell::new(),
        })
    }

    pub fn case_data(&self) -> &CaseData {
        &self.case_data
    }

    /// Applicant's monthly earnings plus other income
    ///
    /// Partner income never counts towards the gross income test.
    pub fn gross_income(&self) -> Pence {
        *self
            .gross_income
            .get_or_init(|| self.case_data.you.income.total())
    }

    /// Monthly income left after allowances and deductions; may be negative
    pub fn disposable_income(&self) -> Result<Pence> {
        self.disposable_income
            .get_or_init(|| self.compute_disposable_income())
            .clone()
    }

    /// Capital left after disregards, never negative
    pub fn disposable_capital_assets(&self) -> Result<Pence> {
        self.disposable_capital_assets
            .get_or_init(|| self.compute_disposable_capital_assets())
            .clone()
    }

    fn compute_disposable_income(&self) -> Result<Pence> {
        let facts = &self.case_data.facts;
        let allowances = &self.limits.disposable_income;
        let you = &self.case_data.you;
        let partner = self.case_data.aggregated_partner()?;

        let mut income = self.gross_income();

        if facts.has_partner {
            income -= allowances.partner_allowance;
        }

        income -= facts.dependant_children() as Pence * allowances.child_allowance;

        income -= you.deductions.tax_and_national_insurance();
        if let Some(partner) = partner {
            income -= partner.deductions.tax_and_national_insurance();
        }

        income -= you.deductions.maintenance;
        if let Some(partner) = partner {
            income -= partner.deductions.maintenance;
        }

        // Cap applies to the combined household figure
        let mut housing = you.deductions.housing();
        if let Some(partner) = partner {
            housing += partner.deductions.housing();
        }
        if facts.dependant_children() == 0 {
            housing = housing.min(allowances.childless_housing_cap);
        }
        income -= housing;

        if !you.income.self_employed {
            income -= allowances.employment_costs_allowance;
        }
        // Checks has_partner as well as aggregation; keep both conditions
        if facts.has_partner
            && facts.should_aggregate_partner()
            && partner.is_some_and(|p| !p.income.self_employed)
        {
            income -= allowances.employment_costs_allowance;
        }

        income -= you.deductions.criminal_legalaid_contributions;
        if let Some(partner) = partner {
            income -= partner.deductions.criminal_legalaid_contributions;
        }

        income -= you.deductions.childcare;
        if let Some(partner) = partner {
            income -= partner.deductions.childcare;
        }

        debug!(
            "disposable income for {} case: {} (gross {})",
            self.case_data.category,
            income,
            self.gross_income()
        );

        Ok(income)
    }

    fn compute_disposable_capital_assets(&self) -> Result<Pence> {
        let facts = &self.case_data.facts;
        let limits = &self.limits.disposable_capital;

        // Joint savings and property can't be split with a disputed partner yet
        if facts.has_disputed_partner() {
            warn!(
                "disposable capital requested for {} case with a disputed partner",
                self.case_data.category
            );
            return Err(EligibilityError::UnsupportedScenario(
                "disposable capital with a disputed partner".to_string(),
            ));
        }

        let mut capital = self.case_data.liquid_capital()?;

        let (properties_value, mortgages_left) = self.case_data.property_capital()?;
        let property_equity = properties_value
            - mortgages_left.min(limits.mortgage_disregard)
            - limits.equity_disregard;
        capital = capital.checked_add(property_equity.max(0)).ok_or_else(|| {
            EligibilityError::InvalidInput("total capital is too large".to_string())
        })?;

        if facts.is_you_or_your_partner_over_60 {
            let disregard = limits.pensioner_disregard(self.disposable_income()?.max(0));
            capital -= disregard;
        }

        let capital = capital.max(0);
        debug!(
            "disposable capital for {} case: {}",
            self.case_data.category, capital
        );

        Ok(capital)
    }

    pub fn is_gross_income_eligible(&self) -> bool {
        let facts = &self.case_data.facts;
        if facts.on_passported_benefits {
            return true;
        }

        let limit = self.limits.gross_income.limit(facts.dependant_children());
        self.gross_income() <= limit
    }

    pub fn is_disposable_income_eligible(&self) -> Result<bool> {
        if self.case_data.facts.on_passported_benefits {
            return Ok(true);
        }

        Ok(self.disposable_income()? <= self.limits.disposable_income.limit)
    }

    /// Capital test; passported benefits do not exempt a case from it
    pub fn is_disposable_capital_eligible(&self) -> Result<bool> {
        let limit = self.limits.disposable_capital.limit(&self.case_data.category);
        Ok(self.disposable_capital_assets()? <= limit)
    }

    /// Apply the tests in order: NASS, capital, gross income, disposable income
    pub fn decision(&self) -> Result<Decision> {
        if self.case_data.facts.on_nass_benefits {
            return Ok(Decision::Eligible(EligibleBy::NassBenefits));
        }

        if !self.is_disposable_capital_eligible()? {
            return Ok(Decision::Ineligible(MeansTest::DisposableCapital));
        }

        if !self.is_gross_income_eligible() {
            return Ok(Decision::Ineligible(MeansTest::GrossIncome));
        }

        if !self.is_disposable_income_eligible()? {
            return Ok(Decision::Ineligible(MeansTest::DisposableIncome));
        }

        Ok(Decision::Eligible(EligibleBy::MeansTests))
    }

    pub fn is_eligible(&self) -> Result<bool> {
        Ok(self.decision()?.is_eligible())
    }

    /// Three-valued outcome
    ///
    /// Missing data and unsupported scenarios give `Unknown`; invalid input
    /// is still an error.
    pub fn outcome(&self) -> Result<EligibilityOutcome> {
        match self.decision() {
            Ok(decision) => Ok(decision.into()),
            Err(err) if err.is_unknown_outcome() => {
                warn!("eligibility unknown for {} case: {}", self.case_data.category, err);
                Ok(EligibilityOutcome::Unknown)
            }
            Err(err) => Err(err),
        }
    }

    /// Outcome with the intermediate figures that were available
    pub fn report(&self) -> Result<EligibilityReport> {
        let (is_eligible, eligible_by, failed_test, unknown_reason) = match self.decision() {
            Ok(Decision::Eligible(by)) => (EligibilityOutcome::Yes, Some(by), None, None),
            Ok(Decision::Ineligible(test)) => (EligibilityOutcome::No, None, Some(test), None),
            Err(err) if err.is_unknown_outcome() => {
                warn!("eligibility unknown for {} case: {}", self.case_data.category, err);
                (EligibilityOutcome::Unknown, None, None, Some(err.to_string()))
            }
            Err(err) => return Err(err),
        };

        Ok(EligibilityReport {
            is_eligible,
            eligible_by,
            failed_test,
            unknown_reason,
            gross_income: self.gross_income(),
            disposable_income: self.disposable_income().ok(),
            disposable_capital: self.disposable_capital_assets().ok(),
        })
    }
}
