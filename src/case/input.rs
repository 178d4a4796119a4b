//! Interval-based eligibility check input, as collected from an applicant
//!
//! Amounts are quoted per week, month, year etc. and are normalised into
//! monthly `CaseData` by `to_case_data`.

use super::data::{CaseData, Category, Deductions, Facts, Income, PersonFinance, Property, Savings};
use crate::money::{MoneyInterval, Pence};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeInput {
    pub earnings: MoneyInterval,
    pub other_income: MoneyInterval,
    pub self_employed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionsInput {
    pub income_tax: MoneyInterval,
    pub national_insurance: MoneyInterval,
    pub maintenance: MoneyInterval,
    pub mortgage: MoneyInterval,
    pub rent: MoneyInterval,
    pub childcare: MoneyInterval,
    pub criminal_legalaid_contributions: Pence,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonInput {
    pub income: IncomeInput,
    pub deductions: DeductionsInput,
    pub savings: Savings,
}

impl PersonInput {
    pub fn to_person_finance(&self) -> PersonFinance {
        PersonFinance {
            income: Income {
                earnings: self.income.earnings.as_monthly(),
                other_income: self.income.other_income.as_monthly(),
                self_employed: self.income.self_employed,
            },
            deductions: Deductions {
                income_tax: self.deductions.income_tax.as_monthly(),
                national_insurance: self.deductions.national_insurance.as_monthly(),
                maintenance: self.deductions.maintenance.as_monthly(),
                mortgage: self.deductions.mortgage.as_monthly(),
                rent: self.deductions.rent.as_monthly(),
                childcare: self.deductions.childcare.as_monthly(),
                criminal_legalaid_contributions: self.deductions.criminal_legalaid_contributions,
            },
            savings: self.savings.clone(),
        }
    }
}

/// Eligibility check as submitted, before normalisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityCheckInput {
    pub category: Category,
    #[serde(flatten)]
    pub facts: Facts,
    pub you: PersonInput,
    #[serde(default)]
    pub partner: Option<PersonInput>,
    #[serde(default)]
    pub property_set: Option<Vec<Property>>,
}

impl EligibilityCheckInput {
    /// Normalise into monthly case data
    ///
    /// Partner data is dropped unless `has_partner` is set.
    pub fn to_case_data(&self) -> CaseData {
        let partner = if self.facts.has_partner {
            self.partner.as_ref().map(PersonInput::to_person_finance)
        } else {
            None
        };

        CaseData {
            category: self.category.clone(),
            facts: self.facts.clone(),
            you: self.you.to_person_finance(),
            partner,
            property_data: self.property_set.clone(),
        }
    }
}
