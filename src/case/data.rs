//! Case data consumed by the eligibility checker
//!
//! All periodic amounts here are already monthly. See `input` for the
//! interval-based form that gets normalised into these structures.

use crate::error::{EligibilityError, Result};
use crate::money::Pence;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest amount accepted for any single field, £10 trillion
///
/// Keeps share weighting and household sums well inside `i64`.
pub const MAX_AMOUNT: Pence = 1_000_000_000_000_000;

/// Largest accepted count for each kind of dependant
pub const MAX_DEPENDANTS: u32 = 1_000;

/// Case category code, e.g. `debt` or `immigration`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(code: impl Into<String>) -> Self {
        Category(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Household circumstances relevant to the means test
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Facts {
    pub dependants_young: u32,
    pub dependants_old: u32,
    pub is_you_or_your_partner_over_60: bool,
    pub on_passported_benefits: bool,
    pub on_nass_benefits: bool,
    pub has_partner: bool,
    /// Partner is the other side of the dispute
    pub is_partner_opponent: bool,
}

impl Facts {
    pub fn dependant_children(&self) -> u32 {
        self.dependants_young.saturating_add(self.dependants_old)
    }

    pub fn should_aggregate_partner(&self) -> bool {
        self.has_partner && !self.is_partner_opponent
    }

    pub fn has_disputed_partner(&self) -> bool {
        self.has_partner && self.is_partner_opponent
    }
}

/// Monthly income for one person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Income {
    pub earnings: Pence,
    pub other_income: Pence,
    pub self_employed: bool,
}

impl Income {
    pub fn total(&self) -> Pence {
        self.earnings + self.other_income
    }
}

/// Monthly outgoings for one person
///
/// `criminal_legalaid_contributions` is a flat amount rather than a
/// normalised interval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    pub income_tax: Pence,
    pub national_insurance: Pence,
    pub maintenance: Pence,
    pub mortgage: Pence,
    pub rent: Pence,
    pub childcare: Pence,
    pub criminal_legalaid_contributions: Pence,
}

impl Deductions {
    pub fn tax_and_national_insurance(&self) -> Pence {
        self.income_tax + self.national_insurance
    }

    pub fn housing(&self) -> Pence {
        self.mortgage + self.rent
    }
}

/// Cash-like savings held by one person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Savings {
    pub bank_balance: Pence,
    pub investment_balance: Pence,
    pub asset_balance: Pence,
    pub credit_balance: Pence,
}

impl Savings {
    pub fn total(&self) -> Pence {
        self.bank_balance + self.investment_balance + self.asset_balance + self.credit_balance
    }
}

/// Finances of the applicant or their partner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonFinance {
    pub income: Income,
    pub deductions: Deductions,
    pub savings: Savings,
}

/// A property owned (wholly or in part) by the household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub value: Pence,
    pub mortgage_left: Pence,
    /// Percentage of the property owned, 0-100
    pub share: u8,
}

impl Property {
    pub fn new(value: Pence, mortgage_left: Pence, share: u8) -> Self {
        Self {
            value,
            mortgage_left,
            share,
        }
    }

    pub fn owned_value(&self) -> Pence {
        self.value * self.share as Pence / 100
    }

    pub fn owned_mortgage(&self) -> Pence {
        self.mortgage_left * self.share as Pence / 100
    }
}

/// Snapshot of an applicant's household finances for one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseData {
    pub category: Category,
    pub facts: Facts,
    pub you: PersonFinance,
    #[serde(default)]
    pub partner: Option<PersonFinance>,
    /// `None` until the property breakdown has been supplied
    #[serde(default)]
    pub property_data: Option<Vec<Property>>,
}

impl CaseData {
    pub fn new(category: Category, facts: Facts, you: PersonFinance) -> Self {
        Self {
            category,
            facts,
            you,
            partner: None,
            property_data: Some(Vec::new()),
        }
    }

    pub fn with_partner(mut self, partner: PersonFinance) -> Self {
        self.partner = Some(partner);
        self
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.property_data = Some(properties);
        self
    }

    pub fn without_property_data(mut self) -> Self {
        self.property_data = None;
        self
    }

    /// Partner finances when they are aggregated with the applicant's
    ///
    /// `Ok(None)` when no aggregation applies.
    pub fn aggregated_partner(&self) -> Result<Option<&PersonFinance>> {
        if !self.facts.should_aggregate_partner() {
            return Ok(None);
        }
        self.partner
            .as_ref()
            .map(Some)
            .ok_or_else(|| EligibilityError::MissingRequiredData("partner".to_string()))
    }

    /// Household savings total
    pub fn liquid_capital(&self) -> Result<Pence> {
        let mut total = self.you.savings.total();
        if let Some(partner) = self.aggregated_partner()? {
            total += partner.savings.total();
        }
        Ok(total)
    }

    /// Share-weighted property values and outstanding mortgages,
    /// as `(properties_value, mortgages_left)`
    pub fn property_capital(&self) -> Result<(Pence, Pence)> {
        let properties = self
            .property_data
            .as_ref()
            .ok_or_else(|| EligibilityError::MissingRequiredData("property_data".to_string()))?;

        properties
            .iter()
            .try_fold((0 as Pence, 0 as Pence), |(value, mortgage), p| {
                Some((
                    value.checked_add(p.owned_value())?,
                    mortgage.checked_add(p.owned_mortgage())?,
                ))
            })
            .ok_or_else(|| {
                EligibilityError::InvalidInput("total property value is too large".to_string())
            })
    }

    /// Reject negative or oversized amounts, implausible dependant counts
    /// and impossible property shares
    pub fn validate(&self) -> Result<()> {
        for (name, count) in [
            ("facts.dependants_young", self.facts.dependants_young),
            ("facts.dependants_old", self.facts.dependants_old),
        ] {
            if count > MAX_DEPENDANTS {
                return Err(EligibilityError::InvalidInput(format!(
                    "{name} must be at most {MAX_DEPENDANTS}, got {count}"
                )));
            }
        }

        validate_person("you", &self.you)?;
        if let Some(partner) = &self.partner {
            validate_person("partner", partner)?;
        }

        if let Some(properties) = &self.property_data {
            for (idx, property) in properties.iter().enumerate() {
                in_range(&format!("property[{idx}].value"), property.value)?;
                in_range(&format!("property[{idx}].mortgage_left"), property.mortgage_left)?;
                if property.share > 100 {
                    return Err(EligibilityError::InvalidInput(format!(
                        "property[{idx}].share must be between 0 and 100, got {}",
                        property.share
                    )));
                }
            }
        }

        Ok(())
    }
}

fn in_range(field: &str, amount: Pence) -> Result<()> {
    if amount < 0 {
        return Err(EligibilityError::InvalidInput(format!(
            "{field} must not be negative, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(EligibilityError::InvalidInput(format!(
            "{field} must be at most {MAX_AMOUNT}, got {amount}"
        )));
    }
    Ok(())
}

fn validate_person(who: &str, person: &PersonFinance) -> Result<()> {
    let income = &person.income;
    let deductions = &person.deductions;
    let savings = &person.savings;

    let fields = [
        ("income.earnings", income.earnings),
        ("income.other_income", income.other_income),
        ("deductions.income_tax", deductions.income_tax),
        ("deductions.national_insurance", deductions.national_insurance),
        ("deductions.maintenance", deductions.maintenance),
        ("deductions.mortgage", deductions.mortgage),
        ("deductions.rent", deductions.rent),
        ("deductions.childcare", deductions.childcare),
        (
            "deductions.criminal_legalaid_contributions",
            deductions.criminal_legalaid_contributions,
        ),
        ("savings.bank_balance", savings.bank_balance),
        ("savings.investment_balance", savings.investment_balance),
        ("savings.asset_balance", savings.asset_balance),
        ("savings.credit_balance", savings.credit_balance),
    ];

    for (name, amount) in fields {
        in_range(&format!("{who}.{name}"), amount)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_with_savings(bank: Pence) -> PersonFinance {
        PersonFinance {
            savings: Savings {
                bank_balance: bank,
                investment_balance: 200,
                asset_balance: 300,
                credit_balance: 400,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_facts() {
        let facts = Facts {
            dependants_young: 3,
            dependants_old: 2,
            has_partner: true,
            is_partner_opponent: true,
            ..Default::default()
        };
        assert_eq!(facts.dependant_children(), 5);
        assert!(!facts.should_aggregate_partner());
        assert!(facts.has_disputed_partner());

        let no_partner = Facts {
            is_partner_opponent: true,
            ..Default::default()
        };
        assert!(!no_partner.should_aggregate_partner());
        assert!(!no_partner.has_disputed_partner());
    }

    #[test]
    fn test_liquid_capital_aggregates_partner_savings() {
        let facts = Facts {
            has_partner: true,
            ..Default::default()
        };
        let case = CaseData::new(Category::new("debt"), facts, person_with_savings(100))
            .with_partner(person_with_savings(101));

        assert_eq!(case.liquid_capital().unwrap(), 1000 + 1001);
    }

    #[test]
    fn test_liquid_capital_ignores_partner_without_aggregation() {
        let case = CaseData::new(Category::new("debt"), Facts::default(), person_with_savings(100))
            .with_partner(person_with_savings(101));

        assert_eq!(case.liquid_capital().unwrap(), 1000);
    }

    #[test]
    fn test_missing_partner_when_aggregating() {
        let facts = Facts {
            has_partner: true,
            ..Default::default()
        };
        let case = CaseData::new(Category::new("debt"), facts, PersonFinance::default());

        assert_eq!(
            case.liquid_capital(),
            Err(EligibilityError::MissingRequiredData("partner".to_string()))
        );
    }

    #[test]
    fn test_property_capital_weights_by_share() {
        let case = CaseData::new(Category::new("debt"), Facts::default(), PersonFinance::default())
            .with_properties(vec![
                Property::new(20_000_000, 5_000_000, 50),
                Property::new(10_000_000, 0, 100),
            ]);

        assert_eq!(case.property_capital().unwrap(), (20_000_000, 2_500_000));
    }

    #[test]
    fn test_property_capital_missing() {
        let case = CaseData::new(Category::new("debt"), Facts::default(), PersonFinance::default())
            .without_property_data();

        assert!(matches!(
            case.property_capital(),
            Err(EligibilityError::MissingRequiredData(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let mut you = PersonFinance::default();
        you.deductions.rent = -1;
        let case = CaseData::new(Category::new("debt"), Facts::default(), you);

        match case.validate() {
            Err(EligibilityError::InvalidInput(message)) => {
                assert!(message.contains("you.deductions.rent"));
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_share() {
        let case = CaseData::new(Category::new("debt"), Facts::default(), PersonFinance::default())
            .with_properties(vec![Property::new(100, 0, 101)]);

        assert!(matches!(case.validate(), Err(EligibilityError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_huge_dependant_count() {
        let facts = Facts {
            dependants_young: u32::MAX,
            dependants_old: 1,
            ..Default::default()
        };
        let case = CaseData::new(Category::new("debt"), facts, PersonFinance::default());

        assert_eq!(case.facts.dependant_children(), u32::MAX);
        match case.validate() {
            Err(EligibilityError::InvalidInput(message)) => {
                assert!(message.contains("facts.dependants_young"));
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_huge_property_value() {
        let case = CaseData::new(Category::new("debt"), Facts::default(), PersonFinance::default())
            .with_properties(vec![Property::new(9_000_000_000_000_000_000, 0, 50)]);

        assert!(matches!(case.validate(), Err(EligibilityError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_accepts_max_amount() {
        let mut you = PersonFinance::default();
        you.savings.bank_balance = MAX_AMOUNT;
        let case = CaseData::new(Category::new("debt"), Facts::default(), you)
            .with_properties(vec![Property::new(MAX_AMOUNT, MAX_AMOUNT, 100)]);

        assert!(case.validate().is_ok());
        assert_eq!(case.property_capital().unwrap(), (MAX_AMOUNT, MAX_AMOUNT));
    }

    #[test]
    fn test_property_capital_total_overflow() {
        let properties = vec![Property::new(MAX_AMOUNT, 0, 100); 10_000];
        let case = CaseData::new(Category::new("debt"), Facts::default(), PersonFinance::default())
            .with_properties(properties);

        assert!(case.validate().is_ok());
        assert!(matches!(
            case.property_capital(),
            Err(EligibilityError::InvalidInput(_))
        ));
    }
}
