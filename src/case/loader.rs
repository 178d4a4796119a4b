//! Load cases from JSON check files and flat monthly CSV extracts

use super::data::{
    CaseData, Category, Deductions, Facts, Income, PersonFinance, Property, Savings,
};
use super::input::EligibilityCheckInput;
use crate::error::LoadError;
use crate::money::Pence;
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A case read from a batch file, tagged with its reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub case_ref: String,
    pub case_data: CaseData,
}

/// Raw CSV row: one case, amounts already monthly, at most one property
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    case_ref: String,
    category: String,
    #[serde(default)]
    dependants_young: u32,
    #[serde(default)]
    dependants_old: u32,
    #[serde(default)]
    over_60: bool,
    #[serde(default)]
    on_passported_benefits: bool,
    #[serde(default)]
    on_nass_benefits: bool,
    #[serde(default)]
    has_partner: bool,
    #[serde(default)]
    is_partner_opponent: bool,

    you_earnings: Pence,
    you_other_income: Pence,
    #[serde(default)]
    you_self_employed: bool,
    you_income_tax: Pence,
    you_national_insurance: Pence,
    you_maintenance: Pence,
    you_mortgage: Pence,
    you_rent: Pence,
    you_childcare: Pence,
    you_criminal_legalaid_contributions: Pence,
    you_savings: Pence,

    partner_earnings: Option<Pence>,
    partner_other_income: Option<Pence>,
    partner_self_employed: Option<bool>,
    partner_income_tax: Option<Pence>,
    partner_national_insurance: Option<Pence>,
    partner_maintenance: Option<Pence>,
    partner_mortgage: Option<Pence>,
    partner_rent: Option<Pence>,
    partner_childcare: Option<Pence>,
    partner_criminal_legalaid_contributions: Option<Pence>,
    partner_savings: Option<Pence>,

    property_value: Option<Pence>,
    property_mortgage_left: Option<Pence>,
    property_share: Option<u8>,
}

impl CsvRow {
    fn to_record(self) -> Result<CaseRecord, LoadError> {
        let facts = Facts {
            dependants_young: self.dependants_young,
            dependants_old: self.dependants_old,
            is_you_or_your_partner_over_60: self.over_60,
            on_passported_benefits: self.on_passported_benefits,
            on_nass_benefits: self.on_nass_benefits,
            has_partner: self.has_partner,
            is_partner_opponent: self.is_partner_opponent,
        };

        let you = PersonFinance {
            income: Income {
                earnings: self.you_earnings,
                other_income: self.you_other_income,
                self_employed: self.you_self_employed,
            },
            deductions: Deductions {
                income_tax: self.you_income_tax,
                national_insurance: self.you_national_insurance,
                maintenance: self.you_maintenance,
                mortgage: self.you_mortgage,
                rent: self.you_rent,
                childcare: self.you_childcare,
                criminal_legalaid_contributions: self.you_criminal_legalaid_contributions,
            },
            savings: Savings {
                bank_balance: self.you_savings,
                ..Default::default()
            },
        };

        // A partner is only read when some partner column is filled in
        let partner_columns = [
            self.partner_earnings,
            self.partner_other_income,
            self.partner_income_tax,
            self.partner_national_insurance,
            self.partner_maintenance,
            self.partner_mortgage,
            self.partner_rent,
            self.partner_childcare,
            self.partner_criminal_legalaid_contributions,
            self.partner_savings,
        ];
        let partner_given =
            partner_columns.iter().any(Option::is_some) || self.partner_self_employed.is_some();
        let partner = if self.has_partner && partner_given {
            Some(PersonFinance {
                income: Income {
                    earnings: self.partner_earnings.unwrap_or(0),
                    other_income: self.partner_other_income.unwrap_or(0),
                    self_employed: self.partner_self_employed.unwrap_or(false),
                },
                deductions: Deductions {
                    income_tax: self.partner_income_tax.unwrap_or(0),
                    national_insurance: self.partner_national_insurance.unwrap_or(0),
                    maintenance: self.partner_maintenance.unwrap_or(0),
                    mortgage: self.partner_mortgage.unwrap_or(0),
                    rent: self.partner_rent.unwrap_or(0),
                    childcare: self.partner_childcare.unwrap_or(0),
                    criminal_legalaid_contributions: self
                        .partner_criminal_legalaid_contributions
                        .unwrap_or(0),
                },
                savings: Savings {
                    bank_balance: self.partner_savings.unwrap_or(0),
                    ..Default::default()
                },
            })
        } else {
            None
        };

        let property_data = match (self.property_value, self.property_mortgage_left) {
            (None, None) => None,
            (Some(value), mortgage_left) => Some(vec![Property::new(
                value,
                mortgage_left.unwrap_or(0),
                self.property_share.unwrap_or(100),
            )]),
            (None, Some(_)) => {
                return Err(LoadError::Parse {
                    file: "cases".to_string(),
                    message: format!(
                        "case {}: property_mortgage_left given without property_value",
                        self.case_ref
                    ),
                })
            }
        };

        let case_data = CaseData {
            category: Category::new(self.category),
            facts,
            you,
            partner,
            property_data,
        };
        case_data.validate()?;

        Ok(CaseRecord {
            case_ref: self.case_ref,
            case_data,
        })
    }
}

/// Load all cases from a CSV file
pub fn load_cases<P: AsRef<Path>>(path: P) -> Result<Vec<CaseRecord>, LoadError> {
    let file = File::open(path)?;
    load_cases_from_reader(file)
}

/// Load cases from any reader (e.g., string buffer, network stream)
pub fn load_cases_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<CaseRecord>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut cases = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        cases.push(row.to_record()?);
    }

    Ok(cases)
}

/// Load an interval-based check from a JSON file
pub fn load_check_input<P: AsRef<Path>>(path: P) -> Result<EligibilityCheckInput, LoadError> {
    let file = File::open(path)?;
    let input = serde_json::from_reader(BufReader::new(file))?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "case_ref,category,dependants_young,dependants_old,over_60,\
on_passported_benefits,on_nass_benefits,has_partner,is_partner_opponent,\
you_earnings,you_other_income,you_self_employed,you_income_tax,you_national_insurance,\
you_maintenance,you_mortgage,you_rent,you_childcare,you_criminal_legalaid_contributions,you_savings,\
partner_earnings,partner_other_income,partner_self_employed,partner_income_tax,\
partner_national_insurance,partner_maintenance,partner_mortgage,partner_rent,partner_childcare,\
partner_criminal_legalaid_contributions,partner_savings,\
property_value,property_mortgage_left,property_share";

    #[test]
    fn test_load_cases_from_reader() {
        let data = format!(
            "{HEADER}\n\
A1,debt,0,0,false,false,false,false,false,100000,0,false,0,0,0,0,50000,0,0,20000,,,,,,,,,,,,,,\n\
A2,housing,1,0,false,false,false,true,false,100000,0,true,0,0,0,0,0,0,0,0,50000,0,false,0,0,0,0,0,0,0,5000,30000000,10000000,50\n"
        );

        let cases = load_cases_from_reader(data.as_bytes()).expect("cases load");
        assert_eq!(cases.len(), 2);

        let first = &cases[0];
        assert_eq!(first.case_ref, "A1");
        assert!(first.case_data.partner.is_none());
        assert!(first.case_data.property_data.is_none());
        assert_eq!(first.case_data.you.deductions.rent, 50_000);
        assert_eq!(first.case_data.you.savings.total(), 20_000);

        let second = &cases[1];
        assert_eq!(second.case_data.facts.dependant_children(), 1);
        let partner = second.case_data.partner.as_ref().expect("partner row");
        assert_eq!(partner.income.earnings, 50_000);
        assert_eq!(partner.savings.total(), 5_000);
        assert_eq!(
            second.case_data.property_data,
            Some(vec![Property::new(30_000_000, 10_000_000, 50)])
        );
    }

    #[test]
    fn test_partner_read_from_self_employed_column_alone() {
        let data = format!(
            "{HEADER}\n\
B1,debt,0,0,false,false,false,true,false,100000,0,false,0,0,0,0,0,0,0,0,,,true,,,,,,,,,,,\n"
        );

        let cases = load_cases_from_reader(data.as_bytes()).expect("cases load");
        let partner = cases[0].case_data.partner.as_ref().expect("partner row");
        assert!(partner.income.self_employed);
        assert_eq!(partner.income.total(), 0);
    }

    #[test]
    fn test_load_sample_check() {
        let input = load_check_input("data/checks/sample_check.json").expect("sample loads");
        let case = input.to_case_data();

        // 250.00 a week is 1083.33 a month
        assert_eq!(case.you.income.earnings, 108_333);
        assert_eq!(case.facts.dependant_children(), 1);
        let partner = case.partner.as_ref().expect("partner aggregated");
        assert_eq!(partner.income.earnings, 50_000);
        assert_eq!(case.liquid_capital().unwrap(), 150_000);
        assert_eq!(case.property_capital().unwrap(), (0, 0));
    }

    #[test]
    fn test_load_cases_rejects_negative_amounts() {
        let data = format!(
            "{HEADER}\n\
A1,debt,0,0,false,false,false,false,false,-1,0,false,0,0,0,0,0,0,0,0,,,,,,,,,,,,,,\n"
        );

        let result = load_cases_from_reader(data.as_bytes());
        assert!(matches!(result, Err(LoadError::Invalid(_))));
    }
}
