//! Case data structures and case loading

mod data;
mod input;
pub mod loader;

pub use data::{
    CaseData, Category, Deductions, Facts, Income, PersonFinance, Property, Savings, MAX_AMOUNT,
    MAX_DEPENDANTS,
};
pub use input::{DeductionsInput, EligibilityCheckInput, IncomeInput, PersonInput};
pub use loader::{load_cases, load_cases_from_reader, load_check_input, CaseRecord};
