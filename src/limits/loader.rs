//! CSV-based limit loader
//!
//! Loads means-test limits from CSV files in data/limits/

use super::table::StepTable;
use crate::error::LoadError;
use crate::money::Pence;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Default path to the limits directory
pub const DEFAULT_LIMITS_PATH: &str = "data/limits";

fn parse_field<T: std::str::FromStr>(file: &str, field: &str, raw: &str) -> Result<T, LoadError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|err: T::Err| LoadError::Parse {
        file: file.to_string(),
        message: format!("{field} {raw:?}: {err}"),
    })
}

/// Load two-column numeric breakpoints, e.g. `dependant_children,limit`
pub fn load_breakpoints(path: &Path, file_name: &str) -> Result<Vec<(i64, i64)>, LoadError> {
    let file = File::open(path.join(file_name))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut breakpoints = Vec::new();
    for result in reader.records() {
        let record = result?;
        let bound: i64 = parse_field(file_name, "bound", &record[0])?;
        let value: i64 = parse_field(file_name, "value", &record[1])?;
        breakpoints.push((bound, value));
    }

    Ok(breakpoints)
}

/// Load capital limits by category code
/// Returns HashMap<category, limit>; the `default` row is included as-is
pub fn load_capital_limits(path: &Path) -> Result<HashMap<String, Pence>, LoadError> {
    load_named_values(path, "capital_limits.csv")
}

/// Load named scalar allowances
/// Returns HashMap<key, value>
pub fn load_allowances(path: &Path) -> Result<HashMap<String, Pence>, LoadError> {
    load_named_values(path, "allowances.csv")
}

fn load_named_values(path: &Path, file_name: &str) -> Result<HashMap<String, Pence>, LoadError> {
    let file = File::open(path.join(file_name))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut values = HashMap::new();
    for result in reader.records() {
        let record = result?;
        let key = record[0].trim().to_string();
        let value: Pence = parse_field(file_name, &key, &record[1])?;
        values.insert(key, value);
    }

    Ok(values)
}

/// All limit tables as read from disk
pub struct LoadedLimits {
    pub gross_income_limits: StepTable,
    pub pensioner_disregard: StepTable,
    pub capital_limits: HashMap<String, Pence>,
    pub allowances: HashMap<String, Pence>,
}

impl LoadedLimits {
    /// Load all limits from the default path
    pub fn load_default() -> Result<Self, LoadError> {
        Self::load_from(Path::new(DEFAULT_LIMITS_PATH))
    }

    /// Load all limits from a specific path
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        let gross_income = load_breakpoints(path, "gross_income_limits.csv")?;
        // Fewer children than the first band can't happen, so fall back to the first limit
        let gross_floor = gross_income.first().map(|&(_, value)| value).unwrap_or(0);

        Ok(Self {
            gross_income_limits: StepTable::new("gross_income_limits", gross_income, gross_floor)?,
            pensioner_disregard: StepTable::new(
                "pensioner_disregard",
                load_breakpoints(path, "pensioner_disregard.csv")?,
                0,
            )?,
            capital_limits: load_capital_limits(path)?,
            allowances: load_allowances(path)?,
        })
    }

    /// Fetch a required allowance by key
    pub fn allowance(&self, key: &str) -> Result<Pence, LoadError> {
        self.allowances.get(key).copied().ok_or_else(|| LoadError::Parse {
            file: "allowances.csv".to_string(),
            message: format!("missing required key {key}"),
        })
    }
}
