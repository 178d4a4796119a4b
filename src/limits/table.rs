//! Step-function lookup tables over sorted breakpoints

use crate::error::LoadError;
use serde::{Deserialize, Serialize};

/// Ordered `(lower_bound, value)` breakpoints
///
/// `lookup(key)` returns the value of the greatest breakpoint `<= key`, so
/// each value holds from its breakpoint up to the next one. Keys below the
/// first breakpoint fall back to `below_first`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStepTable")]
pub struct StepTable {
    name: String,
    breakpoints: Vec<(i64, i64)>,
    below_first: i64,
}

/// Deserialized form, checked by `StepTable::new`
#[derive(Deserialize)]
struct RawStepTable {
    name: String,
    breakpoints: Vec<(i64, i64)>,
    below_first: i64,
}

impl TryFrom<RawStepTable> for StepTable {
    type Error = LoadError;

    fn try_from(raw: RawStepTable) -> Result<Self, Self::Error> {
        StepTable::new(raw.name, raw.breakpoints, raw.below_first)
    }
}

impl StepTable {
    /// Build a table, rejecting empty, unsorted or duplicate breakpoints
    pub fn new(
        name: impl Into<String>,
        breakpoints: Vec<(i64, i64)>,
        below_first: i64,
    ) -> Result<Self, LoadError> {
        let name = name.into();

        if breakpoints.is_empty() {
            return Err(LoadError::Table {
                name,
                message: "no breakpoints".to_string(),
            });
        }

        if let Some(pair) = breakpoints.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(LoadError::Table {
                message: format!(
                    "breakpoints must be strictly increasing ({} then {})",
                    pair[0].0, pair[1].0
                ),
                name,
            });
        }

        Ok(Self {
            name,
            breakpoints,
            below_first,
        })
    }

    /// Build a table from built-in breakpoints known to be sorted
    pub(crate) fn from_sorted(name: &str, breakpoints: &[(i64, i64)], below_first: i64) -> Self {
        debug_assert!(breakpoints.windows(2).all(|w| w[0].0 < w[1].0));
        Self {
            name: name.to_string(),
            breakpoints: breakpoints.to_vec(),
            below_first,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn breakpoints(&self) -> &[(i64, i64)] {
        &self.breakpoints
    }

    pub fn lookup(&self, key: i64) -> i64 {
        let idx = self.breakpoints.partition_point(|&(bound, _)| bound <= key);
        if idx == 0 {
            self.below_first
        } else {
            self.breakpoints[idx - 1].1
        }
    }
}
