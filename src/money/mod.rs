//! Monetary amounts in integer pence and interval normalisation

mod interval;

pub use interval::{IntervalPeriod, MoneyInterval};

/// Amount of money in pence
pub type Pence = i64;

/// Format pence as pounds for display, e.g. `-1234` -> `-£12.34`
pub fn format_pounds(amount: Pence) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}£{}.{:02}", sign, abs / 100, abs % 100)
}
