//! Lifecycle status derivation.
//!
//! Dates are compared as UTC calendar days: callers pass
//! `Utc::now().date_naive()` as `today` and `end_date` is taken verbatim as
//! a UTC calendar date. No other timezone normalization happens anywhere.

use crate::types::ContractStatus;
use chrono::NaiveDate;

/// Days remaining until 30 or fewer count as expiring.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Whole days from `today` until `end`. Negative once the end date has
/// passed; zero on the final day itself.
pub fn days_remaining(end: NaiveDate, today: NaiveDate) -> i64 {
    (end - today).num_days()
}

/// Derive a contract's lifecycle status from its end date.
///
/// Ending today counts as expiring, not expired: the boundary is
/// inclusive on the expiring side.
pub fn derive_status(end: NaiveDate, today: NaiveDate) -> ContractStatus {
    let days = days_remaining(end, today);
    if days < 0 {
        ContractStatus::Expired
    } else if days <= EXPIRY_WINDOW_DAYS {
        ContractStatus::Expiring
    } else {
        ContractStatus::Active
    }
}
