use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type alias for contract identifiers
pub type ContractId = u64;

/// A tracked engagement record.
///
/// Lifecycle status is deliberately not a field here: it is a pure function
/// of `end_date` and the current day, derived on every read via
/// [`ContractView::derive`]. Persisting it would invite stale reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contract {
    /// Unique identifier. Assigned `max(existing) + 1` on creation.
    pub id: ContractId,

    /// Role or engagement title. Required, non-empty.
    pub title: String,

    /// Employer or agency on the other side of the engagement.
    pub company: String,

    /// The person this engagement belongs to.
    pub client_name: String,

    /// Direct employment vs client/agency engagement.
    #[serde(default)]
    pub contract_type: ContractType,

    /// First day of the engagement. UTC calendar date.
    pub start_date: NaiveDate,

    /// Last day of the engagement. UTC calendar date; drives status.
    pub end_date: NaiveDate,

    /// Compensation amount in rupees. Stored unit-less; the briefing
    /// layer renders it with INR digit grouping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,

    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Set once at creation, never updated.
    pub created_at: DateTime<Utc>,
}

/// Two engagement flavours
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// A person's own employment contract.
    #[default]
    Individual,

    /// An engagement managed on behalf of a client.
    Client,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Individual => "individual",
            ContractType::Client => "client",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived lifecycle state of a contract
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    /// More than 30 days remain.
    Active,

    /// 30 or fewer days remain, including ending today.
    Expiring,

    /// The end date has passed.
    Expired,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Active => "active",
            ContractStatus::Expiring => "expiring",
            ContractStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contract paired with its freshly derived status.
///
/// Every read path (handlers, alerts, briefing) goes through this, so a
/// stale status can never be observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractView {
    #[serde(flatten)]
    pub contract: Contract,
    pub status: ContractStatus,
    pub days_remaining: i64,
}

impl ContractView {
    pub fn derive(contract: Contract, today: NaiveDate) -> Self {
        let days_remaining = crate::status::days_remaining(contract.end_date, today);
        let status = crate::status::derive_status(contract.end_date, today);
        Self {
            contract,
            status,
            days_remaining,
        }
    }
}

/// Creation payload. Everything optional at the boundary so presence
/// validation happens in the store with a field-level error, not as a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractDraft {
    pub title: Option<String>,
    pub company: Option<String>,
    pub client_name: Option<String>,
    pub contract_type: Option<ContractType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub notes: Option<String>,
}

/// Partial update payload. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub client_name: Option<String>,
    pub contract_type: Option<ContractType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub notes: Option<String>,
}

/// One chat turn: the user's message and the assistant's reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exchange {
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub bot: String,
}
