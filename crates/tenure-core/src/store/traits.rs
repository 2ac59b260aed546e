use crate::error::Result;
use crate::types::{Contract, ContractDraft, ContractId, ContractPatch, Exchange};
use chrono::NaiveDate;

/// Storage contract for the tracked engagement collection
pub trait ContractStore: Send + Sync {
    /// List all contracts in insertion order
    fn list(&self) -> Result<Vec<Contract>>;

    /// Retrieve a contract by id
    fn get(&self, id: ContractId) -> Result<Option<Contract>>;

    /// Validate and persist a new contract, assigning the next id
    fn create(&self, draft: ContractDraft) -> Result<Contract>;

    /// Shallow-merge `patch` over the stored record
    fn update(&self, id: ContractId, patch: ContractPatch) -> Result<Contract>;

    /// Remove a contract. Deleting an unknown id is a successful no-op.
    fn delete(&self, id: ContractId) -> Result<()>;

    /// Case-insensitive substring match over title, company, client name,
    /// or derived status name. OR semantics across fields.
    fn search(&self, term: &str, today: NaiveDate) -> Result<Vec<Contract>>;
}

/// Storage contract for chat histories
pub trait SessionStore: Send + Sync {
    /// Append an exchange, creating the session if absent
    fn append(&self, session_id: &str, exchange: Exchange) -> Result<()>;

    /// Retrieve a session's exchanges in insertion order
    fn get(&self, session_id: &str) -> Result<Option<Vec<Exchange>>>;
}
