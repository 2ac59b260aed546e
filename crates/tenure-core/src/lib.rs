pub mod alerts;
pub mod briefing;
pub mod error;
pub mod status;
pub mod store;
pub mod types;

pub use alerts::{generate_alerts, Alert};
pub use briefing::render_briefing;
pub use error::{Result, TenureError};
pub use status::{days_remaining, derive_status};
pub use store::{ContractStore, JsonContractStore, JsonSessionStore, SessionStore};
pub use types::{
    Contract, ContractDraft, ContractId, ContractPatch, ContractStatus, ContractType,
    ContractView, Exchange,
};
