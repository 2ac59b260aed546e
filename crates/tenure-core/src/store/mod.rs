mod json;
mod traits;

pub use json::{JsonContractStore, JsonSessionStore};
pub use traits::{ContractStore, SessionStore};
