//! JSON document stores.
//!
//! Each store is one JSON document on disk, rewritten whole on every
//! mutation. The read-modify-write cycle is serialized behind a
//! `std::sync::Mutex`, so two in-process writers can never lose an update
//! to each other. Writers in other processes are not protected.
//!
//! A missing file reads as the empty default. A file that exists but fails
//! to parse is an error: silently treating corrupt data as "no data" would
//! turn a transient read failure into an apparent wipe.

use super::traits::{ContractStore, SessionStore};
use crate::error::{Result, TenureError};
use crate::status::derive_status;
use crate::types::{Contract, ContractDraft, ContractId, ContractPatch, Exchange};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write via a temp sibling + rename so readers never see a half-written
/// document.
fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TenureError::Validation(field)),
    }
}

/// Contract collection persisted as a single JSON array.
pub struct JsonContractStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonContractStore {
    /// Open the store, creating an empty document when the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        if !path.exists() {
            save(&path, &Vec::<Contract>::new())?;
            info!("Created contract store at {:?}", path);
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored contracts.
    pub fn count(&self) -> Result<usize> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.load()?.len())
    }

    fn load(&self) -> Result<Vec<Contract>> {
        load_or_default(&self.path)
    }
}

impl ContractStore for JsonContractStore {
    fn list(&self) -> Result<Vec<Contract>> {
        let _guard = self.lock.lock().unwrap();
        self.load()
    }

    fn get(&self, id: ContractId) -> Result<Option<Contract>> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.load()?.into_iter().find(|c| c.id == id))
    }

    fn create(&self, draft: ContractDraft) -> Result<Contract> {
        let title = required("title", draft.title)?;
        let company = required("company", draft.company)?;
        let client_name = required("client_name", draft.client_name)?;
        let start_date = draft
            .start_date
            .ok_or(TenureError::Validation("start_date"))?;
        let end_date = draft.end_date.ok_or(TenureError::Validation("end_date"))?;
        if draft.salary.is_some_and(|s| s < 0.0) {
            return Err(TenureError::Validation("salary"));
        }

        let _guard = self.lock.lock().unwrap();
        let mut contracts = self.load()?;
        let id = contracts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let contract = Contract {
            id,
            title,
            company,
            client_name,
            contract_type: draft.contract_type.unwrap_or_default(),
            start_date,
            end_date,
            salary: draft.salary,
            notes: draft.notes,
            created_at: Utc::now(),
        };
        contracts.push(contract.clone());
        save(&self.path, &contracts)?;
        Ok(contract)
    }

    fn update(&self, id: ContractId, patch: ContractPatch) -> Result<Contract> {
        let _guard = self.lock.lock().unwrap();
        let mut contracts = self.load()?;
        let slot = contracts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TenureError::ContractNotFound(id))?;

        if let Some(title) = patch.title {
            slot.title = title;
        }
        if let Some(company) = patch.company {
            slot.company = company;
        }
        if let Some(client_name) = patch.client_name {
            slot.client_name = client_name;
        }
        if let Some(contract_type) = patch.contract_type {
            slot.contract_type = contract_type;
        }
        if let Some(start_date) = patch.start_date {
            slot.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            slot.end_date = end_date;
        }
        if let Some(salary) = patch.salary {
            slot.salary = Some(salary);
        }
        if let Some(notes) = patch.notes {
            slot.notes = Some(notes);
        }
        // created_at is immutable; no patch field exists for it.

        let updated = slot.clone();
        save(&self.path, &contracts)?;
        Ok(updated)
    }

    fn delete(&self, id: ContractId) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut contracts = self.load()?;
        let before = contracts.len();
        contracts.retain(|c| c.id != id);
        if contracts.len() != before {
            save(&self.path, &contracts)?;
        }
        Ok(())
    }

    fn search(&self, term: &str, today: NaiveDate) -> Result<Vec<Contract>> {
        let needle = term.to_lowercase();
        let _guard = self.lock.lock().unwrap();
        Ok(self
            .load()?
            .into_iter()
            .filter(|c| {
                c.title.to_lowercase().contains(&needle)
                    || c.company.to_lowercase().contains(&needle)
                    || c.client_name.to_lowercase().contains(&needle)
                    || derive_status(c.end_date, today).as_str().contains(&needle)
            })
            .collect())
    }
}

type SessionMap = BTreeMap<String, Vec<Exchange>>;

/// Chat histories persisted as a single JSON object keyed by session id.
pub struct JsonSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonSessionStore {
    /// Open the store, creating an empty document when the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        if !path.exists() {
            save(&path, &SessionMap::new())?;
            info!("Created session store at {:?}", path);
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored sessions.
    pub fn count(&self) -> Result<usize> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.load()?.len())
    }

    fn load(&self) -> Result<SessionMap> {
        load_or_default(&self.path)
    }
}

impl SessionStore for JsonSessionStore {
    fn append(&self, session_id: &str, exchange: Exchange) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut sessions = self.load()?;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .push(exchange);
        save(&self.path, &sessions)
    }

    fn get(&self, session_id: &str) -> Result<Option<Vec<Exchange>>> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.load()?.remove(session_id))
    }
}
