use crate::types::{Contract, ContractId, ContractStatus, ContractView};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A notice for a contract that is expiring or has expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub contract_id: ContractId,
    pub title: String,
    pub company: String,
    pub end_date: NaiveDate,
    pub days_remaining: i64,
    pub status: ContractStatus,
    pub message: String,
}

/// Scan `contracts` and emit one alert per expiring or expired contract,
/// preserving input order.
pub fn generate_alerts(contracts: &[Contract], today: NaiveDate) -> Vec<Alert> {
    contracts
        .iter()
        .filter_map(|c| {
            let view = ContractView::derive(c.clone(), today);
            match view.status {
                ContractStatus::Active => None,
                ContractStatus::Expiring | ContractStatus::Expired => Some(Alert {
                    contract_id: view.contract.id,
                    title: view.contract.title.clone(),
                    company: view.contract.company.clone(),
                    end_date: view.contract.end_date,
                    days_remaining: view.days_remaining,
                    status: view.status,
                    message: alert_message(&view),
                }),
            }
        })
        .collect()
}

fn alert_message(view: &ContractView) -> String {
    let name = format!("'{}' with {}", view.contract.title, view.contract.company);
    match view.days_remaining {
        d if d < -1 => format!("Contract {} expired {} days ago.", name, -d),
        -1 => format!("Contract {} expired yesterday.", name),
        0 => format!("Contract {} ends today.", name),
        1 => format!("Contract {} expires tomorrow.", name),
        d => format!("Contract {} expires in {} days.", name, d),
    }
}
