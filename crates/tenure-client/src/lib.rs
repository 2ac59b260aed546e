//! Rust client for the Tenure contract tracking server.
//!
//! Thin wrapper over the JSON HTTP API with ergonomic convenience methods.
//!
//! # Example
//! ```rust,no_run
//! use tenure_client::TenureClient;
//! use tenure_core::ContractDraft;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TenureClient::new("http://localhost:8088");
//!
//!     let created = client.create_contract(ContractDraft {
//!         title: Some("Quality Assurance".into()),
//!         company: Some("Initech".into()),
//!         client_name: Some("Priya Sharma".into()),
//!         start_date: Some("2025-01-01".parse()?),
//!         end_date: Some("2025-12-31".parse()?),
//!         ..Default::default()
//!     }).await?;
//!
//!     let alerts = client.alerts().await?;
//!     let answer = client.chat("Who is on the Initech contract?", None).await?;
//!
//!     println!("Created contract {}", created.contract.id);
//!     println!("{} alerts", alerts.len());
//!     println!("{}", answer.response);
//!     Ok(())
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tenure_core::{Alert, ContractDraft, ContractId, ContractPatch, ContractView, Exchange};

/// A client bound to one Tenure server.
pub struct TenureClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ContractsEnvelope {
    contracts: Vec<ContractView>,
}

#[derive(Deserialize)]
struct CreateEnvelope {
    contract: ContractView,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    results: Vec<ContractView>,
}

#[derive(Deserialize)]
struct AlertsEnvelope {
    alerts: Vec<Alert>,
}

/// One chat round trip as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub chat_id: String,
    pub timestamp: DateTime<Utc>,
}

/// A session's stored history.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistory {
    pub chat_id: String,
    pub messages: Vec<Exchange>,
}

impl TenureClient {
    /// Bind to a server. `base_url` is e.g. `"http://localhost:8088"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Extract the server's error envelope on non-success responses.
    async fn check(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body: serde_json::Value = resp.json().await.unwrap_or_default();
        let err = body["error"].as_str().unwrap_or("unknown error");
        anyhow::bail!("{} ({})", err, status)
    }

    /// List all contracts with freshly derived status.
    pub async fn list_contracts(&self) -> anyhow::Result<Vec<ContractView>> {
        let resp = self
            .http
            .get(format!("{}/api/contracts", self.base_url))
            .send()
            .await?;
        let env: ContractsEnvelope = Self::check(resp).await?.json().await?;
        Ok(env.contracts)
    }

    /// Create a contract. Fails with the server's field-level hint when a
    /// required field is missing.
    pub async fn create_contract(&self, draft: ContractDraft) -> anyhow::Result<ContractView> {
        let resp = self
            .http
            .post(format!("{}/api/contracts", self.base_url))
            .json(&draft)
            .send()
            .await?;
        let env: CreateEnvelope = Self::check(resp).await?.json().await?;
        Ok(env.contract)
    }

    /// Get a contract by id. Returns `None` if not found.
    pub async fn get_contract(&self, id: ContractId) -> anyhow::Result<Option<ContractView>> {
        let resp = self
            .http
            .get(format!("{}/api/contracts/{}", self.base_url, id))
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::check(resp).await?.json().await?))
    }

    /// Partially update a contract.
    pub async fn update_contract(
        &self,
        id: ContractId,
        patch: ContractPatch,
    ) -> anyhow::Result<ContractView> {
        let resp = self
            .http
            .put(format!("{}/api/contracts/{}", self.base_url, id))
            .json(&patch)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Delete a contract. Succeeds whether or not the id existed.
    pub async fn delete_contract(&self, id: ContractId) -> anyhow::Result<()> {
        let resp = self
            .http
            .delete(format!("{}/api/contracts/{}", self.base_url, id))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Case-insensitive search over title, company, client name, and status.
    pub async fn search(&self, query: &str) -> anyhow::Result<Vec<ContractView>> {
        let resp = self
            .http
            .post(format!("{}/api/search", self.base_url))
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        let env: SearchEnvelope = Self::check(resp).await?.json().await?;
        Ok(env.results)
    }

    /// Current expiry alerts.
    pub async fn alerts(&self) -> anyhow::Result<Vec<Alert>> {
        let resp = self
            .http
            .get(format!("{}/api/alerts", self.base_url))
            .send()
            .await?;
        let env: AlertsEnvelope = Self::check(resp).await?.json().await?;
        Ok(env.alerts)
    }

    /// One chat round trip. Pass `chat_id` to continue an existing session;
    /// the server generates one otherwise.
    pub async fn chat(&self, message: &str, chat_id: Option<&str>) -> anyhow::Result<ChatReply> {
        let resp = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&serde_json::json!({ "message": message, "chat_id": chat_id }))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// A session's history. Returns `None` if the session is unknown.
    pub async fn history(&self, chat_id: &str) -> anyhow::Result<Option<ChatHistory>> {
        let resp = self
            .http
            .get(format!("{}/api/chat/history/{}", self.base_url, chat_id))
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::check(resp).await?.json().await?))
    }
}
