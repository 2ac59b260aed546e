use super::{AppResult, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tenure_core::{
    generate_alerts, render_briefing, Alert, ContractDraft, ContractId, ContractPatch,
    ContractStore, ContractView, Exchange, SessionStore, TenureError,
};
use uuid::Uuid;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contracts", get(list_contracts).post(create_contract))
        .route(
            "/api/contracts/:id",
            get(get_contract).put(update_contract).delete(delete_contract),
        )
        .route("/api/search", post(search_contracts))
        .route("/api/alerts", get(alerts))
        .route("/api/chat", post(chat))
        .route("/api/chat/history/:chat_id", get(chat_history))
        .with_state(state)
}

/// Status is a function of the end date and the current UTC day; every
/// handler derives it here, never from stored state.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn derive_all(contracts: Vec<tenure_core::Contract>, today: NaiveDate) -> Vec<ContractView> {
    contracts
        .into_iter()
        .map(|c| ContractView::derive(c, today))
        .collect()
}

#[derive(Serialize)]
struct HealthResponse {
    healthy: bool,
    version: String,
    uptime_seconds: u64,
    contracts: usize,
    sessions: usize,
}

async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        contracts: state.contracts.count()?,
        sessions: state.sessions.count()?,
    }))
}

#[derive(Serialize)]
struct ContractsResponse {
    contracts: Vec<ContractView>,
}

async fn list_contracts(State(state): State<AppState>) -> AppResult<Json<ContractsResponse>> {
    let contracts = derive_all(state.contracts.list()?, today());
    Ok(Json(ContractsResponse { contracts }))
}

#[derive(Serialize)]
struct CreateContractResponse {
    message: String,
    contract: ContractView,
    success: bool,
}

async fn create_contract(
    State(state): State<AppState>,
    Json(draft): Json<ContractDraft>,
) -> AppResult<impl IntoResponse> {
    let created = state.contracts.create(draft)?;
    let view = ContractView::derive(created, today());
    Ok((
        StatusCode::CREATED,
        Json(CreateContractResponse {
            message: format!("Contract '{}' added", view.contract.title),
            contract: view,
            success: true,
        }),
    ))
}

async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<ContractId>,
) -> AppResult<Json<ContractView>> {
    let contract = state
        .contracts
        .get(id)?
        .ok_or(TenureError::ContractNotFound(id))?;
    Ok(Json(ContractView::derive(contract, today())))
}

async fn update_contract(
    State(state): State<AppState>,
    Path(id): Path<ContractId>,
    Json(patch): Json<ContractPatch>,
) -> AppResult<Json<ContractView>> {
    let updated = state.contracts.update(id, patch)?;
    Ok(Json(ContractView::derive(updated, today())))
}

#[derive(Serialize)]
struct DeleteContractResponse {
    message: String,
    success: bool,
}

async fn delete_contract(
    State(state): State<AppState>,
    Path(id): Path<ContractId>,
) -> AppResult<Json<DeleteContractResponse>> {
    // Deleting an unknown id is a success: the end state is identical.
    state.contracts.delete(id)?;
    Ok(Json(DeleteContractResponse {
        message: format!("Contract {} deleted", id),
        success: true,
    }))
}

#[derive(Deserialize)]
struct SearchBody {
    query: String,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<ContractView>,
    count: usize,
}

async fn search_contracts(
    State(state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> AppResult<Json<SearchResponse>> {
    let now = today();
    let results = derive_all(state.contracts.search(&body.query, now)?, now);
    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}

#[derive(Serialize)]
struct AlertsResponse {
    alerts: Vec<Alert>,
    count: usize,
}

async fn alerts(State(state): State<AppState>) -> AppResult<Json<AlertsResponse>> {
    let alerts = generate_alerts(&state.contracts.list()?, today());
    Ok(Json(AlertsResponse {
        count: alerts.len(),
        alerts,
    }))
}

#[derive(Deserialize)]
struct ChatBody {
    message: String,
    chat_id: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    chat_id: String,
    timestamp: DateTime<Utc>,
}

async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> AppResult<Json<ChatResponse>> {
    if body.message.trim().is_empty() {
        return Err(TenureError::Validation("message").into());
    }

    let views = derive_all(state.contracts.list()?, today());
    let briefing = render_briefing(&views);
    let reply = state.llm.ask(&briefing, &body.message).await?;

    let chat_id = body
        .chat_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let timestamp = Utc::now();
    state.sessions.append(
        &chat_id,
        Exchange {
            timestamp,
            user: body.message,
            bot: reply.clone(),
        },
    )?;

    Ok(Json(ChatResponse {
        response: reply,
        chat_id,
        timestamp,
    }))
}

#[derive(Serialize)]
struct HistoryResponse {
    chat_id: String,
    messages: Vec<Exchange>,
}

async fn chat_history(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> AppResult<Json<HistoryResponse>> {
    let messages = state
        .sessions
        .get(&chat_id)?
        .ok_or_else(|| TenureError::SessionNotFound(chat_id.clone()))?;
    Ok(Json(HistoryResponse { chat_id, messages }))
}
