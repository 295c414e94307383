use std::str::FromStr;
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use transfer_scheduler_core::errors::Error as CoreError;
use transfer_scheduler_core::transfers::{
    NewTransfer, ScheduledTransfer, TransferError, TransferQuote,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteParams {
    amount: Option<String>,
    execution_date: Option<String>,
}

#[derive(Deserialize)]
struct DateRangeParams {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountTransferCount {
    source_account: String,
    count: i64,
}

fn parse_date(value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| CoreError::from(e).into())
}

fn required_date(value: Option<String>, name: &str) -> ApiResult<NaiveDate> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(&v),
        _ => Err(ApiError::BadRequest(format!(
            "Query parameter '{}' is required",
            name
        ))),
    }
}

fn optional_non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// An empty or `null` body is reported as a missing payload by the scheduling rules.
async fn schedule_transfer(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ScheduledTransfer>)> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<Option<NewTransfer>>(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid transfer payload: {}", e)))?
    };
    let request = request.ok_or_else(|| CoreError::from(TransferError::MissingPayload))?;

    let created = state.transfer_service.schedule_transfer(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn quote_fee(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuoteParams>,
) -> ApiResult<Json<TransferQuote>> {
    let amount = optional_non_blank(params.amount)
        .map(|v| Decimal::from_str(v.trim()).map_err(CoreError::from))
        .transpose()?;
    let execution_date = optional_non_blank(params.execution_date)
        .map(|v| parse_date(&v))
        .transpose()?;

    let quote = state.transfer_service.quote_fee(amount, execution_date)?;
    Ok(Json(quote))
}

async fn list_transfers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ScheduledTransfer>>> {
    let transfers = state.transfer_service.list_transfers()?;
    Ok(Json(transfers))
}

async fn get_transfer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ScheduledTransfer>> {
    let transfer = state.transfer_service.get_transfer(&id)?;
    Ok(Json(transfer))
}

async fn list_by_source_account(
    Path(account): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ScheduledTransfer>>> {
    let transfers = state.transfer_service.list_by_source_account(&account)?;
    Ok(Json(transfers))
}

async fn count_by_source_account(
    Path(account): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AccountTransferCount>> {
    let count = state.transfer_service.count_by_source_account(&account)?;
    Ok(Json(AccountTransferCount {
        source_account: account,
        count,
    }))
}

async fn list_scheduled_between(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeParams>,
) -> ApiResult<Json<Vec<ScheduledTransfer>>> {
    let from = required_date(params.from, "from")?;
    let to = required_date(params.to, "to")?;
    let transfers = state.transfer_service.list_scheduled_between(from, to)?;
    Ok(Json(transfers))
}

async fn list_executing_between(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeParams>,
) -> ApiResult<Json<Vec<ScheduledTransfer>>> {
    let from = required_date(params.from, "from")?;
    let to = required_date(params.to, "to")?;
    let transfers = state.transfer_service.list_executing_between(from, to)?;
    Ok(Json(transfers))
}

async fn list_by_execution_date(
    Path(date): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ScheduledTransfer>>> {
    let execution_date = parse_date(&date)?;
    let transfers = state
        .transfer_service
        .list_by_execution_date(execution_date)?;
    Ok(Json(transfers))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transfers", get(list_transfers).post(schedule_transfer))
        .route("/transfers/quote", get(quote_fee))
        .route("/transfers/scheduled", get(list_scheduled_between))
        .route("/transfers/executing", get(list_executing_between))
        .route("/transfers/executing/{date}", get(list_by_execution_date))
        .route("/transfers/account/{account}", get(list_by_source_account))
        .route(
            "/transfers/account/{account}/count",
            get(count_by_source_account),
        )
        .route("/transfers/{id}", get(get_transfer))
}
