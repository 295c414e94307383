use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use transfer_scheduler_core::errors::{DatabaseError, Error as CoreError};
use transfer_scheduler_core::fees::FeeError;
use transfer_scheduler_core::transfers::TransferError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    error: &'static str,
    message: String,
}

fn transfer_error_kind(err: &TransferError) -> (StatusCode, &'static str) {
    match err {
        TransferError::MissingPayload => (StatusCode::BAD_REQUEST, "MISSING_PAYLOAD"),
        TransferError::MissingAccount { .. } => (StatusCode::BAD_REQUEST, "MISSING_ACCOUNT"),
        TransferError::InvalidAccount { .. } => (StatusCode::BAD_REQUEST, "INVALID_ACCOUNT"),
        TransferError::SameAccount => (StatusCode::BAD_REQUEST, "SAME_ACCOUNT"),
        TransferError::InvalidAmount => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
        TransferError::AmountPrecision => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT_PRECISION"),
        TransferError::InvalidDate => (StatusCode::BAD_REQUEST, "INVALID_DATE"),
        TransferError::SchedulingRejected(_) => (StatusCode::BAD_REQUEST, "SCHEDULING_REJECTED"),
        TransferError::TransferNotAllowed { .. } => {
            (StatusCode::BAD_REQUEST, "TRANSFER_NOT_ALLOWED")
        }
        TransferError::NotFound(_) => (StatusCode::NOT_FOUND, "TRANSFER_NOT_FOUND"),
        TransferError::InvalidRange { .. } => (StatusCode::BAD_REQUEST, "INVALID_RANGE"),
    }
}

fn fee_error_kind(err: &FeeError) -> (StatusCode, &'static str) {
    match err {
        FeeError::InvalidAmount => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
        FeeError::BelowMinimumAmount { .. } => (StatusCode::BAD_REQUEST, "BELOW_MINIMUM_AMOUNT"),
        FeeError::RuleRejectsTransfer => (StatusCode::BAD_REQUEST, "RULE_REJECTS_TRANSFER"),
        FeeError::NoApplicableRule { .. } => (StatusCode::BAD_REQUEST, "NO_APPLICABLE_RULE"),
        // A rule was reached outside its own range: a server-side defect.
        FeeError::InapplicableRule { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INAPPLICABLE_RULE")
        }
    }
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Transfer(t) => transfer_error_kind(t),
                CoreError::Fee(f) => fee_error_kind(f),
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                CoreError::Database(DatabaseError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            },
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            error: kind,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
