use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::model::leave_request::LeaveType;
use crate::store::StoreError;

/// Lifecycle errors returned by every engine operation. These cross the
/// presentation boundary as values, never as panics; one `ResponseError`
/// impl turns them into JSON responses.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Insufficient balance. You have {available} {} days available.", .leave_type.noun())]
    InsufficientBalance {
        leave_type: LeaveType,
        available: i32,
        requested: i32,
    },

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Leave request already processed")]
    AlreadyProcessed,

    /// Request is APPROVED but its balance debit did not commit. Requires
    /// operator reconciliation, not user retry; logged at ERROR by the engine.
    #[error("Leave request {request_id} approved but balance not debited: {reason}")]
    PartialApply { request_id: u64, reason: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found")]
    NotFound,
}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => LifecycleError::StoreUnavailable(reason),
        }
    }
}

impl ResponseError for LifecycleError {
    fn status_code(&self) -> StatusCode {
        match self {
            LifecycleError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
            LifecycleError::Forbidden(_) => StatusCode::FORBIDDEN,
            LifecycleError::AlreadyProcessed => StatusCode::CONFLICT,
            LifecycleError::PartialApply { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            LifecycleError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LifecycleError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
