use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::api::{Engine, Resolver};
use crate::auth::auth::AuthUser;
use crate::engine::Decision;
use crate::error::LifecycleError;
use crate::model::leave_request::{
    LeaveRequest, LeaveRequestDetail, LeaveType, StatusFilter,
};

#[derive(Deserialize, ToSchema)]
pub struct SubmitLeave {
    #[schema(example = "VACATION")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-02-02", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2026-02-06", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    /// Days to debit on approval; not derived from the date range.
    #[schema(example = 3)]
    pub days: i32,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveListQuery {
    /// Filter by status; defaults to all.
    #[param(example = "pending")]
    pub status: Option<StatusFilter>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequestDetail>,
    #[schema(example = 1)]
    pub total: usize,
}

/* =========================
Submit leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = SubmitLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Invalid dates, days, or insufficient balance"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    auth: AuthUser,
    engine: web::Data<Engine>,
    resolver: web::Data<Resolver>,
    payload: web::Json<SubmitLeave>,
) -> Result<HttpResponse, LifecycleError> {
    if payload.start_date > payload.end_date {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "start_date cannot be after end_date"
        })));
    }
    if payload.days < 1 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "days must be at least 1"
        })));
    }

    let requester = resolver.resolve(&auth).await?;
    let created = engine
        .submit(
            &requester,
            payload.leave_type,
            payload.start_date,
            payload.end_date,
            payload.days,
        )
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/* =========================
Approve leave (Manager)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved, balance debited", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed"),
        (status = 500, description = "Approved but balance not debited; needs reconciliation")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    engine: web::Data<Engine>,
    resolver: web::Data<Resolver>,
    path: web::Path<u64>,
) -> Result<HttpResponse, LifecycleError> {
    let decider = resolver.resolve(&auth).await?;
    let updated = engine
        .decide(&decider, path.into_inner(), Decision::Approve)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave approved",
        "request": updated
    })))
}

/* =========================
Reject leave (Manager)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    engine: web::Data<Engine>,
    resolver: web::Data<Resolver>,
    path: web::Path<u64>,
) -> Result<HttpResponse, LifecycleError> {
    let decider = resolver.resolve(&auth).await?;
    let updated = engine
        .decide(&decider, path.into_inner(), Decision::Reject)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave rejected",
        "request": updated
    })))
}

/// Single leave request with requester and processor details.
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequestDetail),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    engine: web::Data<Engine>,
    resolver: web::Data<Resolver>,
    path: web::Path<u64>,
) -> Result<HttpResponse, LifecycleError> {
    let viewer = resolver.resolve(&auth).await?;
    let detail = engine.get(&viewer, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Leave requests visible to the caller, most recent first. Managers see
/// every employee's requests; employees only their own.
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveListQuery),
    responses(
        (status = 200, description = "Leave request list", body = LeaveListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    engine: web::Data<Engine>,
    resolver: web::Data<Resolver>,
    query: web::Query<LeaveListQuery>,
) -> Result<HttpResponse, LifecycleError> {
    let viewer = resolver.resolve(&auth).await?;
    let filter = query.status.unwrap_or_default();
    let data = engine.list(&viewer, filter).await?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        total: data.len(),
        data,
    }))
}
