use actix_web::{HttpResponse, web};

use crate::api::Resolver;
use crate::auth::auth::AuthUser;
use crate::error::LifecycleError;
use crate::model::employee::Employee;

/// Profile and remaining balances for the authenticated employee. Re-read
/// from the store on every call, so approvals show up immediately.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Employee profile with balances", body = Employee),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No matching employee profile")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profile"
)]
pub async fn me(
    auth: AuthUser,
    resolver: web::Data<Resolver>,
) -> Result<HttpResponse, LifecycleError> {
    let employee = resolver.resolve(&auth).await?;
    Ok(HttpResponse::Ok().json(employee))
}
