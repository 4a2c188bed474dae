use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

use crate::api::leave_request::{LeaveListQuery, LeaveListResponse, SubmitLeave};
use crate::model::employee::Employee;
use crate::model::leave_request::{
    LeaveRequest, LeaveRequestDetail, LeaveStatus, LeaveType, StatusFilter,
};
use crate::model::role::Role;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave Management Service

Employees submit vacation and sick leave requests against their balances;
managers approve or reject them. Balances are debited exactly once, on
approval.

### Key Features
- **Leave Requests**
  - Submit a request against the current balance
  - Approve/reject with exactly-once decision semantics
  - List and inspect requests (managers see all, employees their own)
- **Profile**
  - Current employee profile with remaining balances

### Security
All `/api/v1` endpoints require **JWT Bearer authentication**.
Decisions are restricted to the **Manager** role.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::submit_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::me::me,
    ),
    components(
        schemas(
            Employee,
            Role,
            LeaveType,
            LeaveStatus,
            StatusFilter,
            LeaveRequest,
            LeaveRequestDetail,
            SubmitLeave,
            LeaveListQuery,
            LeaveListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave", description = "Leave request lifecycle APIs"),
        (name = "Profile", description = "Authenticated employee profile"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
