use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_request::LeaveType;
use crate::model::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Ana Silva",
        "role": "EMPLOYEE",
        "vacation_balance": 20,
        "sick_balance": 10,
        "email": "ana@company.com",
        "created_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Ana Silva")]
    pub name: String,

    pub role: Role,

    /// Remaining vacation days the employee may still request.
    #[schema(example = 20)]
    pub vacation_balance: i32,

    /// Remaining sick days the employee may still request.
    #[schema(example = 10)]
    pub sick_balance: i32,

    #[schema(example = "ana@company.com")]
    pub email: String,

    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Balance field selected by leave type.
    pub fn balance(&self, leave_type: LeaveType) -> i32 {
        match leave_type {
            LeaveType::Vacation => self.vacation_balance,
            LeaveType::Sick => self.sick_balance,
        }
    }
}
