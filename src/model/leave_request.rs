use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum_macros::Display,
    strum_macros::EnumString,
    ToSchema,
)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LeaveType {
    Vacation,
    Sick,
}

impl LeaveType {
    /// Human-readable noun used in balance error messages.
    pub fn noun(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "vacation",
            LeaveType::Sick => "sick",
        }
    }
}

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum_macros::Display,
    strum_macros::EnumString,
    ToSchema,
)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Status filter accepted by the list endpoint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn status(self) -> Option<LeaveStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(LeaveStatus::Pending),
            StatusFilter::Approved => Some(LeaveStatus::Approved),
            StatusFilter::Rejected => Some(LeaveStatus::Rejected),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "leave_type": "VACATION",
        "start_date": "2026-02-02",
        "end_date": "2026-02-06",
        "days": 3,
        "status": "PENDING",
        "processed_by": null,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,

    /// Requesting employee; fixed for the lifetime of the request.
    #[schema(example = 1)]
    pub employee_id: u64,

    pub leave_type: LeaveType,

    #[schema(example = "2026-02-02", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    #[schema(example = "2026-02-06", format = "date", value_type = String)]
    pub end_date: NaiveDate,

    /// Debit amount; supplied by the requester, not derived from the dates.
    #[schema(example = 3)]
    pub days: i32,

    pub status: LeaveStatus,

    /// Deciding manager; NULL exactly while the request is pending.
    #[schema(example = json!(null), value_type = Option<u64>)]
    pub processed_by: Option<u64>,

    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,

    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub updated_at: DateTime<Utc>,
}

/// A leave request joined with its requester and, once decided, its processor.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequestDetail {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub employee_id: u64,
    pub leave_type: LeaveType,
    #[schema(example = "2026-02-02", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-02-06", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 3)]
    pub days: i32,
    pub status: LeaveStatus,
    #[schema(example = json!(null), value_type = Option<u64>)]
    pub processed_by: Option<u64>,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub updated_at: DateTime<Utc>,

    #[schema(example = "Ana Silva")]
    pub requester_name: String,
    #[schema(example = "ana@company.com")]
    pub requester_email: String,
    #[schema(example = json!(null), value_type = Option<String>)]
    pub processor_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_type_wire_form() {
        assert_eq!(serde_json::to_string(&LeaveType::Vacation).unwrap(), "\"VACATION\"");
        assert_eq!(LeaveType::Sick.to_string(), "SICK");
        assert_eq!(LeaveType::Vacation.noun(), "vacation");
    }

    #[test]
    fn status_wire_form() {
        assert_eq!(serde_json::to_string(&LeaveStatus::Pending).unwrap(), "\"PENDING\"");
        let status: LeaveStatus = serde_json::from_str("\"REJECTED\"").unwrap();
        assert_eq!(status, LeaveStatus::Rejected);
    }

    #[test]
    fn filter_maps_to_status() {
        assert_eq!(StatusFilter::All.status(), None);
        assert_eq!(StatusFilter::Pending.status(), Some(LeaveStatus::Pending));
        assert_eq!(StatusFilter::Approved.status(), Some(LeaveStatus::Approved));
        assert_eq!(StatusFilter::Rejected.status(), Some(LeaveStatus::Rejected));
    }

    #[test]
    fn filter_query_form_is_lowercase() {
        let filter: StatusFilter = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(filter, StatusFilter::Pending);
        assert_eq!(StatusFilter::default(), StatusFilter::All);
    }
}
