//! Narrow contract over the persistence collaborator. No business rules live
//! here; the store only performs row-level reads and conditional writes.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveRequestDetail, LeaveStatus, LeaveType};

pub mod mysql;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
}

/// Fields of a request at insertion time. Status starts PENDING and
/// `processed_by` NULL; the store sets id and timestamps.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub employee_id: u64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i32,
}

#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Inserts a PENDING request and returns the stored row.
    async fn insert_request(&self, new: NewLeaveRequest) -> Result<LeaveRequest, StoreError>;

    async fn fetch_request(&self, id: u64) -> Result<Option<LeaveRequest>, StoreError>;

    async fn fetch_detail(&self, id: u64) -> Result<Option<LeaveRequestDetail>, StoreError>;

    /// Joined rows ordered by creation time, most recent first. `employee`
    /// scopes to a single requester, `status` to a single state.
    async fn list_requests(
        &self,
        employee: Option<u64>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequestDetail>, StoreError>;

    async fn fetch_employee(&self, id: u64) -> Result<Option<Employee>, StoreError>;

    /// Conditional decision write: updates status, `processed_by` and
    /// `updated_at` only while the row is still PENDING. Returns false when
    /// no row matched, i.e. the request was already decided (or is missing).
    async fn mark_decided(
        &self,
        id: u64,
        status: LeaveStatus,
        decider_id: u64,
    ) -> Result<bool, StoreError>;

    /// Applies the debit as a delta against the stored balance, conditional
    /// on the balance still covering it. Never a blind overwrite, so two
    /// concurrent approvals for the same employee cannot lose an update.
    /// Returns false when the fresh balance no longer covers `days`.
    async fn debit_balance(
        &self,
        employee_id: u64,
        leave_type: LeaveType,
        days: i32,
    ) -> Result<bool, StoreError>;
}
