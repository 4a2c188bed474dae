//! In-memory `RequestStore` used by the engine tests. Mirrors the conditional
//! write semantics of the MySQL store and can inject debit failures.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveRequestDetail, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::store::{NewLeaveRequest, RequestStore, StoreError};

#[derive(Default)]
struct Inner {
    employees: HashMap<u64, Employee>,
    requests: HashMap<u64, LeaveRequest>,
    next_id: u64,
    // logical clock so created_at ordering is deterministic
    ticks: i64,
    fail_debits: u32,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_employee(&self, name: &str, role: Role, vacation: i32, sick: i32) -> Employee {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        inner.ticks += 1;
        let employee = Employee {
            id: inner.next_id,
            name: name.to_string(),
            role,
            vacation_balance: vacation,
            sick_balance: sick,
            email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
            created_at: tick_time(inner.ticks),
        };
        inner.employees.insert(employee.id, employee.clone());
        employee
    }

    pub fn employee(&self, id: u64) -> Employee {
        self.inner.lock().unwrap().employees[&id].clone()
    }

    pub fn request(&self, id: u64) -> LeaveRequest {
        self.inner.lock().unwrap().requests[&id].clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    /// The next `n` debit calls fail as if the store were unreachable.
    pub fn fail_next_debits(&self, n: u32) {
        self.inner.lock().unwrap().fail_debits = n;
    }
}

fn tick_time(ticks: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000 + ticks, 0).unwrap()
}

fn detail(inner: &Inner, request: &LeaveRequest) -> LeaveRequestDetail {
    let requester = &inner.employees[&request.employee_id];
    let processor_name = request
        .processed_by
        .and_then(|id| inner.employees.get(&id))
        .map(|e| e.name.clone());
    LeaveRequestDetail {
        id: request.id,
        employee_id: request.employee_id,
        leave_type: request.leave_type,
        start_date: request.start_date,
        end_date: request.end_date,
        days: request.days,
        status: request.status,
        processed_by: request.processed_by,
        created_at: request.created_at,
        updated_at: request.updated_at,
        requester_name: requester.name.clone(),
        requester_email: requester.email.clone(),
        processor_name,
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn insert_request(&self, new: NewLeaveRequest) -> Result<LeaveRequest, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        inner.ticks += 1;
        let now = tick_time(inner.ticks);
        let request = LeaveRequest {
            id: inner.next_id,
            employee_id: new.employee_id,
            leave_type: new.leave_type,
            start_date: new.start_date,
            end_date: new.end_date,
            days: new.days,
            status: LeaveStatus::Pending,
            processed_by: None,
            created_at: now,
            updated_at: now,
        };
        inner.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn fetch_request(&self, id: u64) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(self.inner.lock().unwrap().requests.get(&id).cloned())
    }

    async fn fetch_detail(&self, id: u64) -> Result<Option<LeaveRequestDetail>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.requests.get(&id).map(|r| detail(&inner, r)))
    }

    async fn list_requests(
        &self,
        employee: Option<u64>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequestDetail>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<LeaveRequestDetail> = inner
            .requests
            .values()
            .filter(|r| employee.is_none_or(|id| r.employee_id == id))
            .filter(|r| status.is_none_or(|s| r.status == s))
            .map(|r| detail(&inner, r))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn fetch_employee(&self, id: u64) -> Result<Option<Employee>, StoreError> {
        Ok(self.inner.lock().unwrap().employees.get(&id).cloned())
    }

    async fn mark_decided(
        &self,
        id: u64,
        status: LeaveStatus,
        decider_id: u64,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.ticks += 1;
        let now = tick_time(inner.ticks);
        match inner.requests.get_mut(&id) {
            Some(request) if request.status == LeaveStatus::Pending => {
                request.status = status;
                request.processed_by = Some(decider_id);
                request.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn debit_balance(
        &self,
        employee_id: u64,
        leave_type: LeaveType,
        days: i32,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_debits > 0 {
            inner.fail_debits -= 1;
            return Err(StoreError::Unavailable("injected debit failure".into()));
        }
        let Some(employee) = inner.employees.get_mut(&employee_id) else {
            return Ok(false);
        };
        let balance = match leave_type {
            LeaveType::Vacation => &mut employee.vacation_balance,
            LeaveType::Sick => &mut employee.sick_balance,
        };
        if *balance < days {
            return Ok(false);
        }
        *balance -= days;
        Ok(true)
    }
}
