//! Leave request lifecycle engine. Owns every state transition and balance
//! invariant; the HTTP layer only maps DTOs in and errors out, and the store
//! only performs the row-level writes the engine asks for.

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::error::LifecycleError;
use crate::model::employee::Employee;
use crate::model::leave_request::{
    LeaveRequest, LeaveRequestDetail, LeaveStatus, LeaveType, StatusFilter,
};
use crate::model::role::Role;
use crate::store::{NewLeaveRequest, RequestStore};

/// Outcome of a manager decision.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn status(self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Reject => LeaveStatus::Rejected,
        }
    }
}

/// Policy switches left open by the product: whether managers may submit
/// leave for themselves.
#[derive(Debug, Copy, Clone, Default)]
pub struct EnginePolicy {
    pub manager_self_submit: bool,
}

pub struct LifecycleEngine<S> {
    store: S,
    policy: EnginePolicy,
}

impl<S: RequestStore> LifecycleEngine<S> {
    pub fn new(store: S, policy: EnginePolicy) -> Self {
        Self { store, policy }
    }

    /// Creates a PENDING request for the acting employee. The balance is
    /// checked against the requester's submission-time state; nothing is
    /// debited until approval.
    pub async fn submit(
        &self,
        requester: &Employee,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        days: i32,
    ) -> Result<LeaveRequest, LifecycleError> {
        match requester.role {
            Role::Employee => {}
            Role::Manager if self.policy.manager_self_submit => {}
            Role::Manager => {
                return Err(LifecycleError::Forbidden(
                    "Managers may not submit leave requests",
                ));
            }
        }

        let available = requester.balance(leave_type);
        if days < 1 || days > available {
            debug!(
                employee_id = requester.id,
                %leave_type,
                days,
                available,
                "leave submission rejected for insufficient balance"
            );
            return Err(LifecycleError::InsufficientBalance {
                leave_type,
                available,
                requested: days,
            });
        }

        let created = self
            .store
            .insert_request(NewLeaveRequest {
                employee_id: requester.id,
                leave_type,
                start_date,
                end_date,
                days,
            })
            .await?;

        info!(
            request_id = created.id,
            employee_id = requester.id,
            %leave_type,
            days,
            "leave request submitted"
        );
        Ok(created)
    }

    /// Applies a manager decision exactly once. The status write is
    /// conditional on the stored row still being PENDING, so of two racing
    /// deciders one wins and the other observes `AlreadyProcessed`. Approval
    /// then debits the requester's fresh balance.
    pub async fn decide(
        &self,
        decider: &Employee,
        request_id: u64,
        decision: Decision,
    ) -> Result<LeaveRequest, LifecycleError> {
        if decider.role != Role::Manager {
            return Err(LifecycleError::Forbidden(
                "Only managers may decide leave requests",
            ));
        }

        let request = self
            .store
            .fetch_request(request_id)
            .await?
            .ok_or(LifecycleError::NotFound)?;
        if request.status != LeaveStatus::Pending {
            return Err(LifecycleError::AlreadyProcessed);
        }

        let won = self
            .store
            .mark_decided(request_id, decision.status(), decider.id)
            .await?;
        if !won {
            // Another decider got there between our read and the update.
            return Err(LifecycleError::AlreadyProcessed);
        }

        if decision == Decision::Approve {
            self.apply_debit(&request).await?;
        }

        info!(
            request_id,
            decider_id = decider.id,
            outcome = %decision.status(),
            "leave request decided"
        );

        self.store
            .fetch_request(request_id)
            .await?
            .ok_or(LifecycleError::NotFound)
    }

    /// Single joined request. Employees may only fetch their own.
    pub async fn get(
        &self,
        viewer: &Employee,
        request_id: u64,
    ) -> Result<LeaveRequestDetail, LifecycleError> {
        let detail = self
            .store
            .fetch_detail(request_id)
            .await?
            .ok_or(LifecycleError::NotFound)?;
        if viewer.role != Role::Manager && detail.employee_id != viewer.id {
            return Err(LifecycleError::Forbidden(
                "You may only view your own leave requests",
            ));
        }
        Ok(detail)
    }

    /// Requests visible to the viewer, most recent first. Managers see every
    /// employee's requests; employees only their own, whatever the filter.
    pub async fn list(
        &self,
        viewer: &Employee,
        filter: StatusFilter,
    ) -> Result<Vec<LeaveRequestDetail>, LifecycleError> {
        let scope = match viewer.role {
            Role::Manager => None,
            Role::Employee => Some(viewer.id),
        };
        Ok(self.store.list_requests(scope, filter.status()).await?)
    }

    /// The status write has committed; the debit must follow. A transient
    /// store failure is retried once, anything else leaves the request
    /// APPROVED-but-undebited and is surfaced as `PartialApply` for operator
    /// reconciliation.
    async fn apply_debit(&self, request: &LeaveRequest) -> Result<(), LifecycleError> {
        let mut reason = String::new();
        for attempt in 0..2 {
            match self
                .store
                .debit_balance(request.employee_id, request.leave_type, request.days)
                .await
            {
                Ok(true) => return Ok(()),
                Ok(false) => {
                    // The fresh balance no longer covers the debit; a retry
                    // cannot change that.
                    reason = "balance no longer covers the requested days".into();
                    break;
                }
                Err(err) if attempt == 0 => {
                    warn!(
                        request_id = request.id,
                        error = %err,
                        "balance debit failed, retrying once"
                    );
                    reason = err.to_string();
                }
                Err(err) => {
                    reason = err.to_string();
                }
            }
        }

        error!(
            request_id = request.id,
            employee_id = request.employee_id,
            leave_type = %request.leave_type,
            days = request.days,
            reason = %reason,
            "approved leave request left undebited; manual reconciliation required"
        );
        Err(LifecycleError::PartialApply {
            request_id: request.id,
            reason,
        })
    }
}
