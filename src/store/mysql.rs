use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveRequestDetail, LeaveStatus, LeaveType};
use crate::store::{NewLeaveRequest, RequestStore, StoreError};

const DETAIL_SELECT: &str = r#"
    SELECT
        r.id, r.employee_id, r.leave_type, r.start_date, r.end_date,
        r.days, r.status, r.processed_by, r.created_at, r.updated_at,
        e.name AS requester_name,
        e.email AS requester_email,
        p.name AS processor_name
    FROM leave_requests r
    JOIN employees e ON e.id = r.employee_id
    LEFT JOIN employees p ON p.id = r.processed_by
"#;

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl RequestStore for MySqlStore {
    async fn insert_request(&self, new: NewLeaveRequest) -> Result<LeaveRequest, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (employee_id, leave_type, start_date, end_date, days, status)
            VALUES (?, ?, ?, ?, ?, 'PENDING')
            "#,
        )
        .bind(new.employee_id)
        .bind(new.leave_type)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.days)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        let id = result.last_insert_id();
        self.fetch_request(id)
            .await?
            .ok_or_else(|| StoreError::Unavailable(format!("inserted request {id} not readable")))
    }

    async fn fetch_request(&self, id: u64) -> Result<Option<LeaveRequest>, StoreError> {
        sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, employee_id, leave_type, start_date, end_date,
                   days, status, processed_by, created_at, updated_at
            FROM leave_requests
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)
    }

    async fn fetch_detail(&self, id: u64) -> Result<Option<LeaveRequestDetail>, StoreError> {
        let sql = format!("{DETAIL_SELECT} WHERE r.id = ?");
        sqlx::query_as::<_, LeaveRequestDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)
    }

    async fn list_requests(
        &self,
        employee: Option<u64>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequestDetail>, StoreError> {
        let mut sql = format!("{DETAIL_SELECT} WHERE 1=1");
        if employee.is_some() {
            sql.push_str(" AND r.employee_id = ?");
        }
        if status.is_some() {
            sql.push_str(" AND r.status = ?");
        }
        sql.push_str(" ORDER BY r.created_at DESC, r.id DESC");

        let mut query = sqlx::query_as::<_, LeaveRequestDetail>(&sql);
        if let Some(employee_id) = employee {
            query = query.bind(employee_id);
        }
        if let Some(status) = status {
            query = query.bind(status);
        }

        query.fetch_all(&self.pool).await.map_err(unavailable)
    }

    async fn fetch_employee(&self, id: u64) -> Result<Option<Employee>, StoreError> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, role, vacation_balance, sick_balance, email, created_at
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)
    }

    async fn mark_decided(
        &self,
        id: u64,
        status: LeaveStatus,
        decider_id: u64,
    ) -> Result<bool, StoreError> {
        // Conditional on PENDING: of two racing deciders exactly one matches.
        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET status = ?, processed_by = ?, updated_at = NOW()
            WHERE id = ? AND status = 'PENDING'
            "#,
        )
        .bind(status)
        .bind(decider_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(result.rows_affected() > 0)
    }

    async fn debit_balance(
        &self,
        employee_id: u64,
        leave_type: LeaveType,
        days: i32,
    ) -> Result<bool, StoreError> {
        let column = match leave_type {
            LeaveType::Vacation => "vacation_balance",
            LeaveType::Sick => "sick_balance",
        };
        // Delta against the stored value, serialized by the row lock; a stale
        // in-memory balance can never overwrite a concurrent approval.
        let sql = format!(
            "UPDATE employees SET {column} = {column} - ? WHERE id = ? AND {column} >= ?"
        );

        let result = sqlx::query(&sql)
            .bind(days)
            .bind(employee_id)
            .bind(days)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(result.rows_affected() > 0)
    }
}
