use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::model::role::Role;

#[derive(Deserialize)]
pub struct RegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to EMPLOYEE when omitted.
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(FromRow)]
pub struct UserSql {
    pub id: u64,
    pub email: String,
    pub password: String,
    pub employee_id: u64,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String, // email
    pub role: u8,    // role id
    pub exp: usize,
    pub jti: String,

    pub token_type: TokenType,
    /// Employee profile this session acts as.
    pub employee_id: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
