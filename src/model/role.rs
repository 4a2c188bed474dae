use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    /// Numeric form carried inside JWT claims.
    pub fn as_id(self) -> u8 {
        match self {
            Role::Employee => 1,
            Role::Manager => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Employee),
            2 => Some(Role::Manager),
            _ => None,
        }
    }
}
