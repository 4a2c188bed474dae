//! Maps an authenticated session to the domain employee it acts as. The
//! employee row is re-read on every call, so a revoked session or deleted
//! profile takes effect immediately and balances are never stale.

use crate::auth::auth::AuthUser;
use crate::error::LifecycleError;
use crate::model::employee::Employee;
use crate::store::RequestStore;

pub struct IdentityResolver<S> {
    store: S,
}

impl<S: RequestStore> IdentityResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Employee record (role and balances) for the authenticated user, or
    /// `NotFound` when no matching profile exists anymore.
    pub async fn resolve(&self, auth: &AuthUser) -> Result<Employee, LifecycleError> {
        self.store
            .fetch_employee(auth.employee_id)
            .await?
            .ok_or(LifecycleError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use crate::store::memory::MemoryStore;

    fn auth_for(employee: &Employee) -> AuthUser {
        AuthUser {
            user_id: 100,
            email: employee.email.clone(),
            role: employee.role,
            employee_id: employee.id,
        }
    }

    #[actix_web::test]
    async fn resolves_role_and_balances() {
        let store = MemoryStore::new();
        let ana = store.add_employee("Ana", Role::Employee, 10, 2);
        let resolver = IdentityResolver::new(store);

        let resolved = resolver.resolve(&auth_for(&ana)).await.unwrap();
        assert_eq!(resolved.id, ana.id);
        assert_eq!(resolved.role, Role::Employee);
        assert_eq!(resolved.vacation_balance, 10);
        assert_eq!(resolved.sick_balance, 2);
    }

    #[actix_web::test]
    async fn missing_profile_is_not_found() {
        let store = MemoryStore::new();
        let resolver = IdentityResolver::new(store);
        let auth = AuthUser {
            user_id: 100,
            email: "ghost@company.com".into(),
            role: Role::Employee,
            employee_id: 7,
        };
        let err = resolver.resolve(&auth).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound));
    }
}
