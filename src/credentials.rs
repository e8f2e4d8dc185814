use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{CredentialRecord, Role};

/// AuthError
///
/// Failure of a sign-in attempt. A single variant on purpose: the caller must not be able
/// to tell an unknown phone number from a wrong password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Telefon raqam yoki parol noto'g'ri")]
    InvalidCredentials,
}

/// Raised when a credential table is built with two records sharing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate credential identifier: {0}")]
pub struct DuplicateIdentifier(pub String);

/// CredentialTable
///
/// The immutable sign-in table. Identifiers are unique, checked once at construction.
#[derive(Debug, Clone)]
pub struct CredentialTable {
    records: Vec<CredentialRecord>,
}

impl CredentialTable {
    pub fn new(records: Vec<CredentialRecord>) -> Result<Self, DuplicateIdentifier> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.identifier.as_str()) {
                return Err(DuplicateIdentifier(record.identifier.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The five built-in accounts, one per role.
    pub fn builtin() -> Self {
        let row = |role: Role, identifier: &str, secret: &str, landing_route: &str| {
            CredentialRecord {
                role,
                identifier: identifier.to_string(),
                secret: secret.to_string(),
                landing_route: landing_route.to_string(),
            }
        };

        Self {
            records: vec![
                row(Role::Admin, "+998901111111", "admin123", "/dashboard/admin"),
                row(Role::SuperAdmin, "+998902222222", "super123", "/dashboard/super_admin"),
                row(Role::Teacher, "+998903333333", "teacher123", "/dashboard/teacher"),
                row(Role::Student, "+998904444444", "student123", "/dashboard/student"),
                row(Role::Parent, "+998905555555", "parent123", "/dashboard/parent"),
            ],
        }
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }
}

/// Authenticator
///
/// Checks submitted (phone, password) pairs against an injected CredentialTable.
/// Cheap to clone; the table is shared.
#[derive(Debug, Clone)]
pub struct Authenticator {
    table: Arc<CredentialTable>,
}

impl Authenticator {
    pub fn new(table: CredentialTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// authenticate
    ///
    /// Exact match on both fields, first record wins. Any mismatch yields
    /// `AuthError::InvalidCredentials`. Persisting the session is the caller's job.
    pub fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<&CredentialRecord, AuthError> {
        self.table
            .records
            .iter()
            .find(|record| record.identifier == identifier && record.secret == secret)
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Landing route of the first record with `role`, used to bounce an already signed-in
    /// user away from the sign-in page.
    pub fn landing_route(&self, role: Role) -> Option<&str> {
        self.table
            .records
            .iter()
            .find(|record| record.role == role)
            .map(|record| record.landing_route.as_str())
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(CredentialTable::builtin())
    }
}
