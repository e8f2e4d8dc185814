use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::models::{CredentialRecord, Role, Session};
use crate::storage::{SessionStorageState, StorageError};

/// Storage key of the opaque session token.
pub const TOKEN_KEY: &str = "session.token";
/// Storage key of the role tag, stored verbatim.
pub const ROLE_KEY: &str = "session.role";

/// Why a persisted session was rejected. Only ever logged; readers see "no session".
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is torn: {0} is missing")]
    Torn(&'static str),
    #[error("session role is not recognised: {0}")]
    UnknownRole(#[from] crate::models::UnknownRole),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Opaque token for a credential: base64 of `identifier:ROLE`. Deterministic and
/// unsigned, so it identifies a session but proves nothing.
pub fn derive_token(identifier: &str, role: Role) -> String {
    STANDARD.encode(format!("{identifier}:{role}"))
}

/// SessionStore
///
/// Reads and writes the single persisted session through an injected storage backend.
#[derive(Clone)]
pub struct SessionStore {
    storage: SessionStorageState,
}

impl SessionStore {
    pub fn new(storage: SessionStorageState) -> Self {
        Self { storage }
    }

    /// get
    ///
    /// Fails safe: empty, torn or unreadable storage and unknown roles all read as `None`.
    pub async fn get(&self) -> Option<Session> {
        match self.load().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring persisted session: {}", e);
                None
            }
        }
    }

    /// True when a session is present. The predicate every protected route checks.
    pub async fn is_present(&self) -> bool {
        self.get().await.is_some()
    }

    async fn load(&self) -> Result<Option<Session>, SessionError> {
        let mut fields = self
            .storage
            .get_items(&[TOKEN_KEY, ROLE_KEY])
            .await?
            .into_iter();
        let token = fields.next().flatten();
        let role = fields.next().flatten();

        match (token, role) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(SessionError::Torn(ROLE_KEY)),
            (None, Some(_)) => Err(SessionError::Torn(TOKEN_KEY)),
            (Some(token), Some(role)) => Ok(Some(Session {
                token,
                role: role.parse()?,
            })),
        }
    }

    /// set
    ///
    /// Derives the token from the credential and writes token and role together.
    pub async fn set(&self, credential: &CredentialRecord) -> Result<Session, StorageError> {
        let session = Session {
            token: derive_token(&credential.identifier, credential.role),
            role: credential.role,
        };

        self.storage
            .set_items(&[(TOKEN_KEY, session.token.as_str()), (ROLE_KEY, session.role.as_str())])
            .await?;

        tracing::debug!(role = %session.role, "Session persisted");
        Ok(session)
    }

    /// clear
    ///
    /// Removes both fields. Clearing an empty store is a no-op.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_items(&[TOKEN_KEY, ROLE_KEY]).await
    }
}
