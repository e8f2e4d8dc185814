use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};

use crate::{models::Session, session::SessionStore};

/// Where the route guard sends anonymous requests.
pub const SIGN_IN_PATH: &str = "/signin";

/// SessionUser Extractor Result
///
/// The session a protected request runs under. Taking it as a handler argument is what
/// makes a route protected.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Session);

/// SessionUser Extractor Implementation
///
/// The route guard. The session store is read on every request, never cached, so a
/// sign-out takes effect on the very next navigation.
///
/// On success the role is recorded on the request span. Rejection: `303 See Other` to the
/// sign-in page; the protected handler never runs.
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionStore::from_ref(state);

        match sessions.get().await {
            Some(session) => {
                tracing::Span::current().record("role", session.role.as_str());
                Ok(SessionUser(session))
            }
            None => {
                tracing::debug!(uri = %parts.uri, "No session, redirecting to sign-in");
                Err(Redirect::to(SIGN_IN_PATH))
            }
        }
    }
}
