use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable by an anonymous client. Nothing here reads roster data or renders
/// navigation.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for monitoring.
        .route("/health", get(|| async { "ok" }))
        // GET /signin  -> redirect to the landing route if a session already exists
        // POST /signin -> check credentials and persist the session
        .route(
            "/signin",
            get(handlers::sign_in_status).post(handlers::sign_in),
        )
        // POST /signout
        // Clears the persisted session. Idempotent.
        .route("/signout", post(handlers::sign_out))
        // POST /navigation/toggle
        // Stateless: the client sends its current open submenu and gets the next one.
        .route("/navigation/toggle", post(handlers::toggle_submenu))
}
