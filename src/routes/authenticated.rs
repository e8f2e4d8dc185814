use crate::{AppState, handlers};
use axum::{
    Router,
    routing::get,
};

/// Authenticated Router Module
///
/// Routes for any signed-in role. The router is wrapped in the session guard layer in
/// `create_router`, and each handler also takes `SessionUser`, so an anonymous request is
/// redirected to `/signin` before any handler code runs.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me
        // The current session and its landing route.
        .route("/me", get(handlers::get_me))
        // GET /navigation?location=/teachers
        // Role-filtered sidebar with active and open state resolved for the location.
        .route("/navigation", get(handlers::get_navigation))
        // --- Teacher Roster ---
        // GET /teachers?search=...
        // POST /teachers
        .route(
            "/teachers",
            get(handlers::list_teachers).post(handlers::create_teacher),
        )
        // GET/PUT/DELETE /teachers/{id}
        .route(
            "/teachers/{id}",
            get(handlers::get_teacher)
                .put(handlers::update_teacher)
                .delete(handlers::delete_teacher),
        )
}
