use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core services.
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod repository;
pub mod session;
pub mod storage;

// Routers split by access level (public, authenticated).
pub mod routes;
use auth::SessionUser;
use routes::{authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use credentials::{Authenticator, CredentialTable};
pub use navigation::NavigationTree;
pub use repository::{InMemoryTeacherRepository, TeacherRepositoryState};
pub use session::SessionStore;
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorageState};

/// ApiDoc
///
/// OpenAPI document for every handler, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::sign_in, handlers::sign_in_status, handlers::sign_out, handlers::get_me,
        handlers::get_navigation, handlers::toggle_submenu, handlers::list_teachers,
        handlers::get_teacher, handlers::create_teacher, handlers::update_teacher, handlers::delete_teacher
    ),
    components(
        schemas(
            models::Role, models::Session, models::SignInRequest, models::SignInResponse,
            models::SignInStatus, models::ErrorResponse, models::MenuGroup, models::OpenSubmenu,
            models::ToggleSubmenuRequest, models::ToggleSubmenuResponse, models::NavigationView,
            models::RenderedEntry, models::RenderedSubItem, models::Teacher, models::TeacherStatus,
            models::CreateTeacherRequest, models::UpdateTeacherRequest,
        )
    ),
    tags(
        (name = "academy-portal", description = "Academy dashboard session and navigation API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Everything a handler needs, built once at startup and cloned per request. Every
/// field is either a cheap handle or an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persisted session slot.
    pub sessions: SessionStore,
    /// Sign-in table checker.
    pub authenticator: Authenticator,
    /// The sidebar tree, read-only.
    pub navigation: Arc<NavigationTree>,
    /// Teacher roster.
    pub teachers: TeacherRepositoryState,
}

impl AppState {
    /// Production wiring: file-backed session, built-in credentials and menu, seeded roster.
    pub fn from_config(config: &AppConfig) -> Self {
        let storage = Arc::new(FileSessionStorage::new(config.session_file.clone())) as SessionStorageState;
        Self::with_storage(storage)
    }

    /// Same wiring over an arbitrary storage backend.
    pub fn with_storage(storage: SessionStorageState) -> Self {
        Self {
            sessions: SessionStore::new(storage),
            authenticator: Authenticator::new(CredentialTable::builtin()),
            navigation: Arc::new(NavigationTree::standard()),
            teachers: Arc::new(InMemoryTeacherRepository::seeded()) as TeacherRepositoryState,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for SessionStore {
    fn from_ref(app_state: &AppState) -> SessionStore {
        app_state.sessions.clone()
    }
}

/// session_guard
///
/// Route guard for the authenticated router. `SessionUser` rejects with a redirect to
/// `/signin` when no session is persisted, so the inner handler is never reached.
async fn session_guard(_user: SessionUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// Header carrying the per-request correlation id, generated when the client sends none.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// create_router
///
/// Public pages, the session-guarded dashboard API and the OpenAPI docs, wrapped in
/// request-id, tracing and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let guard = middleware::from_fn_with_state(state.clone(), session_guard);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes().route_layer(guard))
        .with_state(state);

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Outermost first: the id must exist before the span reads it.
    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(request_id)),
    )
    .layer(cors)
}

/// request_span
///
/// One span per request. `role` starts empty and is filled in by `SessionUser` or by a
/// successful sign-in, so every dashboard log line says which role it ran as.
fn request_span(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        req_id = %request_id,
        role = tracing::field::Empty,
    )
}
