use crate::{
    AppState,
    auth::SessionUser,
    error::ApiError,
    models::{
        CreateTeacherRequest, ErrorResponse, NavigationView, SignInRequest, SignInResponse,
        SignInStatus, Teacher, ToggleSubmenuRequest, ToggleSubmenuResponse, UpdateTeacherRequest,
    },
    navigation,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

// --- Query Structs ---

/// NavigationQuery
///
/// The client's current location, e.g. `?location=/teachers`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NavigationQuery {
    /// Current route path. Defaults to `/`.
    pub location: Option<String>,
}

/// TeacherFilter
#[derive(Deserialize, utoipa::IntoParams)]
pub struct TeacherFilter {
    /// Matches name or subject (case-insensitive) or phone.
    pub search: Option<String>,
}

// --- Session Handlers ---

/// sign_in
///
/// [Public Route] Checks the phone/password pair and, on success, persists the session.
/// A failed attempt leaves any existing session untouched.
#[utoipa::path(
    post,
    path = "/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    let record = match state.authenticator.authenticate(&payload.phone, &payload.password) {
        Ok(record) => record,
        Err(e) => {
            tracing::info!("Sign-in rejected");
            return Err(e.into());
        }
    };

    let session = state.sessions.set(record).await?;
    tracing::Span::current().record("role", session.role.as_str());
    tracing::info!("Sign-in succeeded");

    Ok(Json(SignInResponse {
        token: session.token,
        role: session.role,
        landing_route: record.landing_route.clone(),
    }))
}

/// sign_in_status
///
/// [Public Route] The sign-in page's entry check: an already signed-in client is sent
/// straight to its role's landing route.
#[utoipa::path(
    get,
    path = "/signin",
    responses(
        (status = 200, description = "Not signed in", body = SignInStatus),
        (status = 303, description = "Already signed in, redirect to landing route")
    )
)]
pub async fn sign_in_status(State(state): State<AppState>) -> Response {
    let landing = state
        .sessions
        .get()
        .await
        .and_then(|session| state.authenticator.landing_route(session.role).map(str::to_owned));

    match landing {
        Some(route) => Redirect::to(&route).into_response(),
        None => Json(SignInStatus {
            authenticated: false,
        })
        .into_response(),
    }
}

/// sign_out
///
/// [Public Route] Destroys the persisted session. Signing out twice is fine.
#[utoipa::path(
    post,
    path = "/signout",
    responses((status = 204, description = "Signed out"))
)]
pub async fn sign_out(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.sessions.clear().await?;
    tracing::info!("Signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// get_me
///
/// [Authenticated Route] The current session and where its role lands.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current session", body = SignInResponse),
        (status = 303, description = "No session, redirect to /signin")
    )
)]
pub async fn get_me(
    SessionUser(session): SessionUser,
    State(state): State<AppState>,
) -> Json<SignInResponse> {
    let landing_route = state
        .authenticator
        .landing_route(session.role)
        .unwrap_or("/")
        .to_string();

    Json(SignInResponse {
        token: session.token,
        role: session.role,
        landing_route,
    })
}

// --- Navigation Handlers ---

/// get_navigation
///
/// [Authenticated Route] The sidebar for the session's role. The open submenu is resolved
/// from scratch for the given location on every call.
#[utoipa::path(
    get,
    path = "/navigation",
    params(NavigationQuery),
    responses((status = 200, description = "Visible menu", body = NavigationView))
)]
pub async fn get_navigation(
    SessionUser(session): SessionUser,
    State(state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> Json<NavigationView> {
    let location = query.location.unwrap_or_else(|| "/".to_string());
    let role = Some(session.role);

    let open = navigation::resolve_open_submenu(&state.navigation, role, &location);
    Json(state.navigation.render(role, &location, open))
}

/// toggle_submenu
///
/// [Public Route] Pure state transition for a click on a group header.
#[utoipa::path(
    post,
    path = "/navigation/toggle",
    request_body = ToggleSubmenuRequest,
    responses((status = 200, description = "New open submenu", body = ToggleSubmenuResponse))
)]
pub async fn toggle_submenu(Json(payload): Json<ToggleSubmenuRequest>) -> Json<ToggleSubmenuResponse> {
    Json(ToggleSubmenuResponse {
        open: navigation::toggle_submenu(payload.group, payload.index, payload.current),
    })
}

// --- Teacher Roster Handlers ---

/// list_teachers
///
/// [Authenticated Route] The roster, optionally filtered.
#[utoipa::path(
    get,
    path = "/teachers",
    params(TeacherFilter),
    responses((status = 200, description = "Teachers", body = [Teacher]))
)]
pub async fn list_teachers(
    _user: SessionUser,
    State(state): State<AppState>,
    Query(filter): Query<TeacherFilter>,
) -> Json<Vec<Teacher>> {
    Json(state.teachers.list_teachers(filter.search).await)
}

/// get_teacher
///
/// [Authenticated Route] One teacher by id.
#[utoipa::path(
    get,
    path = "/teachers/{id}",
    responses(
        (status = 200, description = "Teacher", body = Teacher),
        (status = 404, description = "Not Found", body = ErrorResponse)
    )
)]
pub async fn get_teacher(
    _user: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Teacher>, ApiError> {
    state
        .teachers
        .get_teacher(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("teacher {id}")))
}

/// create_teacher
///
/// [Authenticated Route] Adds a teacher. Every field is required and the email must be
/// well-formed.
#[utoipa::path(
    post,
    path = "/teachers",
    request_body = CreateTeacherRequest,
    responses(
        (status = 201, description = "Created", body = Teacher),
        (status = 409, description = "No teacher id left", body = ErrorResponse),
        (status = 422, description = "Missing or malformed field", body = ErrorResponse)
    )
)]
pub async fn create_teacher(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<Teacher>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let teacher = state.teachers.create_teacher(payload).await?;
    tracing::info!(id = teacher.id, "Teacher created");
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// update_teacher
///
/// [Authenticated Route] Partial update. Fields that are present follow the create rules.
#[utoipa::path(
    put,
    path = "/teachers/{id}",
    request_body = UpdateTeacherRequest,
    responses(
        (status = 200, description = "Updated", body = Teacher),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 422, description = "Blank or malformed field", body = ErrorResponse)
    )
)]
pub async fn update_teacher(
    _user: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(payload): Json<UpdateTeacherRequest>,
) -> Result<Json<Teacher>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    state
        .teachers
        .update_teacher(id, payload)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("teacher {id}")))
}

/// delete_teacher
///
/// [Authenticated Route] Removes a teacher from the roster.
#[utoipa::path(
    delete,
    path = "/teachers/{id}",
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_teacher(
    _user: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> StatusCode {
    if state.teachers.delete_teacher(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
