use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Identity ---

/// Role
///
/// The closed set of user classes the dashboard authorizes against. The wire and storage
/// form is the upper-snake-case tag (`"SUPER_ADMIN"`), compared case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Role {
    Admin,
    SuperAdmin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    /// Every role, in credential-table order.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::SuperAdmin,
        Role::Teacher,
        Role::Student,
        Role::Parent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
            Role::Parent => "PARENT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored or submitted string is not one of the role tags.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0:?} is not a recognised role")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// CredentialRecord
///
/// One row of the compiled-in sign-in table. The secret is compared verbatim and is
/// never serialized or logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub role: Role,
    /// Phone number, unique within a table.
    pub identifier: String,
    pub secret: String,
    /// Where the client navigates after a successful sign-in.
    pub landing_route: String,
}

/// Session
///
/// The persisted (token, role) pair. The token is an opaque marker derived from the
/// credential, not a signed credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

// --- Sign-in payloads ---

/// SignInRequest
///
/// Input payload for POST /signin.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SignInRequest {
    #[schema(example = "+998901111111")]
    pub phone: String,
    #[schema(example = "admin123")]
    pub password: String,
}

/// SignInResponse
///
/// Returned on successful sign-in and by GET /me.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SignInResponse {
    pub token: String,
    pub role: Role,
    pub landing_route: String,
}

/// SignInStatus
///
/// Returned by GET /signin when nobody is signed in.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SignInStatus {
    pub authenticated: bool,
}

/// ErrorResponse
///
/// Uniform JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

// --- Navigation ---

/// MenuGroup
///
/// The two independent menu lists rendered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MenuGroup {
    Main,
    Others,
}

/// SubItem
///
/// A navigable leaf inside a group entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SubItem {
    pub name: String,
    pub path: String,
}

/// MenuEntry
///
/// A node of the navigation tree. An entry with `sub_items` is a group header and is not
/// directly navigable; otherwise `path` is the route it links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MenuEntry {
    pub name: String,
    /// Opaque presentational handle (icon name).
    pub icon: String,
    pub path: Option<String>,
    pub sub_items: Option<Vec<SubItem>>,
    /// Roles allowed to see this entry, sub-items included.
    pub roles: Vec<Role>,
}

/// OpenSubmenu
///
/// Identifies the single expanded group entry: its menu group and its index among that
/// group's visible entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct OpenSubmenu {
    pub group: MenuGroup,
    pub index: usize,
}

/// ToggleSubmenuRequest
///
/// Input payload for POST /navigation/toggle.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ToggleSubmenuRequest {
    pub group: MenuGroup,
    pub index: usize,
    #[serde(default)]
    pub current: Option<OpenSubmenu>,
}

/// ToggleSubmenuResponse
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ToggleSubmenuResponse {
    pub open: Option<OpenSubmenu>,
}

/// RenderedSubItem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RenderedSubItem {
    pub name: String,
    pub path: String,
    pub active: bool,
}

/// RenderedEntry
///
/// A visible menu entry with its state resolved against the current location.
/// `active` applies to leaves, `open` to group headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RenderedEntry {
    pub name: String,
    pub icon: String,
    pub path: Option<String>,
    pub active: bool,
    pub open: bool,
    pub sub_items: Vec<RenderedSubItem>,
}

/// NavigationView
///
/// Output schema for GET /navigation: everything the sidebar needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationView {
    pub location: String,
    pub open: Option<OpenSubmenu>,
    pub main: Vec<RenderedEntry>,
    pub others: Vec<RenderedEntry>,
}

// --- Teacher roster ---

/// TeacherStatus
///
/// Employment state shown in the roster. Only these two values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum TeacherStatus {
    /// Active.
    #[default]
    #[serde(rename = "Faol")]
    Active,
    /// On leave.
    #[serde(rename = "Ta'tilda")]
    OnLeave,
}

/// Teacher
///
/// A row of the in-memory teacher roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Teacher {
    pub id: u32,
    pub name: String,
    pub subject: String,
    pub phone: String,
    pub email: String,
    /// Number of groups the teacher leads.
    pub groups: u32,
    pub status: TeacherStatus,
}

/// CreateTeacherRequest
///
/// Input payload for POST /teachers. Every field is required; the id is assigned by the
/// repository.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub subject: String,
    pub phone: String,
    #[schema(example = "ahmad@school.uz")]
    pub email: String,
    pub groups: u32,
    pub status: TeacherStatus,
}

/// UpdateTeacherRequest
///
/// Partial update payload for PUT /teachers/{id}. Absent fields keep their value; present
/// fields obey the same rules as on create.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateTeacherRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TeacherStatus>,
}

/// Shape check only: one `@`, a non-empty local part, a dotted domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<(), String> {
    require_text("email", value)?;
    if !is_valid_email(value) {
        return Err("email is not a valid email address".to_string());
    }
    Ok(())
}

impl CreateTeacherRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        require_text("subject", &self.subject)?;
        require_text("phone", &self.phone)?;
        require_email(&self.email)
    }
}

impl UpdateTeacherRequest {
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("name", &self.name),
            ("subject", &self.subject),
            ("phone", &self.phone),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        Ok(())
    }
}
