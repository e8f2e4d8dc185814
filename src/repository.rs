use crate::models::{CreateTeacherRequest, Teacher, TeacherStatus, UpdateTeacherRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// RepositoryError
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("no teacher id left above {0}")]
    IdsExhausted(u32),
}

/// TeacherRepository Trait
///
/// Abstract contract for the teacher roster, so handlers can be exercised against stubs.
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    // Case-insensitive match on name or subject, plain substring on phone.
    async fn list_teachers(&self, search: Option<String>) -> Vec<Teacher>;
    async fn get_teacher(&self, id: u32) -> Option<Teacher>;
    // Assigns the next id (max + 1) and appends. Fails once the id space is used up.
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher, RepositoryError>;
    // Partial merge; None when the id is unknown.
    async fn update_teacher(&self, id: u32, req: UpdateTeacherRequest) -> Option<Teacher>;
    async fn delete_teacher(&self, id: u32) -> bool;
}

/// TeacherRepositoryState
///
/// The concrete type used to share the roster across the application state.
pub type TeacherRepositoryState = Arc<dyn TeacherRepository>;

/// InMemoryTeacherRepository
///
/// Roster held in process memory; it starts from the mock seed and is lost on restart.
pub struct InMemoryTeacherRepository {
    teachers: RwLock<Vec<Teacher>>,
}

impl InMemoryTeacherRepository {
    pub fn new(teachers: Vec<Teacher>) -> Self {
        Self {
            teachers: RwLock::new(teachers),
        }
    }

    /// The five demo teachers shown on a fresh dashboard.
    pub fn seeded() -> Self {
        let teacher = |id: u32, name: &str, subject: &str, phone: &str, email: &str, groups: u32, status: TeacherStatus| Teacher {
            id,
            name: name.to_string(),
            subject: subject.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            groups,
            status,
        };

        Self::new(vec![
            teacher(1, "Abdullaev Ahmad", "Frontend", "+998 90 123 45 67", "ahmad@school.uz", 5, TeacherStatus::Active),
            teacher(2, "Karimova Gulnoza", "Backend", "+998 91 234 56 78", "gulnoza@school.uz", 4, TeacherStatus::Active),
            teacher(3, "Oripov Sardor", "Python", "+998 99 345 67 89", "sardor@school.uz", 3, TeacherStatus::OnLeave),
            teacher(4, "Saidova Madina", "Frontend", "+998 93 456 78 90", "madina@school.uz", 6, TeacherStatus::Active),
            teacher(5, "To'rayev Botir", "Java", "+998 97 567 89 01", "botir@school.uz", 2, TeacherStatus::Active),
        ])
    }
}

fn matches_search(teacher: &Teacher, term: &str) -> bool {
    let lowered = term.to_lowercase();
    teacher.name.to_lowercase().contains(&lowered)
        || teacher.subject.to_lowercase().contains(&lowered)
        || teacher.phone.contains(term)
}

#[async_trait]
impl TeacherRepository for InMemoryTeacherRepository {
    async fn list_teachers(&self, search: Option<String>) -> Vec<Teacher> {
        let teachers = self.teachers.read().await;
        match search.as_deref() {
            None | Some("") => teachers.clone(),
            Some(term) => teachers
                .iter()
                .filter(|t| matches_search(t, term))
                .cloned()
                .collect(),
        }
    }

    async fn get_teacher(&self, id: u32) -> Option<Teacher> {
        self.teachers.read().await.iter().find(|t| t.id == id).cloned()
    }

    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher, RepositoryError> {
        let mut teachers = self.teachers.write().await;
        let highest = teachers.iter().map(|t| t.id).max().unwrap_or(0);
        let id = highest
            .checked_add(1)
            .ok_or(RepositoryError::IdsExhausted(highest))?;

        let teacher = Teacher {
            id,
            name: req.name,
            subject: req.subject,
            phone: req.phone,
            email: req.email,
            groups: req.groups,
            status: req.status,
        };
        teachers.push(teacher.clone());
        Ok(teacher)
    }

    async fn update_teacher(&self, id: u32, req: UpdateTeacherRequest) -> Option<Teacher> {
        let mut teachers = self.teachers.write().await;
        let teacher = teachers.iter_mut().find(|t| t.id == id)?;

        if let Some(name) = req.name {
            teacher.name = name;
        }
        if let Some(subject) = req.subject {
            teacher.subject = subject;
        }
        if let Some(phone) = req.phone {
            teacher.phone = phone;
        }
        if let Some(email) = req.email {
            teacher.email = email;
        }
        if let Some(groups) = req.groups {
            teacher.groups = groups;
        }
        if let Some(status) = req.status {
            teacher.status = status;
        }

        Some(teacher.clone())
    }

    async fn delete_teacher(&self, id: u32) -> bool {
        let mut teachers = self.teachers.write().await;
        let before = teachers.len();
        teachers.retain(|t| t.id != id);
        teachers.len() != before
    }
}
