use academy_portal::{
    InMemoryTeacherRepository,
    models::{CreateTeacherRequest, Teacher, TeacherStatus, UpdateTeacherRequest},
    repository::{RepositoryError, TeacherRepository},
};

fn new_teacher(name: &str) -> CreateTeacherRequest {
    CreateTeacherRequest {
        name: name.to_string(),
        subject: "Go".to_string(),
        phone: "+998 95 000 00 00".to_string(),
        email: "new@school.uz".to_string(),
        groups: 1,
        status: TeacherStatus::Active,
    }
}

#[tokio::test]
async fn test_seeded_roster() {
    let repo = InMemoryTeacherRepository::seeded();
    let all = repo.list_teachers(None).await;

    assert_eq!(all.len(), 5);
    assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert_eq!(repo.list_teachers(Some(String::new())).await.len(), 5);
}

#[tokio::test]
async fn test_search_by_name_subject_and_phone() {
    let repo = InMemoryTeacherRepository::seeded();

    let by_subject = repo.list_teachers(Some("frontend".to_string())).await;
    assert_eq!(by_subject.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 4]);

    let by_name = repo.list_teachers(Some("KARIMOVA".to_string())).await;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, 2);

    let by_phone = repo.list_teachers(Some("99 345".to_string())).await;
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].name, "Oripov Sardor");

    assert!(repo.list_teachers(Some("haskell".to_string())).await.is_empty());
}

#[tokio::test]
async fn test_create_assigns_next_id() {
    let repo = InMemoryTeacherRepository::seeded();
    let created = repo.create_teacher(new_teacher("Yusupov Aziz")).await.unwrap();
    assert_eq!(created.id, 6);

    // Ids are max + 1, not count + 1.
    assert!(repo.delete_teacher(2).await);
    let next = repo.create_teacher(new_teacher("Nazarova Dilnoza")).await.unwrap();
    assert_eq!(next.id, 7);

    let all = repo.list_teachers(None).await;
    assert_eq!(all.last().map(|t| t.id), Some(7));
}

#[tokio::test]
async fn test_create_into_empty_roster() {
    let repo = InMemoryTeacherRepository::new(Vec::new());
    assert_eq!(repo.create_teacher(new_teacher("First")).await.unwrap().id, 1);
}

#[tokio::test]
async fn test_create_fails_when_ids_are_exhausted() {
    let repo = InMemoryTeacherRepository::new(vec![Teacher {
        id: u32::MAX,
        name: "Last".to_string(),
        ..Default::default()
    }]);

    let result = repo.create_teacher(new_teacher("Overflow")).await;
    assert!(matches!(result, Err(RepositoryError::IdsExhausted(u32::MAX))));
    assert_eq!(repo.list_teachers(None).await.len(), 1);
}

#[tokio::test]
async fn test_update_merges_fields() {
    let repo = InMemoryTeacherRepository::seeded();
    let updated = repo
        .update_teacher(
            3,
            UpdateTeacherRequest {
                status: Some(TeacherStatus::Active),
                groups: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, TeacherStatus::Active);
    assert_eq!(updated.groups, 4);
    assert_eq!(updated.name, "Oripov Sardor");
    assert_eq!(repo.get_teacher(3).await, Some(updated));

    assert!(
        repo.update_teacher(99, UpdateTeacherRequest::default())
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_delete() {
    let repo = InMemoryTeacherRepository::seeded();
    assert!(repo.delete_teacher(5).await);
    assert!(!repo.delete_teacher(5).await);
    assert_eq!(repo.get_teacher(5).await, None);
    assert_eq!(repo.list_teachers(None).await.len(), 4);
}
