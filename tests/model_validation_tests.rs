use academy_portal::models::{
    CreateTeacherRequest, MenuGroup, OpenSubmenu, Role, SignInRequest, TeacherStatus,
    ToggleSubmenuRequest, UnknownRole, UpdateTeacherRequest, is_valid_email,
};

#[test]
fn test_role_tags_round_trip_through_from_str() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        assert_eq!(role.to_string(), role.as_str());
    }
}

#[test]
fn test_role_parse_is_case_sensitive() {
    assert_eq!(
        "super_admin".parse::<Role>(),
        Err(UnknownRole("super_admin".to_string()))
    );
    assert!("Admin".parse::<Role>().is_err());
}

#[test]
fn test_role_json_uses_upper_snake_case() {
    let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
    assert_eq!(json, r#""SUPER_ADMIN""#);

    let parsed: Role = serde_json::from_str(r#""PARENT""#).unwrap();
    assert_eq!(parsed, Role::Parent);

    assert!(serde_json::from_str::<Role>(r#""parent""#).is_err());
}

#[test]
fn test_toggle_request_current_defaults_to_none() {
    let req: ToggleSubmenuRequest =
        serde_json::from_str(r#"{"group":"others","index":2}"#).unwrap();
    assert_eq!(req.group, MenuGroup::Others);
    assert_eq!(req.index, 2);
    assert_eq!(req.current, None);

    let req: ToggleSubmenuRequest = serde_json::from_str(
        r#"{"group":"main","index":0,"current":{"group":"main","index":0}}"#,
    )
    .unwrap();
    assert_eq!(
        req.current,
        Some(OpenSubmenu {
            group: MenuGroup::Main,
            index: 0
        })
    );
}

#[test]
fn test_sign_in_request_shape() {
    let req: SignInRequest =
        serde_json::from_str(r#"{"phone":"+998901111111","password":"admin123"}"#).unwrap();
    assert_eq!(req.phone, "+998901111111");
    assert_eq!(req.password, "admin123");
}

#[test]
fn test_update_teacher_request_optionality() {
    let partial_update = UpdateTeacherRequest {
        subject: Some("Rust".to_string()),
        ..Default::default()
    };

    let json_output = serde_json::to_string(&partial_update).unwrap();
    assert_eq!(json_output, r#"{"subject":"Rust"}"#);
}

#[test]
fn test_teacher_status_wire_form() {
    assert_eq!(serde_json::to_value(TeacherStatus::Active).unwrap(), "Faol");
    assert_eq!(serde_json::to_value(TeacherStatus::OnLeave).unwrap(), "Ta'tilda");

    let parsed: TeacherStatus = serde_json::from_str(r#""Ta'tilda""#).unwrap();
    assert_eq!(parsed, TeacherStatus::OnLeave);
    assert!(serde_json::from_str::<TeacherStatus>(r#""whatever""#).is_err());
    assert!(serde_json::from_str::<TeacherStatus>(r#""faol""#).is_err());
}

#[test]
fn test_create_teacher_request_requires_every_field() {
    let missing = serde_json::from_str::<CreateTeacherRequest>(
        r#"{"name":"A","subject":"B","phone":"1"}"#,
    );
    assert!(missing.is_err());

    let full: CreateTeacherRequest = serde_json::from_str(
        r#"{"name":"A","subject":"B","phone":"1","email":"a@school.uz","groups":0,"status":"Faol"}"#,
    )
    .unwrap();
    assert_eq!(full.validate(), Ok(()));
}

#[test]
fn test_create_teacher_request_validation() {
    let valid = CreateTeacherRequest {
        name: "Yusupov Aziz".to_string(),
        subject: "Rust".to_string(),
        phone: "+998 95 111 22 33".to_string(),
        email: "aziz@school.uz".to_string(),
        groups: 1,
        status: TeacherStatus::Active,
    };
    assert_eq!(valid.validate(), Ok(()));

    let blank_subject = CreateTeacherRequest {
        subject: " ".to_string(),
        ..valid.clone()
    };
    assert_eq!(blank_subject.validate(), Err("subject is required".to_string()));

    let bad_email = CreateTeacherRequest {
        email: "not-an-email".to_string(),
        ..valid
    };
    assert_eq!(
        bad_email.validate(),
        Err("email is not a valid email address".to_string())
    );
}

#[test]
fn test_update_teacher_request_rejects_blank_present_fields() {
    assert_eq!(UpdateTeacherRequest::default().validate(), Ok(()));

    let blank_name = UpdateTeacherRequest {
        name: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(blank_name.validate(), Err("name is required".to_string()));

    let bad_email = UpdateTeacherRequest {
        email: Some("a@b".to_string()),
        ..Default::default()
    };
    assert!(bad_email.validate().is_err());

    let status_only = UpdateTeacherRequest {
        status: Some(TeacherStatus::OnLeave),
        ..Default::default()
    };
    assert_eq!(status_only.validate(), Ok(()));
}

#[test]
fn test_email_shape() {
    for good in ["ahmad@school.uz", "a.b@mail.example.com", "x+tag@y.io"] {
        assert!(is_valid_email(good), "{good}");
    }
    for bad in [
        "",
        "not-an-email",
        "@school.uz",
        "ahmad@",
        "ahmad@school",
        "ahmad@.uz",
        "ahmad@school.",
        "a@b@school.uz",
        "ah mad@school.uz",
    ] {
        assert!(!is_valid_email(bad), "{bad}");
    }
}
