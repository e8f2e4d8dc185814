use academy_portal::{
    NavigationTree,
    models::{MenuEntry, MenuGroup, OpenSubmenu, Role},
    navigation::{is_active, resolve_open_submenu, toggle_submenu, visible_entries},
};

fn paths(entries: &[&MenuEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.path.clone().unwrap_or_else(|| e.name.clone()))
        .collect()
}

// --- visible_entries ---

#[test]
fn test_visibility_matches_role_membership() {
    let tree = NavigationTree::standard();

    for role in Role::ALL {
        for group in [MenuGroup::Main, MenuGroup::Others] {
            let all = tree.entries(group);
            let visible = visible_entries(all, Some(role));

            for entry in all {
                let shown = visible.iter().any(|v| std::ptr::eq(*v, entry));
                assert_eq!(shown, entry.roles.contains(&role), "{} for {role}", entry.name);
            }

            // Survivors keep tree order.
            let positions: Vec<usize> = visible
                .iter()
                .map(|v| all.iter().position(|e| std::ptr::eq(e, *v)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn test_anonymous_sees_nothing() {
    let tree = NavigationTree::standard();
    assert!(visible_entries(&tree.main, None).is_empty());
    assert!(visible_entries(&tree.others, None).is_empty());
}

#[test]
fn test_student_menu() {
    let tree = NavigationTree::standard();
    let visible = visible_entries(&tree.main, Some(Role::Student));
    assert_eq!(paths(&visible), vec!["/calendar", "/profile"]);
    assert!(visible_entries(&tree.others, Some(Role::Student)).is_empty());
}

#[test]
fn test_teacher_menu() {
    let tree = NavigationTree::standard();
    let visible = visible_entries(&tree.main, Some(Role::Teacher));
    assert_eq!(
        paths(&visible),
        vec!["/students", "/attendance", "/groups", "/calendar", "/profile"]
    );
}

#[test]
fn test_admin_menu_excludes_super_admin_only_entries() {
    let tree = NavigationTree::standard();
    let visible = visible_entries(&tree.main, Some(Role::Admin));

    assert!(visible.iter().any(|e| e.path.as_deref() == Some("/teachers")));
    assert!(visible.iter().all(|e| e.roles != vec![Role::SuperAdmin]));
    assert!(visible_entries(&tree.others, Some(Role::Admin)).is_empty());
}

// --- is_active ---

#[test]
fn test_is_active_prefix_semantics() {
    assert!(is_active("/teachers", "/teachers"));
    assert!(is_active("/teachers", "/teachers/5"));
    assert!(is_active("/teachers", "/teachersroom"));
    assert!(!is_active("/teachers", "/students"));
    assert!(!is_active("/teachers/5", "/teachers"));
}

#[test]
fn test_root_is_active_everywhere() {
    for location in ["/", "/anything", "/teachers/1", "/dashboard/admin"] {
        assert!(is_active("/", location));
    }
}

// --- resolve_open_submenu ---

#[test]
fn test_resolve_opens_matching_group() {
    let tree = NavigationTree::standard();
    let role = Some(Role::SuperAdmin);

    // Formalar is the 10th visible main entry for SUPER_ADMIN.
    assert_eq!(
        resolve_open_submenu(&tree, role, "/form-elements"),
        Some(OpenSubmenu { group: MenuGroup::Main, index: 9 })
    );
    assert_eq!(
        resolve_open_submenu(&tree, role, "/error-404"),
        Some(OpenSubmenu { group: MenuGroup::Main, index: 11 })
    );
    assert_eq!(
        resolve_open_submenu(&tree, role, "/buttons"),
        Some(OpenSubmenu { group: MenuGroup::Others, index: 1 })
    );
    assert_eq!(resolve_open_submenu(&tree, role, "/teachers"), None);
}

#[test]
fn test_hidden_group_never_opens() {
    let tree = NavigationTree::standard();
    for role in [Role::Admin, Role::Teacher, Role::Student, Role::Parent] {
        assert_eq!(resolve_open_submenu(&tree, Some(role), "/line-chart"), None);
        assert_eq!(resolve_open_submenu(&tree, Some(role), "/blank"), None);
    }
    assert_eq!(resolve_open_submenu(&tree, None, "/line-chart"), None);
}

#[test]
fn test_index_counts_visible_entries_only() {
    let mut tree = NavigationTree::standard();
    // Formalar is entry 9 of the tree but only the 6th entry TEACHER can see.
    tree.main[9].roles.push(Role::Teacher);

    assert_eq!(
        resolve_open_submenu(&tree, Some(Role::Teacher), "/form-elements"),
        Some(OpenSubmenu { group: MenuGroup::Main, index: 5 })
    );
}

#[test]
fn test_resolve_is_idempotent_and_restores_after_toggle() {
    let tree = NavigationTree::standard();
    let role = Some(Role::SuperAdmin);
    let location = "/bar-chart";

    let first = resolve_open_submenu(&tree, role, location);
    let second = resolve_open_submenu(&tree, role, location);
    assert_eq!(first, second);

    // Collapse manually, then navigate to the same location again.
    let open = first.unwrap();
    let toggled = toggle_submenu(open.group, open.index, first);
    assert_eq!(toggled, None);
    assert_eq!(resolve_open_submenu(&tree, role, location), first);
}

// --- toggle_submenu ---

#[test]
fn test_toggle_rules() {
    let open = |group, index| Some(OpenSubmenu { group, index });

    assert_eq!(toggle_submenu(MenuGroup::Main, 3, open(MenuGroup::Main, 3)), None);
    assert_eq!(toggle_submenu(MenuGroup::Main, 3, None), open(MenuGroup::Main, 3));
    assert_eq!(
        toggle_submenu(MenuGroup::Main, 3, open(MenuGroup::Main, 1)),
        open(MenuGroup::Main, 3)
    );
    // Same index in the other group is a different submenu.
    assert_eq!(
        toggle_submenu(MenuGroup::Others, 3, open(MenuGroup::Main, 3)),
        open(MenuGroup::Others, 3)
    );
}

// --- render ---

#[test]
fn test_render_flags() {
    let tree = NavigationTree::standard();
    let role = Some(Role::SuperAdmin);
    let location = "/alerts";
    let open = resolve_open_submenu(&tree, role, location);

    let view = tree.render(role, location, open);
    assert_eq!(view.open, open);
    assert_eq!(view.main.len(), 12);
    assert_eq!(view.others.len(), 3);

    let ui = &view.others[1];
    assert!(ui.open);
    assert!(!ui.active);
    assert!(ui.sub_items.iter().any(|s| s.path == "/alerts" && s.active));
    assert!(ui.sub_items.iter().filter(|s| s.active).count() == 1);

    // The dashboard root leaf is active for every location.
    assert!(view.main[0].active);
    assert!(!view.main[1].active);
    assert!(view.main.iter().all(|e| !e.open));
}

#[test]
fn test_render_anonymous_is_empty() {
    let tree = NavigationTree::standard();
    let view = tree.render(None, "/teachers", None);
    assert!(view.main.is_empty());
    assert!(view.others.is_empty());
    assert_eq!(view.open, None);
}
