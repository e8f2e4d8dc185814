//! Role-gated sidebar navigation.
//!
//! The tree is plain data built once at startup. Everything else here is a pure
//! function of (tree, role, location), recomputed on every request.

use crate::models::{
    MenuEntry, MenuGroup, NavigationView, OpenSubmenu, RenderedEntry, RenderedSubItem, Role,
    SubItem,
};

/// NavigationTree
///
/// The two menu lists, in on-screen order. Shared read-only across requests.
#[derive(Debug, Clone, Default)]
pub struct NavigationTree {
    pub main: Vec<MenuEntry>,
    pub others: Vec<MenuEntry>,
}

fn leaf(icon: &str, name: &str, path: &str, roles: &[Role]) -> MenuEntry {
    MenuEntry {
        name: name.to_string(),
        icon: icon.to_string(),
        path: Some(path.to_string()),
        sub_items: None,
        roles: roles.to_vec(),
    }
}

fn group(icon: &str, name: &str, sub_items: &[(&str, &str)], roles: &[Role]) -> MenuEntry {
    MenuEntry {
        name: name.to_string(),
        icon: icon.to_string(),
        path: None,
        sub_items: Some(
            sub_items
                .iter()
                .map(|(name, path)| SubItem {
                    name: (*name).to_string(),
                    path: (*path).to_string(),
                })
                .collect(),
        ),
        roles: roles.to_vec(),
    }
}

impl NavigationTree {
    /// The academy dashboard menu.
    pub fn standard() -> Self {
        use Role::*;

        const MANAGEMENT: &[Role] = &[SuperAdmin, Admin];
        const EVERYONE: &[Role] = &[SuperAdmin, Admin, Teacher, Student, Parent];
        const SUPER_ONLY: &[Role] = &[SuperAdmin];

        let main = vec![
            leaf("grid", "Boshqaruv paneli", "/", MANAGEMENT),
            leaf("user", "O'qituvchilar", "/teachers", MANAGEMENT),
            leaf(
                "user-circle",
                "O'quvchilar",
                "/students",
                &[SuperAdmin, Admin, Teacher, Parent],
            ),
            leaf("group", "Ota-onalar", "/parents", MANAGEMENT),
            leaf("check-circle", "Davomat", "/attendance", &[SuperAdmin, Admin, Teacher]),
            leaf("group", "Guruhlar", "/groups", &[SuperAdmin, Admin, Teacher]),
            leaf("box", "Xonalar", "/rooms", MANAGEMENT),
            leaf("calendar", "Taqvim", "/calendar", EVERYONE),
            leaf("user-circle", "Shaxsiy profil", "/profile", EVERYONE),
            // UI and test pages are SUPER_ADMIN only.
            group(
                "list",
                "Formalar",
                &[("Forma elementlari", "/form-elements")],
                SUPER_ONLY,
            ),
            group(
                "table",
                "Jadvallar",
                &[("Oddiy jadvallar", "/basic-tables")],
                SUPER_ONLY,
            ),
            group(
                "page",
                "Sahifalar",
                &[("Bo'sh sahifa", "/blank"), ("404 Xato", "/error-404")],
                SUPER_ONLY,
            ),
        ];

        let others = vec![
            group(
                "pie-chart",
                "Diagrammalar",
                &[
                    ("Chiziqli diagramma", "/line-chart"),
                    ("Ustunli diagramma", "/bar-chart"),
                ],
                SUPER_ONLY,
            ),
            group(
                "box-cube",
                "UI elementlari",
                &[
                    ("Ogohlantirishlar", "/alerts"),
                    ("Avatar", "/avatars"),
                    ("Belgilar", "/badge"),
                    ("Tugmalar", "/buttons"),
                    ("Rasmlar", "/images"),
                    ("Videolar", "/videos"),
                ],
                SUPER_ONLY,
            ),
            group(
                "plug-in",
                "Autentifikatsiya",
                &[("Kirish", "/signin"), ("Ro'yxatdan o'tish", "/signup")],
                SUPER_ONLY,
            ),
        ];

        Self { main, others }
    }

    pub fn entries(&self, group: MenuGroup) -> &[MenuEntry] {
        match group {
            MenuGroup::Main => &self.main,
            MenuGroup::Others => &self.others,
        }
    }

    /// render
    ///
    /// Builds the sidebar for `role` at `location`, with `open` as the expanded submenu.
    /// Pass `resolve_open_submenu(..)` as `open` to get the state a fresh navigation lands in.
    pub fn render(&self, role: Option<Role>, location: &str, open: Option<OpenSubmenu>) -> NavigationView {
        let render_group = |group: MenuGroup| -> Vec<RenderedEntry> {
            visible_entries(self.entries(group), role)
                .into_iter()
                .enumerate()
                .map(|(index, entry)| RenderedEntry {
                    name: entry.name.clone(),
                    icon: entry.icon.clone(),
                    path: entry.path.clone(),
                    active: entry.sub_items.is_none()
                        && entry.path.as_deref().is_some_and(|p| is_active(p, location)),
                    open: open == Some(OpenSubmenu { group, index }),
                    sub_items: entry
                        .sub_items
                        .iter()
                        .flatten()
                        .map(|sub| RenderedSubItem {
                            name: sub.name.clone(),
                            path: sub.path.clone(),
                            active: is_active(&sub.path, location),
                        })
                        .collect(),
                })
                .collect()
        };

        NavigationView {
            location: location.to_string(),
            open,
            main: render_group(MenuGroup::Main),
            others: render_group(MenuGroup::Others),
        }
    }
}

/// Entries of one menu list visible to `role`, in tree order. Sub-items follow their
/// group; there is no per-sub-item filtering. Anonymous sees nothing.
pub fn visible_entries(entries: &[MenuEntry], role: Option<Role>) -> Vec<&MenuEntry> {
    let Some(role) = role else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|entry| entry.roles.contains(&role))
        .collect()
}

/// Prefix match: a path is active for itself and everything beneath it, so `/` is
/// active everywhere.
pub fn is_active(path: &str, location: &str) -> bool {
    location.starts_with(path)
}

/// resolve_open_submenu
///
/// The first visible group entry (main before others, tree order within a group) with an
/// active sub-item. `None` when the location is outside every visible submenu.
pub fn resolve_open_submenu(
    tree: &NavigationTree,
    role: Option<Role>,
    location: &str,
) -> Option<OpenSubmenu> {
    [MenuGroup::Main, MenuGroup::Others]
        .into_iter()
        .find_map(|group| {
            visible_entries(tree.entries(group), role)
                .into_iter()
                .position(|entry| {
                    entry
                        .sub_items
                        .iter()
                        .flatten()
                        .any(|sub| is_active(&sub.path, location))
                })
                .map(|index| OpenSubmenu { group, index })
        })
}

/// Collapse when the same submenu is toggled again, otherwise switch to it.
pub fn toggle_submenu(
    group: MenuGroup,
    index: usize,
    current: Option<OpenSubmenu>,
) -> Option<OpenSubmenu> {
    let target = OpenSubmenu { group, index };
    if current == Some(target) {
        None
    } else {
        Some(target)
    }
}
