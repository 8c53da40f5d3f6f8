//! # Page Access Rules
//!
//! The role-gated navigation model: every page declares the closed set of
//! roles allowed to view it, and both the route guards and the navigation
//! menu derive from the same table, so no link is ever produced for a
//! destination its viewer cannot open.
//!
//! ## Permission Matrix
//! ```text
//! ┌───────────────┬─────────────┬───────┬─────────────┐
//! │ Page          │ super_admin │ admin │ sales_staff │
//! ├───────────────┼─────────────┼───────┼─────────────┤
//! │ Dashboard     │      ✓      │   ✓   │      ✓      │
//! │ Products      │      ✓      │   ✓   │      ✗      │
//! │ Stock Entries │      ✓      │   ✓   │      ✗      │
//! │ Sales         │      ✓      │   ✓   │      ✓      │
//! │ Analytics     │      ✓      │   ✓   │      ✗      │
//! │ Users         │      ✓      │   ✗   │      ✗      │
//! └───────────────┴─────────────┴───────┴─────────────┘
//! ```
//!
//! Both enums are closed: adding a page or a role fails to compile until
//! every match arm below is revisited.

use serde::{Deserialize, Serialize};

use crate::types::Role;

// =============================================================================
// Page
// =============================================================================

/// The navigable pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    Products,
    StockEntries,
    Sales,
    Analytics,
    Users,
}

impl Page {
    /// Every page, in navigation order.
    pub const ALL: [Page; 6] = [
        Page::Dashboard,
        Page::Products,
        Page::StockEntries,
        Page::Sales,
        Page::Analytics,
        Page::Users,
    ];

    /// The roles permitted to view this page.
    ///
    /// The single source of truth: route guards deny anything outside this
    /// set, and the navigation menu filters by it.
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Page::Dashboard => &[Role::SuperAdmin, Role::Admin, Role::SalesStaff],
            Page::Products => &[Role::SuperAdmin, Role::Admin],
            Page::StockEntries => &[Role::SuperAdmin, Role::Admin],
            Page::Sales => &[Role::SuperAdmin, Role::Admin, Role::SalesStaff],
            Page::Analytics => &[Role::SuperAdmin, Role::Admin],
            Page::Users => &[Role::SuperAdmin],
        }
    }

    /// Whether the given role may view this page. Absence of a satisfying
    /// role is a hard deny, not a soft warning.
    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// The client-side path of the page.
    pub const fn path(self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Products => "/products",
            Page::StockEntries => "/stock",
            Page::Sales => "/sales",
            Page::Analytics => "/analytics",
            Page::Users => "/users",
        }
    }

    /// Human-readable menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Products => "Products",
            Page::StockEntries => "Stock Entries",
            Page::Sales => "Sales",
            Page::Analytics => "Analytics",
            Page::Users => "Users",
        }
    }
}

/// The navigation menu for a role: exactly the pages it may open.
pub fn navigation(role: Role) -> Vec<Page> {
    Page::ALL
        .into_iter()
        .filter(|page| page.permits(role))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// The full matrix, pinned exactly.
    #[test]
    fn test_permission_matrix() {
        let expectations = [
            (Page::Dashboard, true, true, true),
            (Page::Products, true, true, false),
            (Page::StockEntries, true, true, false),
            (Page::Sales, true, true, true),
            (Page::Analytics, true, true, false),
            (Page::Users, true, false, false),
        ];

        for (page, super_admin, admin, sales_staff) in expectations {
            assert_eq!(page.permits(Role::SuperAdmin), super_admin, "{page:?}");
            assert_eq!(page.permits(Role::Admin), admin, "{page:?}");
            assert_eq!(page.permits(Role::SalesStaff), sales_staff, "{page:?}");
        }
    }

    #[test]
    fn test_sales_staff_navigation() {
        let pages = navigation(Role::SalesStaff);
        assert_eq!(pages, vec![Page::Dashboard, Page::Sales]);
    }

    #[test]
    fn test_admin_navigation_excludes_users() {
        let pages = navigation(Role::Admin);
        assert!(!pages.contains(&Page::Users));
        assert_eq!(pages.len(), 5);
    }

    #[test]
    fn test_super_admin_sees_everything() {
        assert_eq!(navigation(Role::SuperAdmin).len(), Page::ALL.len());
    }

    /// Menu entries and guards must never disagree: a page is in the menu
    /// exactly when its guard admits the role.
    #[test]
    fn test_navigation_matches_guards() {
        for role in [Role::SuperAdmin, Role::Admin, Role::SalesStaff] {
            for page in Page::ALL {
                assert_eq!(navigation(role).contains(&page), page.permits(role));
            }
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(Page::Dashboard.path(), "/");
        assert_eq!(Page::StockEntries.path(), "/stock");
        assert_eq!(Page::Users.path(), "/users");
    }
}
