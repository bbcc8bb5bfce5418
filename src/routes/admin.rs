use crate::models::{AccessRequirement, RouteEntry};

/// Admin Views
///
/// Views restricted to sessions carrying the admin role. The requirement implies
/// authentication, so anonymous visitors are sent to login before any role check happens.
/// Signed-in members without the role land on the home view with a denial notice.
pub fn admin_routes() -> Vec<RouteEntry> {
    vec![
        // Book inventory and user management.
        RouteEntry::new(
            "/admin",
            "AdminPanel",
            "AdminPanel",
            AccessRequirement::RequiresAdmin,
        ),
    ]
}
