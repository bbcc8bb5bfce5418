use crate::models::{AccessRequirement, RouteEntry};

/// Authenticated Views
///
/// Views that need a session token. Any signed-in member may open them; anonymous visitors
/// are silently sent to the login view.
pub fn authenticated_routes() -> Vec<RouteEntry> {
    vec![
        // The member's own loans and returns.
        RouteEntry::new(
            "/borrowings",
            "BorrowingHistory",
            "BorrowingHistory",
            AccessRequirement::RequiresAuth,
        ),
    ]
}
