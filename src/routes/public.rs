use crate::models::{AccessRequirement, RouteEntry};

/// Public Views
///
/// Views any visitor may open, signed in or not. The login and home views must stay in this
/// list: the guard redirects to them, and a redirect target that is itself guarded would never
/// settle.
pub fn public_routes() -> Vec<RouteEntry> {
    vec![
        // Landing page; also the target of insufficient-role redirects.
        RouteEntry::new("/", "Home", "Home", AccessRequirement::Public),
        // Target of every unauthenticated redirect.
        RouteEntry::new("/login", "Login", "Login", AccessRequirement::Public),
        RouteEntry::new("/register", "Register", "Register", AccessRequirement::Public),
        // Catalogue search is open to anonymous visitors.
        RouteEntry::new("/search", "BookSearch", "BookSearch", AccessRequirement::Public),
    ]
}
