use library_gate::{
    AppConfig, GateError, GuardPolicy, NavigationGate, RouteTable, SessionSnapshot,
    models::{AccessRequirement, NavigationIntent, NavigationOutcome, RouteEntry},
    session::{MemorySessionStore, UnavailableSessionStore},
};

// --- Setup ---

fn gate() -> NavigationGate {
    NavigationGate::from_config(&AppConfig::default()).expect("application gate must build")
}

fn member() -> MemorySessionStore {
    MemorySessionStore::with_session("member-token", Some("member"))
}

fn admin() -> MemorySessionStore {
    MemorySessionStore::with_session("admin-token", Some("admin"))
}

// --- Scenarios ---

#[test]
fn test_anonymous_borrowings_redirects_to_login() {
    let decision = gate()
        .navigate(&NavigationIntent::to("/borrowings"), &MemorySessionStore::new())
        .unwrap();

    assert_eq!(decision.outcome, NavigationOutcome::redirect("/login"));
    assert_eq!(decision.final_path, "/login");
    assert_eq!(decision.route.as_deref(), Some("Login"));
    assert_eq!(decision.redirects, 1);
    assert!(decision.notice.is_none());
}

#[test]
fn test_member_admin_redirects_home_with_notice() {
    let decision = gate()
        .navigate(&NavigationIntent::to("/admin").from_path("/search"), &member())
        .unwrap();

    assert_eq!(decision.outcome, NavigationOutcome::redirect("/"));
    assert_eq!(decision.final_path, "/");
    assert_eq!(decision.route.as_deref(), Some("Home"));
    assert_eq!(decision.from.as_deref(), Some("/search"));
    assert_eq!(
        decision.notice.map(|n| n.message).as_deref(),
        Some("Only administrators can access this page")
    );
}

#[test]
fn test_admin_reaches_admin_panel() {
    let decision = gate()
        .navigate(&NavigationIntent::to("/admin"), &admin())
        .unwrap();

    assert_eq!(decision.outcome, NavigationOutcome::Proceed);
    assert_eq!(decision.final_path, "/admin");
    assert_eq!(decision.view.map(|v| v.0).as_deref(), Some("AdminPanel"));
    assert_eq!(decision.redirects, 0);
}

#[test]
fn test_anonymous_search_proceeds() {
    let decision = gate()
        .navigate(&NavigationIntent::to("/search"), &MemorySessionStore::new())
        .unwrap();

    assert_eq!(decision.outcome, NavigationOutcome::Proceed);
    assert_eq!(decision.route.as_deref(), Some("BookSearch"));
}

#[test]
fn test_member_borrowings_proceeds() {
    let decision = gate()
        .navigate(&NavigationIntent::to("/borrowings"), &member())
        .unwrap();

    assert_eq!(decision.outcome, NavigationOutcome::Proceed);
    assert_eq!(decision.route.as_deref(), Some("BorrowingHistory"));
}

// --- Edge Conditions ---

#[test]
fn test_unknown_route_proceeds_unfound() {
    let decision = gate()
        .navigate(&NavigationIntent::to("/no-such-page"), &MemorySessionStore::new())
        .unwrap();

    assert_eq!(decision.outcome, NavigationOutcome::Proceed);
    assert!(!decision.found);
    assert_eq!(decision.route, None);
    assert_eq!(decision.final_path, "/no-such-page");
}

#[test]
fn test_unavailable_store_never_grants_access() {
    let gate = gate();
    for path in ["/borrowings", "/admin"] {
        let decision = gate
            .navigate(&NavigationIntent::to(path), &UnavailableSessionStore)
            .unwrap();
        assert_eq!(decision.outcome, NavigationOutcome::redirect("/login"), "{path}");
    }
}

#[test]
fn test_case_variant_cannot_bypass_guard() {
    let decision = gate()
        .navigate(&NavigationIntent::to("/Admin/?tab=users"), &member())
        .unwrap();
    assert_eq!(decision.outcome, NavigationOutcome::redirect("/"));
}

#[test]
fn test_session_change_between_navigations_is_observed() {
    let gate = gate();
    let store = admin();
    let intent = NavigationIntent::to("/admin");

    assert!(gate.navigate(&intent, &store).unwrap().outcome.is_proceed());

    store.login("member-token", Some("member"));
    assert_eq!(
        gate.navigate(&intent, &store).unwrap().outcome,
        NavigationOutcome::redirect("/")
    );

    store.logout();
    assert_eq!(
        gate.navigate(&intent, &store).unwrap().outcome,
        NavigationOutcome::redirect("/login")
    );
}

#[test]
fn test_apply_is_idempotent() {
    let gate = gate();
    let session = SessionSnapshot::authenticated(Some("member"));
    let intent = NavigationIntent::to("/admin");

    let first = gate.apply(&intent, &session).unwrap();
    let second = gate.apply(&intent, &session).unwrap();
    assert_eq!(first, second);
    assert!(first.notice.is_some());
}

// --- Construction ---

#[test]
fn test_gate_rejects_guarded_redirect_target() {
    let table = RouteTable::register(vec![
        RouteEntry::new("/", "Home", "Home", AccessRequirement::RequiresAuth),
        RouteEntry::new("/login", "Login", "Login", AccessRequirement::Public),
    ])
    .unwrap();

    assert_eq!(
        NavigationGate::new(table, GuardPolicy::default(), 3).unwrap_err(),
        GateError::InvalidRedirectTarget {
            path: "/".to_string()
        }
    );
}

#[test]
fn test_gate_rejects_missing_login_route() {
    let table = RouteTable::register(vec![RouteEntry::new(
        "/",
        "Home",
        "Home",
        AccessRequirement::Public,
    )])
    .unwrap();

    assert!(matches!(
        NavigationGate::new(table, GuardPolicy::default(), 3),
        Err(GateError::InvalidRedirectTarget { path }) if path == "/login"
    ));
}

#[test]
fn test_zero_redirect_bound_is_rejected() {
    let table = library_gate::routes::application_table().unwrap();

    assert_eq!(
        NavigationGate::new(table, GuardPolicy::default(), 0).unwrap_err(),
        GateError::InvalidRedirectLimit { limit: 0 }
    );
}

#[test]
fn test_single_redirect_bound_settles_denials() {
    let table = library_gate::routes::application_table().unwrap();
    let gate = NavigationGate::new(table, GuardPolicy::default(), 1).unwrap();

    let decision = gate
        .navigate(&NavigationIntent::to("/borrowings"), &MemorySessionStore::new())
        .unwrap();
    assert_eq!(decision.final_path, "/login");
    assert_eq!(decision.redirects, 1);

    let decision = gate.navigate(&NavigationIntent::to("/admin"), &member()).unwrap();
    assert_eq!(decision.final_path, "/");
    assert!(decision.notice.is_some());
}

#[test]
fn test_padded_admin_role_is_denied() {
    for role in [" admin", "admin ", " admin "] {
        let store = MemorySessionStore::with_session("padded-token", Some(role));
        let decision = gate().navigate(&NavigationIntent::to("/admin"), &store).unwrap();

        assert_eq!(decision.outcome, NavigationOutcome::redirect("/"), "role {role:?}");
        assert_eq!(
            decision.notice.map(|n| n.message).as_deref(),
            Some("Only administrators can access this page")
        );
    }
}

#[test]
fn test_config_denial_message_flows_into_notice() {
    let config = AppConfig {
        denial_message: "Staff only".to_string(),
        ..AppConfig::default()
    };
    let gate = NavigationGate::from_config(&config).unwrap();

    let decision = gate.navigate(&NavigationIntent::to("/admin"), &member()).unwrap();
    assert_eq!(decision.notice.unwrap().message, "Staff only");
}
