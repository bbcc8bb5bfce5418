use axum::http::{HeaderMap, HeaderValue, header};
use library_gate::{
    GateError, SessionError, SessionSnapshot, SessionStore,
    session::{HeaderSessionStore, MemorySessionStore, UnavailableSessionStore},
};
use std::sync::atomic::{AtomicUsize, Ordering};

// --- Mock Store ---

/// Counts reads so tests can assert the snapshot queries the store each time.
#[derive(Default)]
struct CountingStore {
    token: Option<String>,
    role: Option<String>,
    fail_role: bool,
    reads: AtomicUsize,
}

impl SessionStore for CountingStore {
    fn get_token(&self) -> Result<Option<String>, SessionError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.clone())
    }

    fn get_role(&self) -> Result<Option<String>, SessionError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_role {
            return Err(SessionError::Malformed("role"));
        }
        Ok(self.role.clone())
    }
}

// --- Snapshot Capture ---

#[test]
fn test_token_present_means_authenticated() {
    let store = MemorySessionStore::with_session("abc.def.ghi", Some("member"));
    let snapshot = SessionSnapshot::capture(&store);

    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.role(), Some("member"));
}

#[test]
fn test_empty_token_is_anonymous() {
    for token in ["", "   "] {
        let store = MemorySessionStore::with_session(token, Some("admin"));
        let snapshot = SessionSnapshot::capture(&store);
        assert_eq!(snapshot, SessionSnapshot::anonymous(), "token {token:?}");
        // Role never survives without a token.
        assert_eq!(snapshot.role(), None);
    }
}

#[test]
fn test_role_without_token_is_dropped() {
    let store = CountingStore {
        role: Some("admin".to_string()),
        ..Default::default()
    };
    let snapshot = SessionSnapshot::capture(&store);

    assert!(!snapshot.is_authenticated());
    assert_eq!(snapshot.role(), None);
}

#[test]
fn test_empty_role_is_absent() {
    let store = MemorySessionStore::with_session("t", Some(""));
    assert_eq!(SessionSnapshot::capture(&store), SessionSnapshot::authenticated(None));
}

#[test]
fn test_padded_role_is_kept_verbatim() {
    for role in [" admin", "admin ", " admin "] {
        let store = MemorySessionStore::with_session("t", Some(role));
        let snapshot = SessionSnapshot::capture(&store);
        assert_eq!(snapshot.role(), Some(role));
        assert!(!snapshot.has_role("admin"), "role {role:?}");
    }
}

#[test]
fn test_unreachable_store_fails_closed() {
    assert_eq!(
        SessionSnapshot::try_capture(&UnavailableSessionStore),
        Err(GateError::SessionUnavailable(SessionError::Unreachable))
    );
    assert_eq!(
        SessionSnapshot::capture(&UnavailableSessionStore),
        SessionSnapshot::anonymous()
    );
}

#[test]
fn test_malformed_role_fails_closed() {
    let store = CountingStore {
        token: Some("t".to_string()),
        fail_role: true,
        ..Default::default()
    };
    assert!(!SessionSnapshot::capture(&store).is_authenticated());
}

#[test]
fn test_every_capture_reads_the_store() {
    let store = CountingStore {
        token: Some("t".to_string()),
        role: Some("member".to_string()),
        ..Default::default()
    };
    SessionSnapshot::capture(&store);
    SessionSnapshot::capture(&store);
    assert_eq!(store.reads.load(Ordering::SeqCst), 4);
}

#[test]
fn test_memory_store_login_logout() {
    let store = MemorySessionStore::new();
    assert!(!SessionSnapshot::capture(&store).is_authenticated());

    store.login("token", Some("admin"));
    assert!(SessionSnapshot::capture(&store).has_role("admin"));

    store.logout();
    assert_eq!(SessionSnapshot::capture(&store), SessionSnapshot::anonymous());
}

// --- Header Store ---

#[test]
fn test_header_store_reads_bearer_and_role() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok123"));
    headers.insert("x-user-role", HeaderValue::from_static("admin"));

    let store = HeaderSessionStore::new(&headers);
    assert_eq!(store.get_token(), Ok(Some("tok123".to_string())));
    assert_eq!(store.get_role(), Ok(Some("admin".to_string())));
    assert_eq!(
        SessionSnapshot::capture(&store),
        SessionSnapshot::authenticated(Some("admin"))
    );
}

#[test]
fn test_header_store_without_headers_is_anonymous() {
    let headers = HeaderMap::new();
    let store = HeaderSessionStore::new(&headers);

    assert_eq!(store.get_token(), Ok(None));
    assert_eq!(SessionSnapshot::capture(&store), SessionSnapshot::anonymous());
}

#[test]
fn test_header_store_scheme_is_case_insensitive() {
    for value in ["bearer tok123", "BEARER tok123"] {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));

        let store = HeaderSessionStore::new(&headers);
        assert_eq!(store.get_token(), Ok(Some("tok123".to_string())), "{value}");
    }
}

#[test]
fn test_header_store_rejects_non_bearer_scheme() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    let store = HeaderSessionStore::new(&headers);
    assert_eq!(store.get_token(), Err(SessionError::Malformed("authorization")));
    assert!(!SessionSnapshot::capture(&store).is_authenticated());
}

#[test]
fn test_header_store_rejects_opaque_bytes() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
    headers.insert("x-user-role", HeaderValue::from_bytes(b"adm\xffin").unwrap());

    let store = HeaderSessionStore::new(&headers);
    assert_eq!(store.get_role(), Err(SessionError::Malformed("x-user-role")));
    assert_eq!(SessionSnapshot::capture(&store), SessionSnapshot::anonymous());
}
