use std::convert::Infallible;
use std::sync::RwLock;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

use crate::error::{GateError, SessionError};

/// Header carrying the role the SPA holds alongside its token.
pub const ROLE_HEADER: &str = "x-user-role";

// 1. SessionStore Contract
/// SessionStore
///
/// Narrow, read-only view of wherever the client keeps its session (browser storage, request
/// headers, an in-process map). The gate never writes through this trait and never keeps a
/// reference past a single decision.
///
/// Token contents are not validated here: structure and expiry belong to the backend.
pub trait SessionStore: Send + Sync {
    fn get_token(&self) -> Result<Option<String>, SessionError>;
    fn get_role(&self) -> Result<Option<String>, SessionError>;
}

/// SessionSnapshot
///
/// Point-in-time read of the session taken for exactly one navigation decision.
/// A role is only ever present on an authenticated snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    authenticated: bool,
    role: Option<String>,
}

impl SessionSnapshot {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(role: Option<&str>) -> Self {
        Self {
            authenticated: true,
            role: role.map(str::to_string),
        }
    }

    /// try_capture
    ///
    /// Reads the store once. An empty or whitespace-only token counts as absent.
    /// The role is kept verbatim so `has_role` compares exactly; only an empty role is absent.
    pub fn try_capture(store: &dyn SessionStore) -> Result<Self, GateError> {
        let token = store.get_token()?;
        let has_token = token.is_some_and(|token| !token.trim().is_empty());
        if !has_token {
            return Ok(Self::anonymous());
        }

        let role = store.get_role()?;
        let role = role.as_deref().filter(|role| !role.is_empty());
        Ok(Self::authenticated(role))
    }

    /// capture
    ///
    /// Like `try_capture`, but fails closed: a store that cannot be read yields the anonymous
    /// snapshot.
    pub fn capture(store: &dyn SessionStore) -> Self {
        Self::try_capture(store).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "session store unreadable, treating session as anonymous");
            Self::anonymous()
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role() == Some(role)
    }
}

// 2. In-Process Store
/// MemorySessionStore
///
/// In-memory counterpart of the browser's local storage: the host (or a test) writes the token
/// and role on login and clears them on logout.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<StoredSession>,
}

#[derive(Debug, Default, Clone)]
struct StoredSession {
    token: Option<String>,
    role: Option<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(token: impl Into<String>, role: Option<&str>) -> Self {
        let store = Self::new();
        store.login(token, role);
        store
    }

    pub fn login(&self, token: impl Into<String>, role: Option<&str>) {
        let mut session = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        session.token = Some(token.into());
        session.role = role.map(str::to_string);
    }

    pub fn logout(&self) {
        let mut session = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *session = StoredSession::default();
    }

    fn read(&self) -> Result<StoredSession, SessionError> {
        self.inner
            .read()
            .map(|session| session.clone())
            .map_err(|_| SessionError::Unreachable)
    }
}

impl SessionStore for MemorySessionStore {
    fn get_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.token)
    }

    fn get_role(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.role)
    }
}

/// UnavailableSessionStore
///
/// A store whose every read fails. Exercises the fail-closed path.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSessionStore;

impl SessionStore for UnavailableSessionStore {
    fn get_token(&self) -> Result<Option<String>, SessionError> {
        Err(SessionError::Unreachable)
    }

    fn get_role(&self) -> Result<Option<String>, SessionError> {
        Err(SessionError::Unreachable)
    }
}

// 3. Request Header Store
/// HeaderSessionStore
///
/// Reads the session the SPA forwards on an HTTP request:
/// `Authorization: Bearer <token>` and `X-User-Role: <role>`.
/// The scheme matches case-insensitively (`bearer` is accepted). Non-UTF-8 values, or a
/// scheme other than Bearer, are malformed.
pub struct HeaderSessionStore<'a> {
    headers: &'a HeaderMap,
}

impl<'a> HeaderSessionStore<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }

    fn header(&self, name: &'static str) -> Result<Option<&'a str>, SessionError> {
        self.headers
            .get(name)
            .map(|value| value.to_str().map_err(|_| SessionError::Malformed(name)))
            .transpose()
    }
}

impl SessionStore for HeaderSessionStore<'_> {
    fn get_token(&self) -> Result<Option<String>, SessionError> {
        let Some(value) = self.header("authorization")? else {
            return Ok(None);
        };
        match value.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
                Ok(Some(token.to_string()))
            }
            _ => Err(SessionError::Malformed("authorization")),
        }
    }

    fn get_role(&self) -> Result<Option<String>, SessionError> {
        Ok(self.header(ROLE_HEADER)?.map(str::to_string))
    }
}

/// SessionSnapshot Extractor Implementation
///
/// Lets handlers take a `SessionSnapshot` argument. Never rejects: unreadable headers produce
/// the anonymous snapshot.
impl<S> FromRequestParts<S> for SessionSnapshot
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionSnapshot::capture(&HeaderSessionStore::new(&parts.headers)))
    }
}
