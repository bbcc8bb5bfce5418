use thiserror::Error;

/// GateError
///
/// Every failure the navigation gate can report. Only the construction-time variants
/// (`DuplicateRouteRegistration`, `InvalidRoutePattern`, `InvalidRedirectTarget`,
/// `InvalidRedirectLimit`) are fatal; they must abort startup rather than leave the application
/// with an ambiguous table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    /// No entry matches the requested path. Non-fatal: the presentation layer renders its own
    /// not-found view.
    #[error("no route matches path `{path}`")]
    RouteNotFound { path: String },

    /// The session store could not be read. Non-fatal: the snapshot fails closed.
    #[error("session store unavailable: {0}")]
    SessionUnavailable(#[from] SessionError),

    /// Two entries share a path or a name.
    #[error("duplicate route {field} `{value}`")]
    DuplicateRouteRegistration { field: &'static str, value: String },

    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidRoutePattern { pattern: String, reason: &'static str },

    /// A configured redirect target (login or home) is missing from the table or is not public.
    #[error("redirect target `{path}` must resolve to a public route")]
    InvalidRedirectTarget { path: String },

    /// A redirect needs at least one hop to be applied.
    #[error("redirect limit must be at least 1, got {limit}")]
    InvalidRedirectLimit { limit: usize },

    /// Following redirects did not settle within the configured number of hops.
    #[error("navigation to `{path}` exceeded {limit} redirects")]
    RedirectLoop { path: String, limit: usize },
}

/// SessionError
///
/// Failure reported by a `SessionStore` implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session store unreachable")]
    Unreachable,
    #[error("malformed session value for `{0}`")]
    Malformed(&'static str),
}
