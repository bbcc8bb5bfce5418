use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};

// --- Route Table Schemas ---

/// AccessRequirement
///
/// Declarative tag on a route naming the minimum session privilege needed to enter it.
/// `RequiresAdmin` always implies `RequiresAuth`: the guard checks authentication first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AccessRequirement {
    Public,
    RequiresAuth,
    RequiresAdmin,
}

impl AccessRequirement {
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::RequiresAuth | Self::RequiresAdmin)
    }

    pub fn requires_admin(self) -> bool {
        self == Self::RequiresAdmin
    }
}

/// ViewRef
///
/// Opaque handle to the view mounted for a route. The presentation layer owns the view itself;
/// the gate only carries the identifier through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(transparent)]
#[ts(export)]
pub struct ViewRef(pub String);

impl ViewRef {
    pub fn new(view: impl Into<String>) -> Self {
        Self(view.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// RouteEntry
///
/// One navigable view. `path` and `name` are unique across a `RouteTable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteEntry {
    /// Path pattern, e.g. `/borrowings` or `/books/{id}`.
    pub path: String,
    /// Symbolic name used for programmatic navigation.
    pub name: String,
    pub view: ViewRef,
    pub access: AccessRequirement,
}

impl RouteEntry {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        view: impl Into<String>,
        access: AccessRequirement,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: ViewRef::new(view),
            access,
        }
    }
}

// --- Guard Output Schemas ---

/// NavigationOutcome
///
/// The guard's verdict on a single navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum NavigationOutcome {
    Proceed,
    RedirectTo { path: String },
}

impl NavigationOutcome {
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::RedirectTo { path: path.into() }
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// DenialNotice
///
/// User-visible message attached to an insufficient-role denial. The presentation layer picks
/// how to render it (toast, dialog, banner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DenialNotice {
    pub message: String,
}

// --- Navigator Schemas ---

/// NavigationIntent
///
/// A requested transition as delivered by the presentation layer.
/// Also bound from the query string of `GET /navigate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationIntent {
    /// Target path, may carry a query string or fragment.
    pub to: String,
    /// Path the user is navigating away from.
    pub from: Option<String>,
}

impl NavigationIntent {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            to: path.into(),
            from: None,
        }
    }

    pub fn from_path(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// NavigationDecision
///
/// The fully applied result of a navigation: the first guard outcome plus the path the
/// navigation finally settled on after following redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationDecision {
    pub requested: String,
    pub from: Option<String>,
    /// Outcome of guarding the requested path itself.
    pub outcome: NavigationOutcome,
    pub final_path: String,
    /// Name of the route mounted at `final_path`; absent when the path matched nothing.
    pub route: Option<String>,
    pub view: Option<ViewRef>,
    /// False when `final_path` is unknown to the table and the host renders its own 404.
    pub found: bool,
    pub redirects: usize,
    pub notice: Option<DenialNotice>,
}
