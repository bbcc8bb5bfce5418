//! Route Table Module Index
//!
//! Holds the application's view registry. Entries are declared in three access-segregated
//! modules so that the privilege a view demands is visible where the view is listed:
//! `public` (anyone), `authenticated` (a session token is required), `admin` (token plus the
//! admin role).
//!
//! The table is built once at startup by `application_table()` and never mutated afterwards.

use std::collections::HashSet;

use crate::{error::GateError, models::RouteEntry};

pub mod pattern;

/// Views reachable without a session.
pub mod public;

/// Views that require a session token.
pub mod authenticated;

/// Views restricted to the admin role.
pub mod admin;

use pattern::PathPattern;

/// RouteMatch
///
/// Result of a successful `resolve`: the matched entry and any captured path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: Vec<(String, String)>,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// RouteTable
///
/// Ordered, immutable registry mapping path patterns to views. Entries cannot be added,
/// removed or mutated once `register` has returned.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<(PathPattern, RouteEntry)>,
}

impl RouteTable {
    /// register
    ///
    /// Bulk, one-time load. Fails if two entries share a path (ignoring parameter names and
    /// letter case) or a name, or if any pattern is malformed.
    pub fn register(entries: impl IntoIterator<Item = RouteEntry>) -> Result<Self, GateError> {
        let mut seen_paths = HashSet::new();
        let mut seen_names = HashSet::new();
        let mut routes = Vec::new();

        for entry in entries {
            let pattern = PathPattern::parse(&entry.path)?;

            if !seen_paths.insert(pattern.signature()) {
                return Err(GateError::DuplicateRouteRegistration {
                    field: "path",
                    value: entry.path,
                });
            }
            if !seen_names.insert(entry.name.clone()) {
                return Err(GateError::DuplicateRouteRegistration {
                    field: "name",
                    value: entry.name,
                });
            }

            tracing::debug!(path = %entry.path, name = %entry.name, access = ?entry.access, "route registered");
            routes.push((pattern, entry));
        }

        Ok(Self { routes })
    }

    /// resolve
    ///
    /// Maps a requested path to its entry. First registered match wins.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<'_>, GateError> {
        self.routes
            .iter()
            .find_map(|(pattern, entry)| {
                pattern
                    .matches(path)
                    .map(|params| RouteMatch { entry, params })
            })
            .ok_or_else(|| GateError::RouteNotFound {
                path: path.to_string(),
            })
    }

    /// Looks an entry up by its symbolic name, for programmatic navigation.
    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// application_table
///
/// Builds the library application's fixed route table, in declaration order:
/// public views, then authenticated views, then admin views.
pub fn application_table() -> Result<RouteTable, GateError> {
    RouteTable::register(
        public::public_routes()
            .into_iter()
            .chain(authenticated::authenticated_routes())
            .chain(admin::admin_routes()),
    )
}
