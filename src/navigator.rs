use crate::{
    config::AppConfig,
    error::GateError,
    guard::{GuardPolicy, GuardState, NavigationGuard, Verdict},
    models::{AccessRequirement, NavigationDecision, NavigationIntent, NavigationOutcome},
    routes::{self, RouteMatch, RouteTable},
    session::{SessionSnapshot, SessionStore},
};

/// NavigationGate
///
/// Route table plus guard, wired the way the hosting router applies them: resolve the target,
/// guard it, and on a redirect resolve and guard the substituted target until the navigation
/// settles.
#[derive(Debug, Clone)]
pub struct NavigationGate {
    table: RouteTable,
    guard: NavigationGuard,
    max_redirects: usize,
}

impl NavigationGate {
    /// new
    ///
    /// Fails unless the policy's login and home paths resolve to public entries of `table`, and
    /// `max_redirects` allows at least the one hop a denial needs.
    pub fn new(
        table: RouteTable,
        policy: GuardPolicy,
        max_redirects: usize,
    ) -> Result<Self, GateError> {
        if max_redirects < 1 {
            return Err(GateError::InvalidRedirectLimit {
                limit: max_redirects,
            });
        }

        for path in [&policy.login_path, &policy.home_path] {
            let is_public = table
                .resolve(path)
                .is_ok_and(|found| found.entry.access == AccessRequirement::Public);
            if !is_public {
                return Err(GateError::InvalidRedirectTarget { path: path.clone() });
            }
        }

        Ok(Self {
            table,
            guard: NavigationGuard::new(policy),
            max_redirects,
        })
    }

    /// from_config
    ///
    /// The library application's gate: the fixed route table and the configured policy.
    pub fn from_config(config: &AppConfig) -> Result<Self, GateError> {
        Self::new(
            routes::application_table()?,
            GuardPolicy::from_config(config),
            config.max_redirects,
        )
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// check
    ///
    /// Resolves `path` and guards it once, without following redirects.
    pub fn check(&self, path: &str, session: &SessionSnapshot) -> (Option<RouteMatch<'_>>, Verdict) {
        let found = match self.table.resolve(path) {
            Ok(found) => Some(found),
            Err(err) => {
                tracing::debug!(error = %err, "unknown route, deferring to host not-found handling");
                None
            }
        };
        let verdict = self
            .guard
            .evaluate(found.as_ref().map(|found| found.entry), session);
        (found, verdict)
    }

    /// navigate
    ///
    /// Takes a fresh snapshot from `store` and applies the navigation. The store is read exactly
    /// once; an unreadable store counts as anonymous.
    pub fn navigate(
        &self,
        intent: &NavigationIntent,
        store: &dyn SessionStore,
    ) -> Result<NavigationDecision, GateError> {
        let session = SessionSnapshot::capture(store);
        self.apply(intent, &session)
    }

    /// apply
    ///
    /// Applies a navigation against an already captured snapshot. At most one denial notice is
    /// returned, however many hops the navigation takes.
    pub fn apply(
        &self,
        intent: &NavigationIntent,
        session: &SessionSnapshot,
    ) -> Result<NavigationDecision, GateError> {
        let (mut found, verdict) = self.check(&intent.to, session);
        log_verdict(&intent.to, &verdict);

        let outcome = verdict.outcome.clone();
        let mut notice = verdict.notice;
        let mut next = verdict.outcome;
        let mut current = intent.to.clone();
        let mut redirects = 0;

        while let NavigationOutcome::RedirectTo { path } = next {
            if redirects == self.max_redirects {
                return Err(GateError::RedirectLoop {
                    path: intent.to.clone(),
                    limit: self.max_redirects,
                });
            }
            redirects += 1;

            let (hop_found, hop) = self.check(&path, session);
            log_verdict(&path, &hop);
            found = hop_found;
            notice = notice.or(hop.notice);
            next = hop.outcome;
            current = path;
        }

        Ok(NavigationDecision {
            requested: intent.to.clone(),
            from: intent.from.clone(),
            outcome,
            route: found.as_ref().map(|found| found.entry.name.clone()),
            view: found.as_ref().map(|found| found.entry.view.clone()),
            found: found.is_some(),
            final_path: current,
            redirects,
            notice,
        })
    }
}

fn log_verdict(path: &str, verdict: &Verdict) {
    match verdict.state {
        GuardState::Allowed => tracing::debug!(path, "navigation allowed"),
        GuardState::DeniedUnauthenticated => {
            tracing::info!(path, outcome = ?verdict.outcome, "navigation denied: not signed in");
        }
        GuardState::DeniedInsufficientRole => {
            tracing::info!(path, outcome = ?verdict.outcome, "navigation denied: insufficient role");
        }
    }
}
