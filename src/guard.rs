use crate::{
    config::AppConfig,
    models::{AccessRequirement, DenialNotice, NavigationOutcome, RouteEntry},
    session::SessionSnapshot,
};

/// GuardState
///
/// Terminal states of one guard evaluation. Every evaluation starts `Pending` (the target entry
/// plus a snapshot) and ends in exactly one of these; nothing carries over to the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Allowed,
    DeniedUnauthenticated,
    DeniedInsufficientRole,
}

/// Verdict
///
/// What the caller must apply: the outcome, plus a notice to show before redirecting when the
/// denial was for insufficient role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub state: GuardState,
    pub outcome: NavigationOutcome,
    pub notice: Option<DenialNotice>,
}

/// GuardPolicy
///
/// Where denied navigations are sent, which role counts as admin, and the text of the
/// insufficient-role notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPolicy {
    pub login_path: String,
    pub home_path: String,
    pub admin_role: String,
    pub denial_message: String,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
            admin_role: "admin".to_string(),
            denial_message: "Only administrators can access this page".to_string(),
        }
    }
}

impl GuardPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            denial_message: config.denial_message.clone(),
            ..Self::default()
        }
    }
}

/// NavigationGuard
///
/// The single authorization decision point. Pure and total: the same entry and snapshot always
/// produce the same verdict, and it never touches the session store or the router itself.
#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    policy: GuardPolicy,
}

impl NavigationGuard {
    pub fn new(policy: GuardPolicy) -> Self {
        Self { policy }
    }

    /// decide
    ///
    /// Runs the state machine. An unknown route (`None`) is treated as public so the hosting
    /// router's own not-found handling can take over. Authentication is checked strictly before
    /// role: anonymous visitors never see the admin-only denial.
    pub fn decide(&self, access: Option<AccessRequirement>, session: &SessionSnapshot) -> GuardState {
        let access = access.unwrap_or(AccessRequirement::Public);

        if !access.requires_auth() {
            return GuardState::Allowed;
        }
        if !session.is_authenticated() {
            return GuardState::DeniedUnauthenticated;
        }
        if access.requires_admin() && !session.has_role(&self.policy.admin_role) {
            return GuardState::DeniedInsufficientRole;
        }
        GuardState::Allowed
    }

    /// evaluate
    ///
    /// `decide`, mapped to the outcome the caller applies.
    pub fn evaluate(&self, route: Option<&RouteEntry>, session: &SessionSnapshot) -> Verdict {
        let state = self.decide(route.map(|entry| entry.access), session);

        let (outcome, notice) = match state {
            GuardState::Allowed => (NavigationOutcome::Proceed, None),
            GuardState::DeniedUnauthenticated => {
                (NavigationOutcome::redirect(&self.policy.login_path), None)
            }
            GuardState::DeniedInsufficientRole => (
                NavigationOutcome::redirect(&self.policy.home_path),
                Some(DenialNotice {
                    message: self.policy.denial_message.clone(),
                }),
            ),
        };

        Verdict {
            state,
            outcome,
            notice,
        }
    }
}
