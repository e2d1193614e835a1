//! Route guards.
//!
//! Each gate is a pure function of the current identity and the target
//! route. [`GuardedRouter`] strings the gates together, follows redirect
//! chains and performs the final navigation.

use std::collections::BTreeMap;
use std::sync::Arc;

use agrodash_core::models::session::Identity;
use agrodash_core::models::user::Role;
use agrodash_core::navigation::{HOME_PATH, LOGIN_PATH, Navigator, ROOT_PATH};
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::routes::{Access, Resolution, Route, RouteTable};
use crate::state::SessionState;

/// Redirect hops followed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(&'static str),
}

/// Signed-in users only.
pub fn authenticated_gate(identity: Option<&Identity>) -> GateDecision {
    match identity {
        Some(_) => GateDecision::Allow,
        None => GateDecision::Redirect(LOGIN_PATH),
    }
}

/// Visitors without a session only.
pub fn anonymous_gate(identity: Option<&Identity>) -> GateDecision {
    match identity {
        Some(_) => GateDecision::Redirect(HOME_PATH),
        None => GateDecision::Allow,
    }
}

/// Signed-in users whose role is in `roles`. No list admits every role.
pub fn role_gate(identity: Option<&Identity>, roles: Option<&[Role]>) -> GateDecision {
    let Some(identity) = identity else {
        return GateDecision::Redirect(LOGIN_PATH);
    };
    match roles {
        Some(roles) if !roles.contains(&identity.role()) => GateDecision::Redirect(ROOT_PATH),
        _ => GateDecision::Allow,
    }
}

/// Run the route's gates in order; the first redirect wins.
pub fn evaluate(identity: Option<&Identity>, route: &Route) -> GateDecision {
    match &route.access {
        Access::Anonymous => anonymous_gate(identity),
        Access::Authenticated { roles } => match authenticated_gate(identity) {
            GateDecision::Allow => role_gate(identity, roles.as_deref()),
            redirect => redirect,
        },
    }
}

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub location: String,
    pub params: BTreeMap<String, String>,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.location
    }
}

pub struct GuardedRouter {
    table: RouteTable,
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
}

impl GuardedRouter {
    pub fn new(
        table: RouteTable,
        session: Arc<SessionState>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            table,
            session,
            navigator,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `path`, following guard redirects.
    ///
    /// The navigator is called once, with the final location.
    pub fn navigate(&self, path: &str) -> Result<Navigation, SessionError> {
        let identity = self.session.current_identity();
        let mut location = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let next = match self.table.resolve(&location) {
                Resolution::Redirect(to) => to,
                Resolution::Matched { route, params } => match evaluate(identity.as_ref(), route) {
                    GateDecision::Allow => {
                        debug!(requested = %path, location = %location, "Navigation allowed");
                        self.navigator.navigate(&location);
                        return Ok(Navigation {
                            requested: path.to_string(),
                            location,
                            params,
                        });
                    }
                    GateDecision::Redirect(to) => to,
                },
            };
            debug!(from = %location, to = %next, "Guard redirect");
            location = next.to_string();
        }

        warn!(requested = %path, "Redirect limit reached");
        Err(SessionError::RedirectLoop(path.to_string()))
    }
}
