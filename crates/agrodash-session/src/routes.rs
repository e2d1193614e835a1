//! Dashboard route table.
//!
//! Routes are matched in declaration order; the first pattern that fits
//! wins. Patterns are `/`-separated literals with `:name` placeholders.

use std::collections::BTreeMap;

use agrodash_core::models::user::Role;
use agrodash_core::navigation::{LOGIN_PATH, REGISTER_PATH, ROOT_PATH};

/// Who may enter a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Only visitors without a session (landing, login, register).
    Anonymous,
    /// Any signed-in user, optionally restricted to `roles`.
    Authenticated { roles: Option<Vec<Role>> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub pattern: String,
    pub access: Access,
}

impl Route {
    pub fn anonymous(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            access: Access::Anonymous,
        }
    }

    pub fn authenticated(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            access: Access::Authenticated { roles: None },
        }
    }

    pub fn with_roles(pattern: &str, roles: &[Role]) -> Self {
        Self {
            pattern: pattern.to_string(),
            access: Access::Authenticated {
                roles: Some(roles.to_vec()),
            },
        }
    }

    /// Declared role list, if the route restricts roles.
    pub fn roles(&self) -> Option<&[Role]> {
        match &self.access {
            Access::Authenticated { roles } => roles.as_deref(),
            Access::Anonymous => None,
        }
    }

    /// Match `path` against this route, returning the captured params.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let mut pattern = segments(&self.pattern);
        let mut actual = segments(path);
        let mut params = BTreeMap::new();

        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return Some(params),
                (Some(p), Some(a)) => match p.strip_prefix(':') {
                    Some(name) => {
                        params.insert(name.to_string(), a.to_string());
                    }
                    None if p == a => {}
                    None => return None,
                },
                _ => return None,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty())
}

/// Outcome of looking a path up in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Matched {
        route: &'a Route,
        params: BTreeMap<String, String>,
    },
    /// No route matched; the caller should go to this path instead.
    Redirect(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        self.routes
            .iter()
            .find_map(|route| {
                route
                    .matches(path)
                    .map(|params| Resolution::Matched { route, params })
            })
            .unwrap_or(Resolution::Redirect(ROOT_PATH))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        let mut routes = vec![
            Route::anonymous(ROOT_PATH),
            Route::anonymous(LOGIN_PATH),
            Route::anonymous(REGISTER_PATH),
            Route::authenticated("/dashboard"),
        ];

        for section in ["farms", "parcels", "crops", "irrigations", "fertilizations"] {
            let base = format!("/dashboard/{section}");
            routes.push(Route::authenticated(&base));
            routes.push(Route::authenticated(&format!("{base}/new")));
            routes.push(Route::authenticated(&format!("{base}/:id")));
            routes.push(Route::authenticated(&format!("{base}/:id/edit")));
        }

        routes.push(Route::authenticated("/dashboard/profile"));
        routes.push(Route::with_roles("/dashboard/admin/users", &[Role::Admin]));
        routes.push(Route::with_roles("/dashboard/admin/users/:id", &[Role::Admin]));

        Self::new(routes)
    }
}
