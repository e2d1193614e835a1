//! Navigation surface used by guards and the error hook.

use std::sync::Mutex;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const HOME_PATH: &str = "/dashboard";
pub const ROOT_PATH: &str = "/";

/// Performs a redirect. The UI-less client records or prints it.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that remembers every redirect, most recent last.
#[derive(Debug, Default)]
pub struct NavigationHistory {
    visited: Mutex<Vec<String>>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.visited
            .lock()
            .map(|v| v.last().cloned())
            .unwrap_or_default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Navigator for NavigationHistory {
    fn navigate(&self, path: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(path.to_string());
        }
    }
}
