//! Wiring: one session, one connection, every client.

use std::sync::Arc;

use agrodash_core::navigation::Navigator;
use agrodash_http::resources::HttpAuthApi;
use agrodash_http::{AgroApi, ApiClient, ApiConfig, ErrorInterceptor, ExportClient};
use agrodash_session::{
    FileCredentialStore, GuardedRouter, RouteTable, SessionConfig, SessionService, SessionState,
};
use anyhow::{Context, Result};
use tracing::info;

/// The terminal has no screens to switch; redirects are reported.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!(path, "Navigate");
    }
}

pub struct App {
    pub api: AgroApi,
    pub session: SessionService<HttpAuthApi>,
    pub export: ExportClient,
    pub router: GuardedRouter,
}

impl App {
    pub fn connect(api_config: &ApiConfig, session_config: &SessionConfig) -> Result<Self> {
        let store = FileCredentialStore::new(&session_config.storage_path);
        let state = SessionState::hydrate(Arc::new(store));
        let navigator: Arc<dyn Navigator> = Arc::new(LogNavigator);

        let interceptor = ErrorInterceptor::new(state.clone(), navigator.clone());
        let client = ApiClient::new(api_config, state.clone(), interceptor)
            .with_context(|| format!("connecting to {}", api_config.base_url))?;
        info!(base_url = %client.base_url(), "Client ready");

        let api = AgroApi::new(client.clone());
        Ok(Self {
            session: SessionService::new(api.auth.clone(), state.clone()),
            export: ExportClient::new(client),
            router: GuardedRouter::new(RouteTable::default(), state, navigator),
            api,
        })
    }
}
