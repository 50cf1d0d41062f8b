use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::transport::{ReqwestTransport, Transport};
use crate::api::{ApiClient, AuthEvent};
use crate::cache::QueryCache;
use crate::config::Config;
use crate::session::SessionStore;

/// Explicitly constructed application context passed to the operation layer.
/// Session Store and Query Cache are process-wide singletons by convention,
/// not ambient globals: everything reaches them through this struct.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub cache: Arc<QueryCache>,
    pub api: Arc<ApiClient>,
}

impl AppContext {
    /// Full startup sequence: config from env, session rehydration, reqwest
    /// transport with the fixed request timeout.
    pub fn bootstrap() -> Result<Self> {
        let config = Config::from_env()?;
        let transport = Arc::new(ReqwestTransport::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?);
        Ok(Self::assemble(config, transport))
    }

    /// Wires the context around any transport; tests inject a scripted one.
    pub fn assemble(config: Config, transport: Arc<dyn Transport>) -> Self {
        let session = Arc::new(SessionStore::open(config.session_file.clone()));
        info!(
            "Session store opened ({})",
            if session.is_authenticated() {
                "authenticated"
            } else {
                "unauthenticated"
            }
        );
        let cache = Arc::new(QueryCache::new());
        let api = Arc::new(ApiClient::new(transport, session.clone(), cache.clone()));
        info!("API client initialized (base: {})", config.api_base_url);
        Self {
            config,
            session,
            cache,
            api,
        }
    }

    /// Auth event stream for the navigation shell (forced-logout redirects).
    pub fn auth_events(&self) -> watch::Receiver<AuthEvent> {
        self.api.subscribe_auth_events()
    }
}

/// Initialize structured logging. Call once at application start.
pub fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
