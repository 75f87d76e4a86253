//! Owning context shared by every client of one registry

use crate::error::{ClientError, Result};
use biggy_common::CorrelationId;
use biggy_config::{ApplicationConfig, HttpConfig, ServicesConfig};
use std::time::Duration;

/// Request-scoped identity and settings a client is bound to
///
/// One context backs one [`Clients`](crate::Clients) registry. Clients copy
/// what they need out of it at construction, so the context itself is never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct IoContext {
    account: String,
    workspace: String,
    auth_token: Option<String>,
    operation_id: CorrelationId,
    services: ServicesConfig,
    http: HttpConfig,
}

impl IoContext {
    /// Create a context for a store, with endpoints and transport settings
    /// taken from the environment
    pub fn new(account: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            workspace: workspace.into(),
            auth_token: None,
            operation_id: CorrelationId::new(),
            services: ServicesConfig::from_env(),
            http: HttpConfig::from_env(),
        }
    }

    /// Build a context from loaded application configuration
    ///
    /// # Errors
    /// Returns `ClientError::Configuration` when no store account is configured
    pub fn from_config(config: &ApplicationConfig) -> Result<Self> {
        if config.store.account.trim().is_empty() {
            return Err(ClientError::Configuration(
                "store account is not configured".to_string(),
            ));
        }

        Ok(Self {
            account: config.store.account.clone(),
            workspace: config.store.workspace.clone(),
            auth_token: config.store.auth_token.clone(),
            operation_id: CorrelationId::new(),
            services: config.services.clone(),
            http: config.http.clone(),
        })
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_operation_id(mut self, operation_id: CorrelationId) -> Self {
        self.operation_id = operation_id;
        self
    }

    #[must_use]
    pub fn with_services(mut self, services: ServicesConfig) -> Self {
        self.services = services;
        self
    }

    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub const fn operation_id(&self) -> &CorrelationId {
        &self.operation_id
    }

    pub const fn services(&self) -> &ServicesConfig {
        &self.services
    }

    pub const fn http(&self) -> &HttpConfig {
        &self.http
    }

    /// Substitute `{account}` and `{workspace}` in an endpoint template
    ///
    /// The trailing `/` is dropped so callers can always append `/path`.
    pub fn endpoint(&self, template: &str) -> String {
        template
            .replace("{account}", &self.account)
            .replace("{workspace}", &self.workspace)
            .trim_end_matches('/')
            .to_string()
    }

    /// Fail unless the context names a store
    ///
    /// # Errors
    /// Returns `ClientError::Configuration` for an empty account
    pub fn require_account(&self) -> Result<&str> {
        if self.account.trim().is_empty() {
            Err(ClientError::Configuration(
                "store account is required to construct this client".to_string(),
            ))
        } else {
            Ok(&self.account)
        }
    }
}

/// Per-registry options applied to every client it constructs
#[derive(Debug, Clone, Default)]
pub struct InstanceOptions {
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
}

impl InstanceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the transport timeout from [`HttpConfig`]
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send an extra header with every request
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}
