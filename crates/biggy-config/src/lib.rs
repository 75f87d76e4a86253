//! Centralized configuration for the Biggy service clients
//!
//! Configuration follows a simple hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. Environment variable overrides (`BIGGY_*`)
//! 3. Optional TOML file, whose missing keys fall back to 1 and 2
//! 4. Runtime validation
//!
//! Endpoint URLs may contain `{account}` and `{workspace}` placeholders. They
//! are substituted per owning context when a client is constructed.

pub mod error;
pub mod source;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use source::{ConfigurationLoader, ConfigurationSource, EnvironmentSource, TomlFileSource};
pub use validation::Validate;

use serde::{Deserialize, Serialize};

// =============================================================================
// SAFE DEFAULTS
// =============================================================================

// Upstream endpoints
const DEFAULT_SEARCH_URL: &str = "http://search.biggylabs.com.br/search-api/v1";
const DEFAULT_CATALOG_URL: &str = "http://{account}.vtexcommercestable.com.br";
const DEFAULT_CHECKOUT_URL: &str = "http://{account}.vtexcommercestable.com.br";
const DEFAULT_REWRITER_URL: &str = "http://app.io.vtex.com/vtex.rewriter/v1/{account}/{workspace}";
const DEFAULT_ALGOLIA_URL: &str = "https://{app_id}-dsn.algolia.net";

// Store context
const DEFAULT_WORKSPACE: &str = "master";

// HTTP transport
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_USER_AGENT: &str = concat!("biggy-clients/", env!("CARGO_PKG_VERSION"));

// Telemetry
const DEFAULT_TRACING_LEVEL: &str = "info";
const DEFAULT_JSON_LOGS: bool = true;

/// Core configuration for the Biggy clients and CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Store identity used to build owning contexts
    pub store: StoreConfig,

    /// Upstream service endpoints and credentials
    pub services: ServicesConfig,

    /// Outbound HTTP transport settings
    pub http: HttpConfig,

    /// Logging configuration
    pub telemetry: TelemetryConfig,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApplicationConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        Self {
            store: StoreConfig::from_env(),
            services: ServicesConfig::from_env(),
            http: HttpConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}

impl Validate for ApplicationConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.store.validate()?;
        self.services.validate()?;
        self.http.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

/// Store identity: which account and workspace requests are made for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Account name, also used as the Biggy store identifier.
    /// Empty means "must be supplied by the caller".
    pub account: String,

    /// Workspace name
    pub workspace: String,

    /// Auth token forwarded to VTEX platform services
    pub auth_token: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        let account = std::env::var("BIGGY_ACCOUNT").unwrap_or_default();
        let workspace =
            std::env::var("BIGGY_WORKSPACE").unwrap_or_else(|_| DEFAULT_WORKSPACE.to_string());
        let auth_token = std::env::var("BIGGY_AUTH_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        Self {
            account,
            workspace,
            auth_token,
        }
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_non_empty(&self.workspace, "store.workspace")
    }
}

/// A plain upstream endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// Base URL, possibly containing `{account}`/`{workspace}` placeholders
    pub base_url: String,
}

impl ServiceEndpoint {
    fn from_env_or(var: &str, default: &str) -> Self {
        Self {
            base_url: std::env::var(var).unwrap_or_else(|_| default.to_string()),
        }
    }
}

/// Algolia endpoint and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgoliaConfig {
    /// Base URL, possibly containing an `{app_id}` placeholder
    pub base_url: String,

    /// Algolia application id
    pub app_id: Option<String>,

    /// Algolia search-only API key
    pub api_key: Option<String>,
}

impl Default for AlgoliaConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AlgoliaConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("BIGGY_ALGOLIA_URL")
                .unwrap_or_else(|_| DEFAULT_ALGOLIA_URL.to_string()),
            app_id: std::env::var("BIGGY_ALGOLIA_APP_ID").ok(),
            api_key: std::env::var("BIGGY_ALGOLIA_API_KEY").ok(),
        }
    }
}

/// Endpoints for every upstream service the registry can construct
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Biggy search API
    pub search: ServiceEndpoint,

    /// Algolia search
    pub algolia: AlgoliaConfig,

    /// VTEX checkout
    pub checkout: ServiceEndpoint,

    /// VTEX rewriter (internal routes)
    pub rewriter: ServiceEndpoint,

    /// VTEX catalog
    pub catalog: ServiceEndpoint,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ServicesConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        Self {
            search: ServiceEndpoint::from_env_or("BIGGY_SEARCH_URL", DEFAULT_SEARCH_URL),
            algolia: AlgoliaConfig::from_env(),
            checkout: ServiceEndpoint::from_env_or("BIGGY_CHECKOUT_URL", DEFAULT_CHECKOUT_URL),
            rewriter: ServiceEndpoint::from_env_or("BIGGY_REWRITER_URL", DEFAULT_REWRITER_URL),
            catalog: ServiceEndpoint::from_env_or("BIGGY_CATALOG_URL", DEFAULT_CATALOG_URL),
        }
    }
}

impl Validate for ServicesConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_url(&self.search.base_url, "services.search.base_url")?;
        validation::validate_url(&self.algolia.base_url, "services.algolia.base_url")?;
        validation::validate_url(&self.checkout.base_url, "services.checkout.base_url")?;
        validation::validate_url(&self.rewriter.base_url, "services.rewriter.base_url")?;
        validation::validate_url(&self.catalog.base_url, "services.catalog.base_url")?;
        // Algolia credentials are checked when the client is constructed,
        // so contexts that never touch Algolia don't need them.
        Ok(())
    }
}

/// Outbound HTTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl HttpConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        let timeout_seconds = std::env::var("BIGGY_HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECONDS);

        let user_agent = std::env::var("BIGGY_HTTP_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Self {
            timeout_seconds,
            user_agent,
        }
    }

    /// Request timeout as a [`std::time::Duration`]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_range(self.timeout_seconds, 1, 300, "http.timeout_seconds")?;
        validation::validate_non_empty(&self.user_agent, "http.user_agent")?;
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Default tracing level when `RUST_LOG` is unset
    pub tracing_level: String,

    /// Emit JSON log lines instead of human-readable text
    pub json_logs: bool,

    /// Directory for rotated log files; `None` falls back to the OS-specific
    /// default log directory
    pub log_dir: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        let tracing_level = std::env::var("BIGGY_TRACING_LEVEL")
            .unwrap_or_else(|_| DEFAULT_TRACING_LEVEL.to_string());

        let json_logs = std::env::var("BIGGY_JSON_LOGS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_JSON_LOGS);

        let log_dir = std::env::var("BIGGY_LOG_DIR").ok();

        Self {
            tracing_level,
            json_logs,
            log_dir,
        }
    }
}

impl Validate for TelemetryConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.tracing_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::Generic {
                message: format!("Invalid tracing level: {}", self.tracing_level),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_uses_safe_defaults() {
        let config = ApplicationConfig::from_env();
        assert!(!config.services.search.base_url.is_empty());
        assert!(config.http.timeout_seconds > 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_invalid_urls() {
        let mut config = ApplicationConfig::from_env();
        config.services.catalog.base_url = "not-a-valid-url".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { ref field, .. } if field == "services.catalog.base_url"));
    }

    #[test]
    fn test_config_validation_rejects_zero_timeout() {
        let mut config = ApplicationConfig::from_env();
        config.http.timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_config_validation_rejects_unknown_tracing_level() {
        let mut config = ApplicationConfig::from_env();
        config.telemetry.tracing_level = "loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Generic { .. })));
    }

    #[test]
    fn test_config_can_be_serialized_to_toml() {
        let config = ApplicationConfig::from_env();
        let toml_string = toml::to_string(&config).unwrap();
        assert!(toml_string.contains("search"));
        assert!(toml_string.contains("base_url"));
        assert!(toml_string.contains("timeout_seconds"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: ApplicationConfig = toml::from_str(
            r#"
            [services.search]
            base_url = "http://localhost:9000/search-api/v1"
            "#,
        )
        .unwrap();

        assert_eq!(
            parsed.services.search.base_url,
            "http://localhost:9000/search-api/v1"
        );
        assert_eq!(
            parsed.services.catalog.base_url,
            ServicesConfig::from_env().catalog.base_url
        );
        assert_eq!(parsed.http.timeout_seconds, HttpConfig::from_env().timeout_seconds);
    }

    #[test]
    fn test_environment_variable_overrides() {
        unsafe {
            std::env::set_var("BIGGY_REWRITER_URL", "http://rewriter.internal");
        }

        let config = ServicesConfig::from_env();
        assert_eq!(config.rewriter.base_url, "http://rewriter.internal");

        unsafe {
            std::env::remove_var("BIGGY_REWRITER_URL");
        }
    }

    #[test]
    fn test_http_timeout_duration() {
        let config = HttpConfig {
            timeout_seconds: 7,
            user_agent: "test".to_string(),
        };
        assert_eq!(config.timeout(), std::time::Duration::from_secs(7));
    }
}
