//! Configuration types for the Gitea backend.

use crate::errors::{ProviderError, ProviderErrorKind};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "integrations-gitea/0.1.0";

/// Default interval between fork-readiness probes.
pub const DEFAULT_FORK_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default total time to wait for a fork to materialize.
pub const DEFAULT_FORK_POLL_DEADLINE: Duration = Duration::from_secs(60);

/// Polling parameters for eventually-consistent fork creation.
///
/// Gitea acknowledges a fork request before the new repository is queryable,
/// so the adapter probes until the repository appears or the deadline passes.
#[derive(Debug, Clone)]
pub struct ForkPollConfig {
    /// Time to sleep between probes.
    pub interval: Duration,
    /// Total time to wait before giving up.
    pub deadline: Duration,
}

impl Default for ForkPollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_FORK_POLL_INTERVAL,
            deadline: DEFAULT_FORK_POLL_DEADLINE,
        }
    }
}

/// Gitea backend configuration.
#[derive(Debug, Clone)]
pub struct GiteaConfig {
    /// Server base URL, e.g. `https://gitea.example.com`.
    pub server_url: String,
    /// API token for the authenticated identity.
    pub token: Option<SecretString>,
    /// Username of the authenticated identity.
    ///
    /// Used wherever an empty owner or organisation means "the current user".
    pub username: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Fork-readiness polling parameters.
    pub fork_poll: ForkPollConfig,
}

impl Default for GiteaConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            token: None,
            username: String::new(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fork_poll: ForkPollConfig::default(),
        }
    }
}

impl GiteaConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GiteaConfigBuilder {
        GiteaConfigBuilder::new()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.server_url.is_empty() {
            return Err(ProviderError::new(
                ProviderErrorKind::InvalidServerUrl,
                "Server URL cannot be empty",
            ));
        }

        let parsed = Url::parse(&self.server_url).map_err(|e| {
            ProviderError::new(
                ProviderErrorKind::InvalidServerUrl,
                format!("Invalid server URL: {}", e),
            )
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ProviderError::new(
                ProviderErrorKind::InvalidServerUrl,
                "Server URL must start with http:// or https://",
            ));
        }

        if self.token.is_none() {
            return Err(ProviderError::new(
                ProviderErrorKind::MissingToken,
                "API token is required",
            ));
        }

        if self.username.is_empty() {
            return Err(ProviderError::configuration(
                "Username of the authenticated identity is required",
            ));
        }

        Ok(())
    }

    /// The server URL without a trailing slash.
    pub fn server_root(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    /// The REST API base, `{server}/api/v1`.
    pub fn api_base(&self) -> String {
        format!("{}/api/v1", self.server_root())
    }
}

/// Builder for GiteaConfig.
#[derive(Debug, Default)]
pub struct GiteaConfigBuilder {
    server_url: Option<String>,
    token: Option<SecretString>,
    username: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    fork_poll: Option<ForkPollConfig>,
}

impl GiteaConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server URL.
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Sets the API token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Sets the authenticated username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the fork-readiness polling parameters.
    pub fn fork_poll(mut self, config: ForkPollConfig) -> Self {
        self.fork_poll = Some(config);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Result<GiteaConfig, ProviderError> {
        let config = GiteaConfig {
            server_url: self.server_url.unwrap_or_default(),
            token: self.token,
            username: self.username.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            fork_poll: self.fork_poll.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
