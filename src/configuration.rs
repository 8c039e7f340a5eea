use crate::error::Error;
use reqwest::Url;
use std::time::Duration;

/// Base endpoint of the public bot API
pub const DEFAULT_BASE_URL: &str = "https://botapi.rubika.ir/v3/";

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Construction-time settings for a [`Client`](crate::Client)
///
/// A client copies its configuration when it is built, so changing a
/// `Configuration` afterwards never affects calls already in flight.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Bot API token, embedded percent-encoded in every request path
    bot_token: Option<String>,
    /// Base endpoint the token and method name are appended to
    base_url: String,
    /// Total time allowed for one call, connection included
    timeout: Duration,
    /// Optional `User-Agent` header value
    user_agent: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            bot_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl Configuration {
    /// Create a configuration for the given token with default settings
    pub fn new<S: AsRef<str>>(token: S) -> Self {
        let mut config = Configuration::default();
        config.set_bot_token(token);
        config
    }

    /// Set the bot API token
    pub fn set_bot_token<S: AsRef<str>>(&mut self, token: S) {
        self.bot_token = Some(token.as_ref().to_string());
    }

    /// Get the bot API token
    pub fn bot_token(&self) -> Result<&str, Error> {
        self.bot_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::configuration("Bot token not configured"))
    }

    /// Set the base endpoint
    pub fn set_base_url<S: AsRef<str>>(&mut self, base_url: S) {
        self.base_url = base_url.as_ref().to_string();
    }

    /// Get the base endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the per-call timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Get the per-call timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set the `User-Agent` header; an empty value clears it
    pub fn set_user_agent<S: AsRef<str>>(&mut self, user_agent: S) {
        let user_agent = user_agent.as_ref().to_string();
        self.user_agent = if user_agent.is_empty() {
            None
        } else {
            Some(user_agent)
        };
    }

    /// Get the `User-Agent` header value
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Error> {
        self.bot_token()?;

        let url = Url::parse(&self.base_url).map_err(|e| {
            Error::configuration(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::configuration(format!(
                "Invalid base URL scheme: '{}'. Must be 'http' or 'https'",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::configuration("Timeout must be greater than zero"));
        }

        Ok(())
    }
}
