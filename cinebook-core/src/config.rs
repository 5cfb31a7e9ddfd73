//! Client configuration and user identity
//!
//! Both are built once at startup and handed to their consumers; nothing
//! reads the environment after that.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Default timeout for every API call, including booking submission
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Identity used when none is configured outside production
pub const ANONYMOUS_EMAIL: &str = "user@example.com";

/// Where and how to reach the cinema API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiConfig {
    /// Validate `base_url`. A trailing slash is optional.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingApiUrl);
        }
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: trimmed.to_string(),
            reason,
        };
        let mut url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            base_url: url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for an API path such as `movies/now-playing`
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ConfigError::InvalidApiUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }
}

/// Who is booking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserIdentity {
    email: String,
}

impl UserIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Test identity, for development use only
    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS_EMAIL)
    }

    /// Pick the configured identity, falling back to the anonymous one only
    /// outside production.
    pub fn resolve(email: Option<&str>, production: bool) -> Result<Self, ConfigError> {
        match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => Ok(Self::new(email)),
            None if production => Err(ConfigError::MissingIdentity),
            None => {
                tracing::warn!(email = ANONYMOUS_EMAIL, "no user email configured, booking anonymously");
                Ok(Self::anonymous())
            }
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_anonymous(&self) -> bool {
        self.email == ANONYMOUS_EMAIL
    }
}
