//! Client configuration parsed from environment variables.
//!
//! The hosting page supplies the API location, page id and CSRF token; the
//! binary reads the same values from the environment (or `.env`).

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_BASE_URL: &str = "REVIEW_API_BASE_URL";
pub const ENV_PAGE_ID: &str = "REVIEW_PAGE_ID";
pub const ENV_SHARES_URL: &str = "REVIEW_SHARES_URL";
pub const ENV_COMMENTS_URL: &str = "REVIEW_COMMENTS_URL";
pub const ENV_CSRF_HEADER: &str = "REVIEW_CSRF_HEADER";
pub const ENV_CSRF_TOKEN: &str = "REVIEW_CSRF_TOKEN";
pub const ENV_SESSION_COOKIE: &str = "REVIEW_SESSION_COOKIE";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REVIEW_REQUEST_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "REVIEW_CONNECT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("missing config: {var} not set")]
    Missing { var: &'static str },

    /// A setting is present but malformed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Admin API root, without a trailing slash.
    pub api_base_url: String,
    pub page_id: Option<i64>,
    pub shares_url: Option<String>,
    pub comments_url: Option<String>,
    pub csrf_header: String,
    pub csrf_token: Option<String>,
    /// Sent verbatim as the `Cookie` header on every request.
    pub session_cookie: Option<String>,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            page_id: None,
            shares_url: None,
            comments_url: None,
            csrf_header: DEFAULT_CSRF_HEADER.to_owned(),
            csrf_token: None,
            session_cookie: None,
            timeouts: Timeouts::default(),
        }
    }

    /// Build config from environment variables.
    ///
    /// Required:
    /// - `REVIEW_API_BASE_URL`
    ///
    /// Optional:
    /// - `REVIEW_PAGE_ID`: needed for share and comment endpoints
    /// - `REVIEW_SHARES_URL`, `REVIEW_COMMENTS_URL`: explicit endpoint URLs
    /// - `REVIEW_CSRF_HEADER`: default `X-CSRFToken`
    /// - `REVIEW_CSRF_TOKEN`, `REVIEW_SESSION_COOKIE`
    /// - `REVIEW_REQUEST_TIMEOUT_SECS`: default 30
    /// - `REVIEW_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing, the page id is not an
    /// integer, or a timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let base = get(ENV_API_BASE_URL).ok_or(ConfigError::Missing { var: ENV_API_BASE_URL })?;
        let mut config = Self::new(&base);

        config.page_id = get(ENV_PAGE_ID)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| ConfigError::Parse(format!("{ENV_PAGE_ID} must be an integer, got {raw:?}")))
            })
            .transpose()?;
        config.shares_url = get(ENV_SHARES_URL);
        config.comments_url = get(ENV_COMMENTS_URL);
        if let Some(header) = get(ENV_CSRF_HEADER) {
            config.csrf_header = header;
        }
        config.csrf_token = get(ENV_CSRF_TOKEN);
        config.session_cookie = get(ENV_SESSION_COOKIE);
        config.timeouts = Timeouts {
            request_secs: parse_timeout(ENV_REQUEST_TIMEOUT_SECS, get(ENV_REQUEST_TIMEOUT_SECS))?
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_timeout(ENV_CONNECT_TIMEOUT_SECS, get(ENV_CONNECT_TIMEOUT_SECS))?
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(config)
    }

    /// `page/{id}/shares/` under the base URL, unless overridden.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if neither an override nor a page id is set.
    pub fn shares_url(&self) -> Result<String, ConfigError> {
        self.page_endpoint(self.shares_url.as_deref(), "shares")
    }

    /// `page/{id}/comments/` under the base URL, unless overridden.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if neither an override nor a page id is set.
    pub fn comments_url(&self) -> Result<String, ConfigError> {
        self.page_endpoint(self.comments_url.as_deref(), "comments")
    }

    #[must_use]
    pub fn users_url(&self) -> String {
        format!("{}/users/", self.api_base_url)
    }

    #[must_use]
    pub fn reviewers_url(&self) -> String {
        format!("{}/reviewers/", self.api_base_url)
    }

    fn page_endpoint(&self, explicit: Option<&str>, leaf: &str) -> Result<String, ConfigError> {
        if let Some(url) = explicit {
            return Ok(url.to_owned());
        }
        let page_id = self.page_id.ok_or(ConfigError::Missing { var: ENV_PAGE_ID })?;
        Ok(format!("{}/page/{page_id}/{leaf}/", self.api_base_url))
    }
}

/// Timeouts are whole seconds and must be positive.
fn parse_timeout(var: &'static str, raw: Option<String>) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(secs)),
        _ => Err(ConfigError::Parse(format!("{var} must be a positive integer, got {raw:?}"))),
    }
}
