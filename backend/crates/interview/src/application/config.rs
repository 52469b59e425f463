//! Application Configuration
//!
//! Configuration for the interview application layer.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// What a submission does when the history append fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFailurePolicy {
    /// Return the computed summary anyway and log a warning
    #[default]
    Warn,
    /// Fail the whole submission with `HistoryUnavailable`
    Propagate,
}

impl HistoryFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryFailurePolicy::Warn => "warn",
            HistoryFailurePolicy::Propagate => "propagate",
        }
    }
}

impl fmt::Display for HistoryFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(HistoryFailurePolicy::Warn),
            "propagate" => Ok(HistoryFailurePolicy::Propagate),
            other => Err(format!(
                "unknown history failure policy '{}', expected 'warn' or 'propagate'",
                other
            )),
        }
    }
}

/// Interview application configuration
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    /// Request header carrying the auth token
    pub auth_header_name: String,
    /// Reaction to a failed history append
    pub history_failure_policy: HistoryFailurePolicy,
    /// Lifetime of tokens issued at sign-in; `None` keeps them until the next sign-in
    pub auth_token_ttl: Option<Duration>,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            auth_header_name: "auth".to_string(),
            history_failure_policy: HistoryFailurePolicy::Warn,
            auth_token_ttl: None,
        }
    }
}

impl InterviewConfig {
    /// Defaults with overrides read through `lookup`
    ///
    /// Recognized keys: `HISTORY_FAILURE_POLICY`, `AUTH_HEADER_NAME`,
    /// `AUTH_TOKEN_TTL_SECS`. The result does not depend on the build profile.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("HISTORY_FAILURE_POLICY") {
            config.history_failure_policy = raw.parse()?;
        }

        if let Some(name) = lookup("AUTH_HEADER_NAME") {
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return Err("AUTH_HEADER_NAME must not be empty".to_string());
            }
            config.auth_header_name = name;
        }

        if let Some(raw) = lookup("AUTH_TOKEN_TTL_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("invalid AUTH_TOKEN_TTL_SECS '{}': {}", raw, e))?;
            config.auth_token_ttl = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_history_failure_policy(mut self, policy: HistoryFailurePolicy) -> Self {
        self.history_failure_policy = policy;
        self
    }

    pub fn with_auth_token_ttl(mut self, ttl: Duration) -> Self {
        self.auth_token_ttl = Some(ttl);
        self
    }
}
