//! Sign In Use Case
//!
//! Verifies the password and issues a fresh auth token. Only the token
//! digest is stored, and it replaces whatever token the user held before.

use std::sync::Arc;

use chrono::Utc;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::InterviewConfig;
use crate::domain::entities::AuthSession;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_objects::{UserId, UserName};
use crate::error::{InterviewError, InterviewResult};

/// Input for sign in
#[derive(Debug)]
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Output of sign in
#[derive(Debug, Clone)]
pub struct SignInOutput {
    pub user_id: UserId,
    /// Clear text token; returned once, never stored
    pub auth_token: String,
    pub expires_at_ms: Option<i64>,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<InterviewConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<InterviewConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> InterviewResult<SignInOutput> {
        // Malformed names cannot exist in the store
        let user_name =
            UserName::new(&input.user_name).map_err(|_| InterviewError::InvalidCredentials)?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|_| InterviewError::InvalidCredentials)?;

        let account = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(InterviewError::InvalidCredentials)?;

        let stored = HashedPassword::from_phc_string(account.password_hash.as_str())
            .map_err(|e| InterviewError::Internal(format!("user {}: {}", account.id, e)))?;
        let verified = stored
            .verify(&password)
            .map_err(|e| InterviewError::Internal(e.to_string()))?;
        if !verified {
            tracing::debug!(user_id = %account.id, "Password mismatch");
            return Err(InterviewError::InvalidCredentials);
        }

        let auth_token = platform::crypto::random_token();
        let expires_at_ms = self.config.auth_token_ttl.map(|ttl| {
            let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
            Utc::now().timestamp_millis().saturating_add(ttl_ms)
        });

        self.session_repo
            .save(&AuthSession::new(account.id, &auth_token, expires_at_ms))
            .await?;

        tracing::info!(user_id = %account.id, "User signed in");

        Ok(SignInOutput {
            user_id: account.id,
            auth_token,
            expires_at_ms,
        })
    }
}
