//! Auth Token Verifier
//!
//! Boolean gate in front of every interview use case.

use std::sync::Arc;

use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_objects::UserId;

/// Checks a presented token against the session issued to a user
pub struct AuthTokenVerifier<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> Clone for AuthTokenVerifier<S>
where
    S: AuthSessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            session_repo: self.session_repo.clone(),
        }
    }
}

impl<S> AuthTokenVerifier<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// True only if `token` is the token currently issued to `user_id`
    ///
    /// Never fails: unknown users, expired sessions and lookup errors all
    /// answer `false`.
    pub async fn is_authorized(&self, user_id: UserId, token: &str) -> bool {
        let session = match self.session_repo.find_by_user_id(user_id).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                tracing::debug!(user_id = %user_id, "No auth session for user");
                return false;
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Auth session lookup failed, denying request"
                );
                return false;
            }
        };

        if session.is_expired() {
            tracing::debug!(user_id = %user_id, "Auth session expired");
            return false;
        }

        session.matches(token)
    }
}
