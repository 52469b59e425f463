//! List History Use Case

use std::sync::Arc;

use crate::application::verify_token::AuthTokenVerifier;
use crate::domain::entities::HistoryEntry;
use crate::domain::repository::{AuthSessionRepository, HistoryRepository};
use crate::domain::value_objects::UserId;
use crate::error::{InterviewError, InterviewResult};

/// Lists the authenticated user's own history, newest first
pub struct ListHistoryUseCase<S, H>
where
    S: AuthSessionRepository,
    H: HistoryRepository,
{
    verifier: AuthTokenVerifier<S>,
    history_repo: Arc<H>,
}

impl<S, H> ListHistoryUseCase<S, H>
where
    S: AuthSessionRepository,
    H: HistoryRepository,
{
    pub fn new(session_repo: Arc<S>, history_repo: Arc<H>) -> Self {
        Self {
            verifier: AuthTokenVerifier::new(session_repo),
            history_repo,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        auth_token: &str,
    ) -> InterviewResult<Vec<HistoryEntry>> {
        if !self.verifier.is_authorized(user_id, auth_token).await {
            return Err(InterviewError::Unauthorized);
        }

        self.history_repo.list_by_user(user_id).await
    }
}
