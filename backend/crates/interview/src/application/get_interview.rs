//! Get Interview Use Case
//!
//! Serves session metadata and question prompts. Canonical answers never
//! leave this layer.

use std::sync::Arc;

use crate::application::verify_token::AuthTokenVerifier;
use crate::domain::entities::InterviewSession;
use crate::domain::repository::{AuthSessionRepository, InterviewRepository};
use crate::domain::value_objects::{InterviewId, QuestionId, UserId};
use crate::error::{InterviewError, InterviewResult};

/// A question as shown to the candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    pub question_id: QuestionId,
    pub prompt: String,
}

/// Output DTO for get interview
#[derive(Debug, Clone)]
pub struct GetInterviewOutput {
    pub session: InterviewSession,
    pub questions: Vec<QuestionPrompt>,
}

/// Get Interview Use Case
pub struct GetInterviewUseCase<S, C>
where
    S: AuthSessionRepository,
    C: InterviewRepository,
{
    verifier: AuthTokenVerifier<S>,
    catalog: Arc<C>,
}

impl<S, C> GetInterviewUseCase<S, C>
where
    S: AuthSessionRepository,
    C: InterviewRepository,
{
    pub fn new(session_repo: Arc<S>, catalog: Arc<C>) -> Self {
        Self {
            verifier: AuthTokenVerifier::new(session_repo),
            catalog,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        auth_token: &str,
        interview_id: InterviewId,
    ) -> InterviewResult<GetInterviewOutput> {
        if !self.verifier.is_authorized(user_id, auth_token).await {
            return Err(InterviewError::Unauthorized);
        }

        let session = self
            .catalog
            .find_session(interview_id)
            .await?
            .ok_or(InterviewError::InterviewNotFound)?;

        let questions = self
            .catalog
            .list_questions(interview_id)
            .await?
            .into_iter()
            .map(|q| QuestionPrompt {
                question_id: q.id,
                prompt: q.prompt,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            user_id = %user_id,
            interview_id = %interview_id,
            questions = questions.len(),
            "Interview served"
        );

        Ok(GetInterviewOutput { session, questions })
    }
}
