//! Submit Answers Use Case
//!
//! Gate on the auth token, resolve the session and its answer key, grade
//! every answer in order, then record the outcome. Rejections and catalog
//! failures happen before any grading.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::{HistoryFailurePolicy, InterviewConfig};
use crate::application::grade_answer::AnswerGrader;
use crate::application::record_history::HistoryRecorder;
use crate::application::verify_token::AuthTokenVerifier;
use crate::domain::entities::{ScoreSummary, SubmittedAnswer};
use crate::domain::repository::{AuthSessionRepository, HistoryRepository, InterviewRepository};
use crate::domain::value_objects::{InterviewId, ScoreTally, UserId};
use crate::error::{InterviewError, InterviewResult};

/// Input DTO for submit answers
#[derive(Debug, Clone)]
pub struct SubmitAnswersInput {
    pub user_id: UserId,
    pub auth_token: String,
    pub interview_id: InterviewId,
    /// Graded in this order; duplicates are graded independently
    pub answers: Vec<SubmittedAnswer>,
}

/// Output DTO for submit answers
#[derive(Debug, Clone)]
pub struct SubmitAnswersOutput {
    pub summary: ScoreSummary,
    /// False only under `HistoryFailurePolicy::Warn` when the append failed
    pub history_recorded: bool,
}

/// Session scorer
pub struct SessionScorer<S, C, H>
where
    S: AuthSessionRepository,
    C: InterviewRepository,
    H: HistoryRepository,
{
    verifier: AuthTokenVerifier<S>,
    catalog: Arc<C>,
    grader: AnswerGrader<C>,
    recorder: HistoryRecorder<H>,
    config: Arc<InterviewConfig>,
}

impl<S, C, H> SessionScorer<S, C, H>
where
    S: AuthSessionRepository,
    C: InterviewRepository,
    H: HistoryRepository,
{
    pub fn new(
        verifier: AuthTokenVerifier<S>,
        catalog: Arc<C>,
        grader: AnswerGrader<C>,
        recorder: HistoryRecorder<H>,
        config: Arc<InterviewConfig>,
    ) -> Self {
        Self {
            verifier,
            catalog,
            grader,
            recorder,
            config,
        }
    }

    /// Wire the scorer straight from repositories
    pub fn from_repositories(
        session_repo: Arc<S>,
        catalog: Arc<C>,
        history_repo: Arc<H>,
        config: Arc<InterviewConfig>,
    ) -> Self {
        Self::new(
            AuthTokenVerifier::new(session_repo),
            catalog.clone(),
            AnswerGrader::new(catalog),
            HistoryRecorder::new(history_repo),
            config,
        )
    }

    pub async fn execute(&self, input: SubmitAnswersInput) -> InterviewResult<SubmitAnswersOutput> {
        let SubmitAnswersInput {
            user_id,
            auth_token,
            interview_id,
            answers,
        } = input;

        if !self.verifier.is_authorized(user_id, &auth_token).await {
            tracing::warn!(
                user_id = %user_id,
                interview_id = %interview_id,
                "Submission rejected: not authorized"
            );
            return Err(InterviewError::Unauthorized);
        }

        let session = self
            .catalog
            .find_session(interview_id)
            .await?
            .ok_or(InterviewError::InterviewNotFound)?;

        let answer_key = self.grader.load_key(interview_id).await?;

        let mut tally = ScoreTally::default();
        for answer in &answers {
            tally.record(answer_key.grade(answer.question_id, &answer.response));
        }

        let summary = ScoreSummary::from_tally(&session, tally);

        if summary.skipped < 0 {
            tracing::warn!(
                interview_id = %interview_id,
                total_questions = summary.total_questions,
                answers = answers.len(),
                skipped = summary.skipped,
                "Submission has more answers than questions"
            );
        }

        let today = Utc::now().date_naive();
        let history_recorded = match self
            .recorder
            .record(user_id, &summary.topic, today, &summary.score)
            .await
        {
            Ok(()) => true,
            Err(e) => match self.config.history_failure_policy {
                HistoryFailurePolicy::Warn => {
                    tracing::warn!(
                        user_id = %user_id,
                        interview_id = %interview_id,
                        error = %e,
                        "History not recorded, returning summary anyway"
                    );
                    false
                }
                HistoryFailurePolicy::Propagate => return Err(e),
            },
        };

        tracing::info!(
            user_id = %user_id,
            interview_id = %interview_id,
            score = %summary.score,
            correct = summary.correct,
            wrong = summary.wrong,
            skipped = summary.skipped,
            "Submission scored"
        );

        Ok(SubmitAnswersOutput {
            summary,
            history_recorded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::QuestionId;
    use crate::infra::memory::MemoryInterviewRepository;
    use crate::tests::fixtures::{TOKEN, USER, seed_abc_interview};

    fn scorer(
        repo: &MemoryInterviewRepository,
        policy: HistoryFailurePolicy,
    ) -> SessionScorer<MemoryInterviewRepository, MemoryInterviewRepository, MemoryInterviewRepository>
    {
        let repo = Arc::new(repo.clone());
        SessionScorer::from_repositories(
            repo.clone(),
            repo.clone(),
            repo,
            Arc::new(InterviewConfig::default().with_history_failure_policy(policy)),
        )
    }

    fn input(interview_id: InterviewId, answers: &[(i64, &str)]) -> SubmitAnswersInput {
        SubmitAnswersInput {
            user_id: USER,
            auth_token: TOKEN.to_string(),
            interview_id,
            answers: answers
                .iter()
                .map(|(q, r)| SubmittedAnswer::new(QuestionId::new(*q), *r))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_one_wrong_answer() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;

        let output = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(interview_id, &[(1, "A"), (2, "X"), (3, "C")]))
            .await
            .unwrap();

        let summary = output.summary;
        assert_eq!((summary.correct, summary.wrong, summary.skipped), (2, 1, 0));
        assert_eq!(summary.score, "2/3");
        assert_eq!(summary.total_questions, 3);
        assert!(output.history_recorded);

        let history = repo.history_entries().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].score, "2/3");
        assert_eq!(history[0].user_id, USER);
        assert_eq!(history[0].topic, summary.topic);
    }

    #[tokio::test]
    async fn test_omitted_question_is_skipped() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;

        let summary = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(interview_id, &[(1, "A"), (3, "C")]))
            .await
            .unwrap()
            .summary;

        assert_eq!((summary.correct, summary.wrong, summary.skipped), (2, 0, 1));
        assert_eq!(summary.score, "2/3");
    }

    #[tokio::test]
    async fn test_empty_submission_skips_everything() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;

        let summary = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(interview_id, &[]))
            .await
            .unwrap()
            .summary;

        assert_eq!((summary.correct, summary.wrong, summary.skipped), (0, 0, 3));
        assert_eq!(summary.score, "0/3");
        assert_eq!(repo.history_entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mismatched_token_rejects_without_side_effects() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;

        let mut request = input(interview_id, &[(1, "A"), (2, "B"), (3, "C")]);
        request.auth_token = "not-the-token".to_string();

        let err = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(request)
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::Unauthorized));
        assert!(repo.history_entries().await.is_empty());
        assert_eq!(repo.answer_key_load_count(), 0);
        assert_eq!(repo.session_lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_user_is_rejected() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;

        let mut request = input(interview_id, &[(1, "A")]);
        request.user_id = UserId::new(404);

        let err = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(request)
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::Unauthorized));
        assert_eq!(repo.answer_key_load_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_interview_is_rejected() {
        let repo = MemoryInterviewRepository::new();
        seed_abc_interview(&repo).await;

        let err = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(InterviewId::new(777), &[(1, "A")]))
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::InterviewNotFound));
        assert!(repo.history_entries().await.is_empty());
        assert_eq!(repo.answer_key_load_count(), 0);
    }

    #[tokio::test]
    async fn test_every_answer_graded_exactly_once() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;

        let summary = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(interview_id, &[(1, "X"), (2, "X"), (3, "C"), (9, "?")]))
            .await
            .unwrap()
            .summary;

        assert_eq!(summary.correct + summary.wrong, 4);
        assert_eq!(repo.answer_key_load_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicates_make_skipped_negative() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;

        let summary = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(
                interview_id,
                &[(1, "A"), (1, "A"), (1, "A"), (2, "B"), (3, "x")],
            ))
            .await
            .unwrap()
            .summary;

        assert_eq!(summary.correct, 4);
        assert_eq!(summary.wrong, 1);
        assert_eq!(summary.skipped, -2);
        assert_eq!(summary.score, "4/3");
        assert_eq!(
            summary.correct + summary.wrong + summary.skipped,
            summary.total_questions
        );
    }

    #[tokio::test]
    async fn test_unknown_question_counts_as_wrong() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;

        let summary = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(interview_id, &[(1, "A"), (42, "A")]))
            .await
            .unwrap()
            .summary;

        assert_eq!((summary.correct, summary.wrong, summary.skipped), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_history_failure_with_warn_policy_returns_summary() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;
        repo.set_history_offline(true);

        let output = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(interview_id, &[(1, "A"), (2, "B"), (3, "C")]))
            .await
            .unwrap();

        assert!(!output.history_recorded);
        assert_eq!(output.summary.score, "3/3");
        assert!(repo.history_entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_with_propagate_policy_fails() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;
        repo.set_history_offline(true);

        let err = scorer(&repo, HistoryFailurePolicy::Propagate)
            .execute(input(interview_id, &[(1, "A"), (2, "B"), (3, "C")]))
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::HistoryUnavailable(_)));
    }

    #[tokio::test]
    async fn test_catalog_failure_on_session_lookup_is_propagated() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;
        repo.set_catalog_offline(true);

        let err = scorer(&repo, HistoryFailurePolicy::Warn)
            .execute(input(interview_id, &[(1, "A")]))
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::Database(_)));
        assert!(repo.history_entries().await.is_empty());
    }

    /// Catalog whose session lookups succeed but whose question store times out
    struct QuestionStoreTimeout(MemoryInterviewRepository);

    impl InterviewRepository for QuestionStoreTimeout {
        async fn find_session(
            &self,
            interview_id: InterviewId,
        ) -> InterviewResult<Option<crate::domain::entities::InterviewSession>> {
            self.0.find_session(interview_id).await
        }

        async fn list_questions(
            &self,
            _interview_id: InterviewId,
        ) -> InterviewResult<Vec<crate::domain::entities::Question>> {
            Err(InterviewError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_answer_key_failure_fails_submission_without_history() {
        let repo = MemoryInterviewRepository::new();
        let interview_id = seed_abc_interview(&repo).await;
        let shared = Arc::new(repo.clone());

        let scorer = SessionScorer::from_repositories(
            shared.clone(),
            Arc::new(QuestionStoreTimeout(repo.clone())),
            shared,
            Arc::new(InterviewConfig::default()),
        );

        let err = scorer
            .execute(input(interview_id, &[(1, "A"), (2, "B"), (3, "C")]))
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::Database(_)));
        assert_eq!(err.status_code().as_u16(), 503);
        assert!(repo.history_entries().await.is_empty());
    }
}
