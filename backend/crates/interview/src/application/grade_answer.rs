//! Answer Grader
//!
//! The answer key of a session is loaded once, before any answer is graded.
//! A storage failure while loading fails the whole submission; grading from
//! a loaded key cannot fail.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::repository::InterviewRepository;
use crate::domain::services::grade_response;
use crate::domain::value_objects::{InterviewId, QuestionId};
use crate::error::InterviewResult;

/// Canonical answers of one session
#[derive(Debug, Clone)]
pub struct AnswerKey {
    interview_id: InterviewId,
    answers: HashMap<QuestionId, String>,
}

impl AnswerKey {
    pub fn new(
        interview_id: InterviewId,
        answers: impl IntoIterator<Item = (QuestionId, String)>,
    ) -> Self {
        Self {
            interview_id,
            answers: answers.into_iter().collect(),
        }
    }

    /// Always yields a verdict; questions missing from the key are wrong
    pub fn grade(&self, question_id: QuestionId, response: &str) -> bool {
        let canonical = self.answers.get(&question_id).map(String::as_str);

        if canonical.is_none() {
            tracing::debug!(
                interview_id = %self.interview_id,
                question_id = %question_id,
                "Question not in session"
            );
        }

        grade_response(canonical, response)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Loads answer keys from the catalog
pub struct AnswerGrader<C>
where
    C: InterviewRepository,
{
    catalog: Arc<C>,
}

impl<C> Clone for AnswerGrader<C>
where
    C: InterviewRepository,
{
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
        }
    }
}

impl<C> AnswerGrader<C>
where
    C: InterviewRepository,
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Load every canonical answer of a session
    pub async fn load_key(&self, interview_id: InterviewId) -> InterviewResult<AnswerKey> {
        let questions = self.catalog.list_questions(interview_id).await?;

        Ok(AnswerKey::new(
            interview_id,
            questions.into_iter().map(|q| (q.id, q.correct_answer)),
        ))
    }

    /// Grade a single response against the catalog
    pub async fn grade(
        &self,
        interview_id: InterviewId,
        question_id: QuestionId,
        response: &str,
    ) -> InterviewResult<bool> {
        Ok(self.load_key(interview_id).await?.grade(question_id, response))
    }
}
