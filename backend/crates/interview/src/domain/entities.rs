//! Domain Entities
//!
//! Core business entities for the interview domain.

use chrono::{NaiveDate, Utc};

use crate::domain::services::{format_score, skipped_count};
use crate::domain::value_objects::{
    InterviewDuration, InterviewId, QuestionId, ScoreTally, UserId, UserName,
};

/// Interview session metadata - immutable once generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSession {
    pub id: InterviewId,
    pub topic: String,
    pub duration: InterviewDuration,
    pub total_questions: i64,
}

/// One question of an interview session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub interview_id: InterviewId,
    pub id: QuestionId,
    /// Text shown to the candidate
    pub prompt: String,
    /// Canonical answer, compared verbatim
    pub correct_answer: String,
}

/// A single answer inside a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub response: String,
}

impl SubmittedAnswer {
    pub fn new(question_id: QuestionId, response: impl Into<String>) -> Self {
        Self {
            question_id,
            response: response.into(),
        }
    }
}

/// Aggregate result of grading one submission
///
/// `correct + wrong + skipped == total_questions` always holds; `skipped`
/// may be negative for malformed submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub interview_id: InterviewId,
    pub total_questions: i64,
    pub correct: i64,
    pub wrong: i64,
    pub skipped: i64,
    pub topic: String,
    pub duration: String,
    pub score: String,
}

impl ScoreSummary {
    /// Build the summary for a fully graded submission
    pub fn from_tally(session: &InterviewSession, tally: ScoreTally) -> Self {
        Self {
            interview_id: session.id,
            total_questions: session.total_questions,
            correct: tally.correct,
            wrong: tally.wrong,
            skipped: skipped_count(session.total_questions, tally.correct, tally.wrong),
            topic: session.topic.clone(),
            duration: session.duration.to_string(),
            score: format_score(tally.correct, session.total_questions),
        }
    }
}

/// Append-only record of one completed submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub user_id: UserId,
    pub topic: String,
    pub taken_on: NaiveDate,
    pub score: String,
}

impl HistoryEntry {
    pub fn new(
        user_id: UserId,
        topic: impl Into<String>,
        taken_on: NaiveDate,
        score: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            topic: topic.into(),
            taken_on,
            score: score.into(),
        }
    }
}

/// Registered account
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: UserId,
    pub user_name: UserName,
    /// Argon2id PHC string
    pub password_hash: String,
    pub profile: UserProfile,
}

/// Free-form profile data captured at sign-up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub country: String,
}

/// Account about to be created; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password_hash: String,
    pub profile: UserProfile,
}

/// Token currently issued to a user
///
/// Issued on sign-in; a new sign-in replaces the previous token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: UserId,
    /// SHA-256 digest of the issued token
    pub token_digest: Vec<u8>,
    /// Expiry (unix ms); `None` means valid until revoked
    pub expires_at_ms: Option<i64>,
}

impl AuthSession {
    pub fn new(user_id: UserId, token: &str, expires_at_ms: Option<i64>) -> Self {
        Self {
            user_id,
            token_digest: platform::crypto::token_digest(token).to_vec(),
            expires_at_ms,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at_ms
            .is_some_and(|expires| Utc::now().timestamp_millis() > expires)
    }

    /// Whether `token` is the one this session was issued with
    pub fn matches(&self, token: &str) -> bool {
        let presented = platform::crypto::token_digest(token);
        platform::crypto::constant_time_eq(&presented, &self.token_digest)
    }
}
