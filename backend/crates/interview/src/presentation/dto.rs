//! API DTOs (Data Transfer Objects)
//!
//! Counts in responses are rendered as strings for the existing client.

use serde::{Deserialize, Serialize};

use crate::application::get_interview::GetInterviewOutput;
use crate::application::sign_in::SignInOutput;
use crate::domain::entities::{HistoryEntry, ScoreSummary, SubmittedAnswer, UserProfile};
use crate::domain::value_objects::QuestionId;

/// Request for POST /api/interview/{interviewId}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub user_id: i64,
    #[serde(default, alias = "respnonses")]
    pub responses: Vec<SubmitAnswerRequest>,
}

/// One answer of a submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub question_id: i64,
    pub response: String,
}

impl SubmitRequest {
    pub fn answers(&self) -> Vec<SubmittedAnswer> {
        self.responses
            .iter()
            .map(|r| SubmittedAnswer::new(QuestionId::new(r.question_id), r.response.clone()))
            .collect()
    }
}

/// Response for POST /api/interview/{interviewId}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub interview_id: String,
    pub total_questions: String,
    pub correct: String,
    pub wrong: String,
    pub skipped: String,
    pub topic: String,
    pub duration: String,
    pub score: String,
}

impl From<ScoreSummary> for SubmitResponse {
    fn from(summary: ScoreSummary) -> Self {
        Self {
            interview_id: summary.interview_id.to_string(),
            total_questions: summary.total_questions.to_string(),
            correct: summary.correct.to_string(),
            wrong: summary.wrong.to_string(),
            skipped: summary.skipped.to_string(),
            topic: summary.topic,
            duration: summary.duration,
            score: summary.score,
        }
    }
}

/// Query for GET /api/interview/{interviewId}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuery {
    pub user_id: i64,
}

/// Response for GET /api/interview/{interviewId}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    pub interview_id: i64,
    pub topic: String,
    pub duration: String,
    pub total_questions: i64,
    pub questions: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: i64,
    pub prompt: String,
}

impl From<GetInterviewOutput> for InterviewResponse {
    fn from(output: GetInterviewOutput) -> Self {
        let GetInterviewOutput { session, questions } = output;
        Self {
            interview_id: session.id.value(),
            topic: session.topic,
            duration: session.duration.to_string(),
            total_questions: session.total_questions,
            questions: questions
                .into_iter()
                .map(|q| QuestionResponse {
                    question_id: q.question_id.value(),
                    prompt: q.prompt,
                })
                .collect(),
        }
    }
}

/// Response for GET /api/interview/history/{userId}
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntryResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryResponse {
    pub topic: String,
    /// YYYY-MM-DD
    pub date: String,
    pub score: String,
}

impl From<HistoryEntry> for HistoryEntryResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            topic: entry.topic,
            date: entry.taken_on.format("%Y-%m-%d").to_string(),
            score: entry.score,
        }
    }
}

/// Request for POST /api/auth/signup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub user_name: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub country: String,
}

impl SignUpRequest {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            country: self.country.trim().to_string(),
        }
    }
}

/// Response for POST /api/auth/signup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user_id: i64,
    pub user_name: String,
}

/// Request for POST /api/auth/signin
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub user_name: String,
    pub password: String,
}

/// Response for POST /api/auth/signin
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub user_id: i64,
    pub auth_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at_ms: Option<i64>,
}

impl From<SignInOutput> for SignInResponse {
    fn from(output: SignInOutput) -> Self {
        Self {
            user_id: output.user_id.value(),
            auth_token: output.auth_token,
            expires_at_ms: output.expires_at_ms,
        }
    }
}
