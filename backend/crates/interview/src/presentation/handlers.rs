//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use platform::header::extract_header;

use crate::application::config::InterviewConfig;
use crate::application::get_interview::GetInterviewUseCase;
use crate::application::list_history::ListHistoryUseCase;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::application::submit_answers::{SessionScorer, SubmitAnswersInput};
use crate::domain::repository::{
    AuthSessionRepository, HistoryRepository, InterviewRepository, UserRepository,
};
use crate::domain::value_objects::{InterviewId, UserId};
use crate::error::{InterviewError, InterviewResult};
use crate::presentation::dto::{
    HistoryResponse, InterviewQuery, InterviewResponse, SignInRequest, SignInResponse,
    SignUpRequest, SignUpResponse, SubmitRequest, SubmitResponse,
};

/// Shared state for interview handlers
#[derive(Clone)]
pub struct InterviewAppState<R>
where
    R: AuthSessionRepository
        + InterviewRepository
        + HistoryRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<InterviewConfig>,
}

/// Shared state for sign-up and sign-in handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<InterviewConfig>,
}

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> InterviewResult<Json<SignUpResponse>>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let profile = req.profile();
    let use_case = SignUpUseCase::new(state.repo.clone());
    let output = use_case
        .execute(SignUpInput {
            user_name: req.user_name,
            password: req.password,
            profile,
        })
        .await?;

    Ok(Json(SignUpResponse {
        user_id: output.user_id.value(),
        user_name: output.user_name.to_string(),
    }))
}

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> InterviewResult<Json<SignInResponse>>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(SignInInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    Ok(Json(SignInResponse::from(output)))
}

/// POST /api/interview/{interviewId}
pub async fn submit_answers<R>(
    State(state): State<InterviewAppState<R>>,
    Path(interview_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SubmitRequest>,
) -> InterviewResult<Json<SubmitResponse>>
where
    R: AuthSessionRepository
        + InterviewRepository
        + HistoryRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let auth_token = auth_token(&headers, &state.config)?;

    let scorer = SessionScorer::from_repositories(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = SubmitAnswersInput {
        user_id: UserId::new(req.user_id),
        auth_token,
        interview_id: InterviewId::new(interview_id),
        answers: req.answers(),
    };

    let output = scorer.execute(input).await?;

    tracing::info!(
        user_id = req.user_id,
        interview_id,
        score = %output.summary.score,
        history_recorded = output.history_recorded,
        "Interview submitted"
    );

    Ok(Json(SubmitResponse::from(output.summary)))
}

/// GET /api/interview/{interviewId}?userId=N
pub async fn get_interview<R>(
    State(state): State<InterviewAppState<R>>,
    Path(interview_id): Path<i64>,
    Query(query): Query<InterviewQuery>,
    headers: HeaderMap,
) -> InterviewResult<Json<InterviewResponse>>
where
    R: AuthSessionRepository
        + InterviewRepository
        + HistoryRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let auth_token = auth_token(&headers, &state.config)?;

    let use_case = GetInterviewUseCase::new(state.repo.clone(), state.repo.clone());
    let output = use_case
        .execute(
            UserId::new(query.user_id),
            &auth_token,
            InterviewId::new(interview_id),
        )
        .await?;

    Ok(Json(InterviewResponse::from(output)))
}

/// GET /api/interview/history/{userId}
pub async fn list_history<R>(
    State(state): State<InterviewAppState<R>>,
    Path(user_id): Path<i64>,
    headers: HeaderMap,
) -> InterviewResult<Json<HistoryResponse>>
where
    R: AuthSessionRepository
        + InterviewRepository
        + HistoryRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let auth_token = auth_token(&headers, &state.config)?;

    let use_case = ListHistoryUseCase::new(state.repo.clone(), state.repo.clone());
    let entries = use_case.execute(UserId::new(user_id), &auth_token).await?;

    Ok(Json(HistoryResponse {
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

fn auth_token(headers: &HeaderMap, config: &InterviewConfig) -> InterviewResult<String> {
    extract_header(headers, &config.auth_header_name)
        .ok_or_else(|| InterviewError::MissingHeader(config.auth_header_name.clone()))
}
