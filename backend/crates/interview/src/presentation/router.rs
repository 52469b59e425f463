//! Interview and Auth Routers

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::InterviewConfig;
use crate::domain::repository::{
    AuthSessionRepository, HistoryRepository, InterviewRepository, UserRepository,
};
use crate::infra::postgres::PgInterviewRepository;
use crate::presentation::handlers::{self, AuthAppState, InterviewAppState};

/// Create the interview router with PostgreSQL repository
pub fn interview_router(repo: PgInterviewRepository, config: InterviewConfig) -> Router {
    interview_router_generic(repo, config)
}

/// Create a generic interview router for any repository implementation
pub fn interview_router_generic<R>(repo: R, config: InterviewConfig) -> Router
where
    R: AuthSessionRepository
        + InterviewRepository
        + HistoryRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let state = InterviewAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/{interview_id}",
            get(handlers::get_interview::<R>).post(handlers::submit_answers::<R>),
        )
        .route("/history/{user_id}", get(handlers::list_history::<R>))
        .with_state(state)
}

/// Create the sign-up/sign-in router with PostgreSQL repository
pub fn auth_router(repo: PgInterviewRepository, config: InterviewConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic sign-up/sign-in router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: InterviewConfig) -> Router
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .with_state(state)
}
