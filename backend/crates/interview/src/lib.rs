//! Interview Scoring Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, grading rules, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers
//!
//! ## Scoring Model
//! - A submission is graded only after the claimed user's token is verified
//! - Every submitted answer is graded once, in submission order
//! - Grading is exact string equality; unknown questions count as wrong
//! - `skipped = total - correct - wrong` is never clamped
//! - Each successful submission appends one history entry
//! - Sign-in issues a fresh token; only its digest is stored and it
//!   replaces the previous token of that user

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{HistoryFailurePolicy, InterviewConfig};
pub use error::{InterviewError, InterviewResult};
pub use infra::memory::MemoryInterviewRepository;
pub use infra::postgres::PgInterviewRepository;
pub use presentation::router::{
    auth_router, auth_router_generic, interview_router, interview_router_generic,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
