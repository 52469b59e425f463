//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{
    AuthSession, HistoryEntry, InterviewSession, NewUser, Question, UserAccount,
};
use crate::domain::value_objects::{InterviewId, UserId, UserName};
use crate::error::InterviewResult;

/// Registered accounts
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create an account; `UserNameTaken` if the name exists
    async fn create(&self, user: &NewUser) -> InterviewResult<UserAccount>;

    async fn find_by_user_name(&self, user_name: &UserName)
    -> InterviewResult<Option<UserAccount>>;
}

/// Tokens issued at sign-in, one per user
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Current session for a user, if any
    async fn find_by_user_id(&self, user_id: UserId) -> InterviewResult<Option<AuthSession>>;

    /// Store the session, replacing any previous one of the same user
    async fn save(&self, session: &AuthSession) -> InterviewResult<()>;
}

/// Interview catalog - read-only
#[trait_variant::make(InterviewRepository: Send)]
pub trait LocalInterviewRepository {
    /// Session metadata
    async fn find_session(&self, interview_id: InterviewId)
    -> InterviewResult<Option<InterviewSession>>;

    /// All questions of a session, ordered by question id
    async fn list_questions(&self, interview_id: InterviewId) -> InterviewResult<Vec<Question>>;
}

/// Append-only history log
#[trait_variant::make(HistoryRepository: Send)]
pub trait LocalHistoryRepository {
    /// Append one entry; must be atomic with respect to other appends
    async fn append(&self, entry: &HistoryEntry) -> InterviewResult<()>;

    /// Entries of one user, newest first
    async fn list_by_user(&self, user_id: UserId) -> InterviewResult<Vec<HistoryEntry>>;
}
