//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod get_interview;
pub mod grade_answer;
pub mod list_history;
pub mod record_history;
pub mod sign_in;
pub mod sign_up;
pub mod submit_answers;
pub mod verify_token;

// Re-exports
pub use config::{HistoryFailurePolicy, InterviewConfig};
pub use get_interview::{GetInterviewOutput, GetInterviewUseCase, QuestionPrompt};
pub use grade_answer::{AnswerGrader, AnswerKey};
pub use list_history::ListHistoryUseCase;
pub use record_history::HistoryRecorder;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use submit_answers::{SessionScorer, SubmitAnswersInput, SubmitAnswersOutput};
pub use verify_token::AuthTokenVerifier;
