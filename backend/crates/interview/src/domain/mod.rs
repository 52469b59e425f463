//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (InterviewSession, Question, ScoreSummary, HistoryEntry, AuthSession)
//! - Domain value objects (typed ids, InterviewDuration, ScoreTally)
//! - Domain services (grading and score arithmetic)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
