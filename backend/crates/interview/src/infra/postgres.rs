//! PostgreSQL Repository Implementations

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::entities::{
    AuthSession, HistoryEntry, InterviewSession, NewUser, Question, UserAccount, UserProfile,
};
use crate::domain::repository::{
    AuthSessionRepository, HistoryRepository, InterviewRepository, UserRepository,
};
use crate::domain::value_objects::{InterviewDuration, InterviewId, QuestionId, UserId, UserName};
use crate::error::{InterviewError, InterviewResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgInterviewRepository {
    pool: PgPool,
}

impl PgInterviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgInterviewRepository {
    async fn create(&self, user: &NewUser) -> InterviewResult<UserAccount> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_name, password_hash, first_name, last_name, country)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, user_name, password_hash, first_name, last_name, country
            "#,
        )
        .bind(user.user_name.as_str())
        .bind(&user.password_hash)
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(&user.profile.country)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => InterviewError::UserNameTaken,
            _ => InterviewError::Database(e),
        })?;

        row.into_account()
    }

    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> InterviewResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, password_hash, first_name, last_name, country
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_account).transpose()
    }
}

impl AuthSessionRepository for PgInterviewRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> InterviewResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT user_id, token_digest, expires_at_ms
            FROM auth_sessions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_auth_session))
    }

    async fn save(&self, session: &AuthSession) -> InterviewResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (user_id, token_digest, expires_at_ms)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET token_digest = EXCLUDED.token_digest,
                expires_at_ms = EXCLUDED.expires_at_ms
            "#,
        )
        .bind(session.user_id.value())
        .bind(&session.token_digest)
        .bind(session.expires_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl InterviewRepository for PgInterviewRepository {
    async fn find_session(
        &self,
        interview_id: InterviewId,
    ) -> InterviewResult<Option<InterviewSession>> {
        let row = sqlx::query_as::<_, InterviewRow>(
            r#"
            SELECT interview_id, topic, duration_secs, question_count
            FROM interviews
            WHERE interview_id = $1
            "#,
        )
        .bind(interview_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(InterviewRow::into_session).transpose()
    }

    async fn list_questions(&self, interview_id: InterviewId) -> InterviewResult<Vec<Question>> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT interview_id, question_id, prompt, correct_answer
            FROM interview_questions
            WHERE interview_id = $1
            ORDER BY question_id
            "#,
        )
        .bind(interview_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuestionRow::into_question).collect())
    }
}

impl HistoryRepository for PgInterviewRepository {
    async fn append(&self, entry: &HistoryEntry) -> InterviewResult<()> {
        sqlx::query(
            r#"
            INSERT INTO interview_history (user_id, topic, taken_on, score)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.user_id.value())
        .bind(&entry.topic)
        .bind(entry.taken_on)
        .bind(&entry.score)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_user(&self, user_id: UserId) -> InterviewResult<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT user_id, topic, taken_on, score
            FROM interview_history
            WHERE user_id = $1
            ORDER BY history_id DESC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryRow::into_entry).collect())
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_name: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    country: String,
}

impl UserRow {
    fn into_account(self) -> InterviewResult<UserAccount> {
        let user_name = UserName::new(&self.user_name).map_err(|e| {
            InterviewError::Internal(format!("user {} has invalid name: {}", self.user_id, e))
        })?;

        Ok(UserAccount {
            id: UserId::new(self.user_id),
            user_name,
            password_hash: self.password_hash,
            profile: UserProfile {
                first_name: self.first_name,
                last_name: self.last_name,
                country: self.country,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    user_id: i64,
    token_digest: Vec<u8>,
    expires_at_ms: Option<i64>,
}

impl AuthSessionRow {
    fn into_auth_session(self) -> AuthSession {
        AuthSession {
            user_id: UserId::new(self.user_id),
            token_digest: self.token_digest,
            expires_at_ms: self.expires_at_ms,
        }
    }
}

#[derive(sqlx::FromRow)]
struct InterviewRow {
    interview_id: i64,
    topic: String,
    duration_secs: i64,
    question_count: i64,
}

impl InterviewRow {
    fn into_session(self) -> InterviewResult<InterviewSession> {
        let duration = InterviewDuration::from_secs(self.duration_secs).ok_or_else(|| {
            InterviewError::Internal(format!(
                "interview {} has negative duration {}",
                self.interview_id, self.duration_secs
            ))
        })?;

        Ok(InterviewSession {
            id: InterviewId::new(self.interview_id),
            topic: self.topic,
            duration,
            total_questions: self.question_count,
        })
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    interview_id: i64,
    question_id: i64,
    prompt: String,
    correct_answer: String,
}

impl QuestionRow {
    fn into_question(self) -> Question {
        Question {
            interview_id: InterviewId::new(self.interview_id),
            id: QuestionId::new(self.question_id),
            prompt: self.prompt,
            correct_answer: self.correct_answer,
        }
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    user_id: i64,
    topic: String,
    taken_on: NaiveDate,
    score: String,
}

impl HistoryRow {
    fn into_entry(self) -> HistoryEntry {
        HistoryEntry {
            user_id: UserId::new(self.user_id),
            topic: self.topic,
            taken_on: self.taken_on,
            score: self.score,
        }
    }
}
