//! In-Memory Repository Implementations
//!
//! Process-local stand-ins for the PostgreSQL repositories. State is shared
//! between clones. Under test, each store can be switched offline and
//! catalog reads are counted.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::{
    AuthSession, HistoryEntry, InterviewSession, NewUser, Question, UserAccount,
};
use crate::domain::repository::{
    AuthSessionRepository, HistoryRepository, InterviewRepository, UserRepository,
};
use crate::domain::value_objects::{InterviewId, QuestionId, UserId, UserName};
use crate::error::{InterviewError, InterviewResult};

#[derive(Default)]
struct MemoryState {
    users: RwLock<HashMap<UserName, UserAccount>>,
    last_user_id: AtomicI64,
    auth_sessions: RwLock<HashMap<UserId, AuthSession>>,
    interviews: RwLock<HashMap<InterviewId, InterviewSession>>,
    questions: RwLock<BTreeMap<(InterviewId, QuestionId), Question>>,
    history: Mutex<Vec<HistoryEntry>>,
    session_lookups: AtomicUsize,
    answer_key_loads: AtomicUsize,
    auth_offline: AtomicBool,
    catalog_offline: AtomicBool,
    history_offline: AtomicBool,
}

/// In-memory repository
#[derive(Clone, Default)]
pub struct MemoryInterviewRepository {
    state: Arc<MemoryState>,
}

fn offline() -> InterviewError {
    InterviewError::Database(sqlx::Error::PoolClosed)
}

fn check_online(flag: &AtomicBool) -> InterviewResult<()> {
    if flag.load(Ordering::SeqCst) {
        return Err(offline());
    }
    Ok(())
}

impl MemoryInterviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue (or replace) the token of a user
    pub async fn issue_token(&self, user_id: UserId, token: &str, expires_at_ms: Option<i64>) {
        self.state
            .auth_sessions
            .write()
            .await
            .insert(user_id, AuthSession::new(user_id, token, expires_at_ms));
    }

    /// Add an interview and its questions to the catalog
    pub async fn insert_interview(&self, session: InterviewSession, questions: Vec<Question>) {
        let interview_id = session.id;
        self.state
            .interviews
            .write()
            .await
            .insert(interview_id, session);

        let mut stored = self.state.questions.write().await;
        for question in questions {
            stored.insert((interview_id, question.id), question);
        }
    }

    /// Snapshot of the history log in append order
    pub async fn history_entries(&self) -> Vec<HistoryEntry> {
        self.state.history.lock().await.clone()
    }
}

#[cfg(test)]
impl MemoryInterviewRepository {
    /// Number of `find_session` calls so far
    pub fn session_lookup_count(&self) -> usize {
        self.state.session_lookups.load(Ordering::SeqCst)
    }

    /// Number of `list_questions` calls so far
    pub fn answer_key_load_count(&self) -> usize {
        self.state.answer_key_loads.load(Ordering::SeqCst)
    }

    pub fn set_auth_store_offline(&self, offline: bool) {
        self.state.auth_offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_catalog_offline(&self, offline: bool) {
        self.state.catalog_offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_history_offline(&self, offline: bool) {
        self.state.history_offline.store(offline, Ordering::SeqCst);
    }
}

impl UserRepository for MemoryInterviewRepository {
    async fn create(&self, user: &NewUser) -> InterviewResult<UserAccount> {
        check_online(&self.state.auth_offline)?;
        let mut users = self.state.users.write().await;
        if users.contains_key(&user.user_name) {
            return Err(InterviewError::UserNameTaken);
        }

        let id = UserId::new(self.state.last_user_id.fetch_add(1, Ordering::SeqCst) + 1);
        let account = UserAccount {
            id,
            user_name: user.user_name.clone(),
            password_hash: user.password_hash.clone(),
            profile: user.profile.clone(),
        };
        users.insert(user.user_name.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> InterviewResult<Option<UserAccount>> {
        check_online(&self.state.auth_offline)?;
        Ok(self.state.users.read().await.get(user_name).cloned())
    }
}

impl AuthSessionRepository for MemoryInterviewRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> InterviewResult<Option<AuthSession>> {
        check_online(&self.state.auth_offline)?;
        Ok(self.state.auth_sessions.read().await.get(&user_id).cloned())
    }

    async fn save(&self, session: &AuthSession) -> InterviewResult<()> {
        check_online(&self.state.auth_offline)?;
        self.state
            .auth_sessions
            .write()
            .await
            .insert(session.user_id, session.clone());
        Ok(())
    }
}

impl InterviewRepository for MemoryInterviewRepository {
    async fn find_session(
        &self,
        interview_id: InterviewId,
    ) -> InterviewResult<Option<InterviewSession>> {
        self.state.session_lookups.fetch_add(1, Ordering::SeqCst);
        check_online(&self.state.catalog_offline)?;
        Ok(self.state.interviews.read().await.get(&interview_id).cloned())
    }

    async fn list_questions(&self, interview_id: InterviewId) -> InterviewResult<Vec<Question>> {
        self.state.answer_key_loads.fetch_add(1, Ordering::SeqCst);
        check_online(&self.state.catalog_offline)?;
        let questions = self.state.questions.read().await;
        let range = (interview_id, QuestionId::new(i64::MIN))
            ..=(interview_id, QuestionId::new(i64::MAX));
        Ok(questions.range(range).map(|(_, q)| q.clone()).collect())
    }
}

impl HistoryRepository for MemoryInterviewRepository {
    async fn append(&self, entry: &HistoryEntry) -> InterviewResult<()> {
        check_online(&self.state.history_offline)?;
        self.state.history.lock().await.push(entry.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: UserId) -> InterviewResult<Vec<HistoryEntry>> {
        check_online(&self.state.history_offline)?;
        Ok(self
            .state
            .history
            .lock()
            .await
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }
}
