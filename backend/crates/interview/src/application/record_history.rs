//! History Recorder

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::HistoryEntry;
use crate::domain::repository::HistoryRepository;
use crate::domain::value_objects::UserId;
use crate::error::{InterviewError, InterviewResult};

/// Appends completed submissions to the history log
pub struct HistoryRecorder<H>
where
    H: HistoryRepository,
{
    history_repo: Arc<H>,
}

impl<H> Clone for HistoryRecorder<H>
where
    H: HistoryRepository,
{
    fn clone(&self) -> Self {
        Self {
            history_repo: self.history_repo.clone(),
        }
    }
}

impl<H> HistoryRecorder<H>
where
    H: HistoryRepository,
{
    pub fn new(history_repo: Arc<H>) -> Self {
        Self { history_repo }
    }

    /// Append one entry
    ///
    /// Any store failure comes back as `HistoryUnavailable`; whether that
    /// fails the request is up to the caller.
    pub async fn record(
        &self,
        user_id: UserId,
        topic: &str,
        date: NaiveDate,
        score: &str,
    ) -> InterviewResult<()> {
        let entry = HistoryEntry::new(user_id, topic, date, score);

        self.history_repo
            .append(&entry)
            .await
            .map_err(|e| InterviewError::HistoryUnavailable(e.to_string()))?;

        tracing::info!(
            user_id = %user_id,
            topic = %topic,
            score = %score,
            "History entry recorded"
        );

        Ok(())
    }
}
