/**
 * Message Poller
 *
 * Delivers new chat messages for one session by re-fetching on a fixed
 * interval. The server filters with an inclusive `since`, so the poller
 * remembers the ids it already delivered at the cursor timestamp and drops
 * them from the next batch.
 *
 * Errors are logged and the next tick simply tries again.
 */

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::client::api::{ClientError, CollabClient};
use crate::shared::ChatMessage;

/// Default time between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

const CHANNEL_CAPACITY: usize = 256;

/// Polls one session's chat log
pub struct MessagePoller {
    client: CollabClient,
    session_id: Uuid,
    interval: Duration,
    cursor: Option<DateTime<Utc>>,
    /// Ids already delivered whose timestamp equals `cursor`
    seen_at_cursor: HashSet<Uuid>,
}

impl MessagePoller {
    pub fn new(client: CollabClient, session_id: Uuid) -> Self {
        Self {
            client,
            session_id,
            interval: DEFAULT_POLL_INTERVAL,
            cursor: None,
            seen_at_cursor: HashSet::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Skip history older than `since`
    pub fn starting_at(mut self, since: DateTime<Utc>) -> Self {
        self.cursor = Some(since);
        self.seen_at_cursor.clear();
        self
    }

    pub fn cursor(&self) -> Option<DateTime<Utc>> {
        self.cursor
    }

    /// Fetch once and return only messages not delivered before
    pub async fn poll_once(&mut self) -> Result<Vec<ChatMessage>, ClientError> {
        let batch = self.client.list_messages(self.session_id, self.cursor).await?;
        let fresh = self.accept(batch);
        if !fresh.is_empty() {
            tracing::debug!("[Poller] {} new messages in session {}", fresh.len(), self.session_id);
        }
        Ok(fresh)
    }

    fn accept(&mut self, batch: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let fresh: Vec<ChatMessage> = batch
            .into_iter()
            .filter(|m| match self.cursor {
                Some(cursor) if m.created_at < cursor => false,
                Some(cursor) if m.created_at == cursor => !self.seen_at_cursor.contains(&m.id),
                _ => true,
            })
            .collect();

        if let Some(newest) = fresh.iter().map(|m| m.created_at).max() {
            if self.cursor != Some(newest) {
                self.cursor = Some(newest);
                self.seen_at_cursor.clear();
            }
            self.seen_at_cursor.extend(
                fresh
                    .iter()
                    .filter(|m| m.created_at == newest)
                    .map(|m| m.id),
            );
        }

        fresh
    }

    /// Run the poll loop in a task
    ///
    /// The task ends when the returned receiver is dropped.
    pub fn spawn(mut self) -> (mpsc::Receiver<ChatMessage>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            loop {
                interval.tick().await;
                match self.poll_once().await {
                    Ok(messages) => {
                        for message in messages {
                            if tx.send(message).await.is_err() {
                                tracing::debug!("[Poller] Receiver dropped, stopping");
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("[Poller] Poll failed for session {}: {}", self.session_id, e);
                    }
                }
                if tx.is_closed() {
                    return;
                }
            }
        });

        (rx, handle)
    }
}
